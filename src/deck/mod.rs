//! Decks and their validation.
//!
//! - `Deck`: ordered cards, equipment slot, cached total
//! - `validate` / `check`: the host's authoritative re-check

#[allow(clippy::module_inception)]
pub mod deck;
pub mod validator;

pub use deck::{Deck, DeckCard};
pub use validator::{check, recompute_total, validate, Rejection, ValidationResult};
