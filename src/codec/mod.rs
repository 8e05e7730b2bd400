//! Binary encoding for decks and protocol messages.
//!
//! - `wire`: primitives shared by every payload
//! - `deck`: `Deck::encode` / `Deck::decode`
//!
//! Message layouts live next to the message types in
//! [`crate::net::message`].

pub mod deck;
pub mod wire;

pub use wire::{WireReader, WireWriter, MAX_ARRAY_LEN};
