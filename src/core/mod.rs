//! Shared building blocks: participant ids, the match phase tag and the
//! deck building rules.

pub mod config;
pub mod phase;
pub mod player;

pub use config::{BanList, DeckRules, TierCosts};
pub use phase::MatchPhase;
pub use player::{PlayerId, PlayerMap};
