//! # duel-deck
//!
//! Budgeted deck building and host-authoritative deck submission for small
//! private matches.
//!
//! ## Design Principles
//!
//! 1. **Host Decides**: Participants validate locally for feedback, but the
//!    host re-prices every card from its own rules and catalog. Costs carried
//!    on the wire are display data only.
//!
//! 2. **Injected Capabilities**: Rules (`DeckRules`) and catalog
//!    (`CatalogProvider`) are passed in explicitly. Nothing reads global state.
//!
//! 3. **Owned Snapshots**: Decks cross the participant/host boundary as
//!    encoded bytes or `Deck::snapshot` copies, never as shared references.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: `Deck` keeps its cards and copy table
//!   in `im` collections, so snapshots are O(1).
//!
//! - **Copy Ordinals**: The n-th copy of a card pays a stacking surcharge.
//!   Copy numbers are never reused while any copy of that card remains.
//!
//! ## Modules
//!
//! - `core`: Player ids, match phase, deck rules
//! - `cards`: Card identities, catalog access, cost model
//! - `deck`: Deck mutation and authoritative validation
//! - `codec`: Little-endian binary encoding of decks
//! - `net`: Protocol messages, host/participant sessions, sync broadcasts
//! - `presets`: Named deck storage
//! - `error`: Codec, deck and submission errors

pub mod cards;
pub mod codec;
pub mod core;
pub mod deck;
pub mod error;
pub mod net;
pub mod presets;

// Re-export commonly used types
pub use crate::core::{BanList, DeckRules, MatchPhase, PlayerId, PlayerMap, TierCosts};

pub use crate::cards::{
    CardIdentity, CardKind, CatalogProvider, CostModel, EquipmentEntry, EquipmentIndex, ItemEntry,
    ItemIndex, ItemTier, StaticCatalog, UNRESOLVED_COST,
};

pub use crate::deck::{validate, Deck, DeckCard, Rejection, ValidationResult};

pub use crate::codec::{WireReader, WireWriter};

pub use crate::net::{
    Authority, Envelope, MatchState, MatchSync, Message, Outbox, Participant, ProtocolLog,
    Recipient, SubmissionState, SyncView,
};

pub use crate::presets::{load_deck, save_deck, DirPresetStore, MemoryPresetStore, PresetStore};

pub use crate::error::{CodecError, CodecResult, DeckError, SubmitError};
