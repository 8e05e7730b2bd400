//! Submission and sync protocol.
//!
//! ## Key Types
//!
//! - `Message`: the wire messages, each a 1-byte tag plus body
//! - `Authority`: host session, re-validates every submitted deck
//! - `Participant`: submitter session, tracks its own verdict
//! - `MatchSync` / `SyncView`: host broadcasts and their receiver-side copy
//! - `ProtocolLog`: leveled event log shared by the sessions
//!
//! Sessions never touch a transport. Handlers take bytes or messages and
//! return addressed [`Envelope`]s for the caller to deliver.

pub mod authority;
pub mod log;
pub mod message;
pub mod participant;
pub mod sync;

pub use authority::Authority;
pub use log::{LogEntry, LogLevel, LogOutput, ProtocolLog, DEFAULT_LOG_CAPACITY};
pub use message::{Envelope, MatchState, Message, Outbox, Recipient};
pub use participant::{Participant, SubmissionState};
pub use sync::{MatchSync, SyncView};
