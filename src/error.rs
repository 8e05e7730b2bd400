//! Error types for deck editing, wire decoding and submission.
//!
//! Validation failures are not errors in this sense: they are reported as
//! [`crate::deck::Rejection`] values inside a [`crate::deck::ValidationResult`]
//! and travel across the wire as ordinary data.

use thiserror::Error;

/// Failure to decode a wire payload.
///
/// Decoding is all-or-nothing: when any of these is returned, no partially
/// decoded deck or message escapes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("unexpected end of payload: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("negative length prefix: {0}")]
    NegativeLength(i32),

    #[error("string is not valid UTF-8")]
    InvalidUtf8,

    #[error("unknown card kind tag: {0}")]
    UnknownCardKind(u8),

    #[error("unknown message tag: {0}")]
    UnknownMessage(u8),

    #[error("unknown match phase tag: {0}")]
    UnknownPhase(u8),

    #[error("array of {0} entries does not fit a 1-byte count")]
    ArrayTooLong(usize),

    #[error("{0} trailing bytes after payload")]
    TrailingBytes(usize),

    #[error("rules payload: {0}")]
    Rules(String),
}

/// Failure of a local deck mutation. The deck is left unchanged.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckError {
    #[error("deck is full ({max} cards)")]
    Full { max: usize },

    #[error("deck would cost {cost}, budget is {budget}")]
    OverBudget { cost: i32, budget: i32 },

    #[error("only equipment can occupy the equipment slot")]
    NotEquipment,

    #[error("negative index {0} cannot be stored in a deck")]
    NegativeIndex(i32),
}

/// Reasons a participant cannot submit right now.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("deck already approved for this match")]
    AlreadyApproved,

    #[error("a submission is already waiting for the host")]
    AwaitingVerdict,

    #[error("{0}")]
    Invalid(String),
}

pub type CodecResult<T> = std::result::Result<T, CodecError>;
