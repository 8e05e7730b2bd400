//! Match phase tag carried by sync messages.
//!
//! No transition logic lives here; the match orchestrator owns that. This
//! crate only moves the byte across the wire.

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// Match phase as broadcast by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MatchPhase {
    #[default]
    Lobby = 0,
    DeckBuilding = 1,
    Warmup = 2,
    Active = 3,
    Tiebreak = 4,
    RoundEnd = 5,
    MatchEnd = 6,
}

impl MatchPhase {
    /// Wire byte for this phase.
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Parse a wire byte.
    pub fn from_tag(tag: u8) -> Result<Self, CodecError> {
        Ok(match tag {
            0 => Self::Lobby,
            1 => Self::DeckBuilding,
            2 => Self::Warmup,
            3 => Self::Active,
            4 => Self::Tiebreak,
            5 => Self::RoundEnd,
            6 => Self::MatchEnd,
            other => return Err(CodecError::UnknownPhase(other)),
        })
    }
}

impl std::fmt::Display for MatchPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Lobby => "Lobby",
            Self::DeckBuilding => "Deck Building",
            Self::Warmup => "Warmup",
            Self::Active => "Active",
            Self::Tiebreak => "Tiebreak",
            Self::RoundEnd => "Round End",
            Self::MatchEnd => "Match End",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_stable() {
        assert_eq!(MatchPhase::Lobby.tag(), 0);
        assert_eq!(MatchPhase::Active.tag(), 3);
        assert_eq!(MatchPhase::MatchEnd.tag(), 6);
        assert_eq!(MatchPhase::from_tag(4), Ok(MatchPhase::Tiebreak));
    }

    #[test]
    fn test_unknown_tag() {
        assert_eq!(MatchPhase::from_tag(7), Err(CodecError::UnknownPhase(7)));
    }
}
