//! Protocol messages and their byte layouts.
//!
//! Every message is a 1-byte tag followed by its body:
//!
//! | tag | message        | body                                          |
//! |-----|----------------|-----------------------------------------------|
//! | 1   | `SubmitDeck`   | length-prefixed encoded deck                  |
//! | 2   | `DeckRejected` | player u8, reason string                      |
//! | 3   | `DeckApproved` | player u8                                     |
//! | 4   | `MatchState`   | phase u8, round i32, time remaining f32       |
//! | 5   | `CardDealt`    | player u8, kind u8, index i32, key string     |
//! | 6   | `Scores`       | count u8, i32 per participant                 |
//! | 7   | `Stocks`       | count u8, i32 per participant                 |
//! | 8   | `RulesSync`    | length-prefixed bincode `DeckRules`           |
//! | 9   | `ReadyWithdrawn` | player u8                                   |
//!
//! Score and stock arrays are full replacements and may change length
//! between messages.

use smallvec::SmallVec;

use crate::cards::CardIdentity;
use crate::codec::{WireReader, WireWriter};
use crate::core::{DeckRules, MatchPhase, PlayerId};
use crate::deck::Deck;
use crate::error::{CodecError, CodecResult};

const TAG_SUBMIT_DECK: u8 = 1;
const TAG_DECK_REJECTED: u8 = 2;
const TAG_DECK_APPROVED: u8 = 3;
const TAG_MATCH_STATE: u8 = 4;
const TAG_CARD_DEALT: u8 = 5;
const TAG_SCORES: u8 = 6;
const TAG_STOCKS: u8 = 7;
const TAG_RULES_SYNC: u8 = 8;
const TAG_READY_WITHDRAWN: u8 = 9;

/// Phase, round and timer snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MatchState {
    pub phase: MatchPhase,
    pub round: i32,
    /// Seconds left in the current phase.
    pub time_remaining: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    /// Participant → host. The payload is an encoded [`Deck`].
    SubmitDeck { deck: Vec<u8> },
    /// Host → submitter.
    DeckRejected { player: PlayerId, reason: String },
    /// Host → all: `player`'s deck was accepted.
    DeckApproved { player: PlayerId },
    MatchState(MatchState),
    /// Informational; carries no validation meaning.
    CardDealt { player: PlayerId, card: CardIdentity },
    Scores(Vec<i32>),
    Stocks(Vec<i32>),
    /// Host → all: the rules every deck will be validated against.
    RulesSync { rules: Vec<u8> },
    /// Host → all: `player`'s previously accepted deck was replaced by a
    /// rejected one, so `player` is no longer ready.
    ReadyWithdrawn { player: PlayerId },
}

impl Message {
    /// Wrap an encoded snapshot of `deck`.
    #[must_use]
    pub fn submit(deck: &Deck) -> Self {
        Self::SubmitDeck {
            deck: deck.encode(),
        }
    }

    pub fn rules_sync(rules: &DeckRules) -> CodecResult<Self> {
        Ok(Self::RulesSync {
            rules: rules.to_bytes()?,
        })
    }

    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::SubmitDeck { .. } => "SubmitDeck",
            Self::DeckRejected { .. } => "DeckRejected",
            Self::DeckApproved { .. } => "DeckApproved",
            Self::MatchState(_) => "MatchState",
            Self::CardDealt { .. } => "CardDealt",
            Self::Scores(_) => "Scores",
            Self::Stocks(_) => "Stocks",
            Self::RulesSync { .. } => "RulesSync",
            Self::ReadyWithdrawn { .. } => "ReadyWithdrawn",
        }
    }

    /// Encode to bytes. Fails only for arrays longer than 255 entries.
    pub fn encode(&self) -> CodecResult<Vec<u8>> {
        let mut writer = WireWriter::new();
        match self {
            Self::SubmitDeck { deck } => {
                writer.write_u8(TAG_SUBMIT_DECK);
                writer.write_bytes(deck);
            }
            Self::DeckRejected { player, reason } => {
                writer.write_u8(TAG_DECK_REJECTED);
                writer.write_u8(player.0);
                writer.write_str(reason);
            }
            Self::DeckApproved { player } => {
                writer.write_u8(TAG_DECK_APPROVED);
                writer.write_u8(player.0);
            }
            Self::MatchState(state) => {
                writer.write_u8(TAG_MATCH_STATE);
                writer.write_u8(state.phase.tag());
                writer.write_i32(state.round);
                writer.write_f32(state.time_remaining);
            }
            Self::CardDealt { player, card } => {
                writer.write_u8(TAG_CARD_DEALT);
                writer.write_u8(player.0);
                writer.write_u8(card.kind().tag());
                writer.write_i32(card.wire_index());
                writer.write_str(card.wire_key());
            }
            Self::Scores(scores) => {
                writer.write_u8(TAG_SCORES);
                writer.write_i32_array(scores)?;
            }
            Self::Stocks(stocks) => {
                writer.write_u8(TAG_STOCKS);
                writer.write_i32_array(stocks)?;
            }
            Self::RulesSync { rules } => {
                writer.write_u8(TAG_RULES_SYNC);
                writer.write_bytes(rules);
            }
            Self::ReadyWithdrawn { player } => {
                writer.write_u8(TAG_READY_WITHDRAWN);
                writer.write_u8(player.0);
            }
        }
        Ok(writer.into_bytes())
    }

    /// Decode one whole message. Trailing bytes are an error.
    pub fn decode(bytes: &[u8]) -> CodecResult<Self> {
        let mut reader = WireReader::new(bytes);
        let message = match reader.read_u8()? {
            TAG_SUBMIT_DECK => Self::SubmitDeck {
                deck: reader.read_bytes()?.to_vec(),
            },
            TAG_DECK_REJECTED => Self::DeckRejected {
                player: PlayerId(reader.read_u8()?),
                reason: reader.read_string()?,
            },
            TAG_DECK_APPROVED => Self::DeckApproved {
                player: PlayerId(reader.read_u8()?),
            },
            TAG_MATCH_STATE => Self::MatchState(MatchState {
                phase: MatchPhase::from_tag(reader.read_u8()?)?,
                round: reader.read_i32()?,
                time_remaining: reader.read_f32()?,
            }),
            TAG_CARD_DEALT => {
                let player = PlayerId(reader.read_u8()?);
                let kind = reader.read_u8()?;
                let index = reader.read_i32()?;
                let key = reader.read_string()?;
                Self::CardDealt {
                    player,
                    card: CardIdentity::from_wire(kind, index, key)?,
                }
            }
            TAG_SCORES => Self::Scores(reader.read_i32_array()?),
            TAG_STOCKS => Self::Stocks(reader.read_i32_array()?),
            TAG_RULES_SYNC => Self::RulesSync {
                rules: reader.read_bytes()?.to_vec(),
            },
            TAG_READY_WITHDRAWN => Self::ReadyWithdrawn {
                player: PlayerId(reader.read_u8()?),
            },
            other => return Err(CodecError::UnknownMessage(other)),
        };
        reader.finish()?;
        Ok(message)
    }
}

/// Who a message is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Recipient {
    /// The host.
    Authority,
    /// Every participant, host included.
    All,
    Player(PlayerId),
}

/// A message addressed for the transport.
#[derive(Clone, Debug, PartialEq)]
pub struct Envelope {
    pub to: Recipient,
    pub message: Message,
}

impl Envelope {
    #[must_use]
    pub fn new(to: Recipient, message: Message) -> Self {
        Self { to, message }
    }

    #[must_use]
    pub fn broadcast(message: Message) -> Self {
        Self::new(Recipient::All, message)
    }

    #[must_use]
    pub fn to_authority(message: Message) -> Self {
        Self::new(Recipient::Authority, message)
    }

    #[must_use]
    pub fn to_player(player: PlayerId, message: Message) -> Self {
        Self::new(Recipient::Player(player), message)
    }

    /// Does this envelope reach `player`?
    #[must_use]
    pub fn reaches(&self, player: PlayerId) -> bool {
        match self.to {
            Recipient::All => true,
            Recipient::Player(target) => target == player,
            Recipient::Authority => false,
        }
    }
}

/// Outgoing messages produced by handling one event.
pub type Outbox = SmallVec<[Envelope; 2]>;

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(message: &Message) -> Message {
        Message::decode(&message.encode().unwrap()).unwrap()
    }

    #[test]
    fn test_rejection_layout() {
        let bytes = Message::DeckRejected {
            player: PlayerId::new(1),
            reason: "no".to_string(),
        }
        .encode()
        .unwrap();

        assert_eq!(bytes, vec![2, 1, 2, 0, 0, 0, b'n', b'o']);
    }

    #[test]
    fn test_match_state_layout() {
        let bytes = Message::MatchState(MatchState {
            phase: MatchPhase::Active,
            round: 2,
            time_remaining: 1.0,
        })
        .encode()
        .unwrap();

        assert_eq!(bytes[..6], [4u8, 3, 2, 0, 0, 0]);
        assert_eq!(bytes[6..], 1.0f32.to_le_bytes());
    }

    #[test]
    fn test_scores_variable_length() {
        let three = Message::Scores(vec![5, 0, -2]);
        let one = Message::Scores(vec![7]);
        assert_eq!(round_trip(&three), three);
        assert_eq!(round_trip(&one), one);
        assert_eq!(Message::Stocks(vec![]).encode().unwrap(), vec![7, 0]);
    }

    #[test]
    fn test_scores_over_255_fail_to_encode() {
        let too_many = Message::Scores(vec![0; 256]);
        assert_eq!(too_many.encode(), Err(CodecError::ArrayTooLong(256)));
    }

    #[test]
    fn test_card_dealt_drone() {
        let dealt = Message::CardDealt {
            player: PlayerId::new(0),
            card: CardIdentity::drone("FlameDroneMaster"),
        };
        assert_eq!(round_trip(&dealt), dealt);
    }

    #[test]
    fn test_rules_sync() {
        let rules = DeckRules::default().with_budget(13);
        let message = Message::rules_sync(&rules).unwrap();
        let Message::RulesSync { rules: bytes } = round_trip(&message) else {
            panic!("expected RulesSync");
        };
        assert_eq!(DeckRules::from_bytes(&bytes).unwrap(), rules);
    }

    #[test]
    fn test_ready_withdrawn_layout() {
        let withdrawn = Message::ReadyWithdrawn {
            player: PlayerId::new(3),
        };
        assert_eq!(withdrawn.encode().unwrap(), vec![9, 3]);
        assert_eq!(round_trip(&withdrawn), withdrawn);
    }

    #[test]
    fn test_unknown_tag() {
        assert_eq!(Message::decode(&[99]), Err(CodecError::UnknownMessage(99)));
        assert!(Message::decode(&[]).is_err());
    }

    #[test]
    fn test_bad_phase() {
        assert_eq!(
            Message::decode(&[4, 42, 0, 0, 0, 0, 0, 0, 0, 0]),
            Err(CodecError::UnknownPhase(42))
        );
    }

    #[test]
    fn test_envelope_reach() {
        let msg = Message::DeckApproved {
            player: PlayerId::new(0),
        };
        assert!(Envelope::broadcast(msg.clone()).reaches(PlayerId::new(3)));
        assert!(!Envelope::to_player(PlayerId::new(1), msg.clone()).reaches(PlayerId::new(0)));
        assert!(!Envelope::to_authority(msg).reaches(PlayerId::new(0)));
    }
}
