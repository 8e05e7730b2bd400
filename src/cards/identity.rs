//! Card identities.
//!
//! Items and equipment are addressed by catalog index, drones by their
//! master key. `CardIdentity` keeps the two addressing schemes apart at the
//! type level, so an item never carries a stray key and a drone never
//! carries a stray index.

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// Catalog index of an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemIndex(pub i32);

impl ItemIndex {
    #[must_use]
    pub const fn new(index: i32) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for ItemIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Item #{}", self.0)
    }
}

/// Catalog index of an equipment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EquipmentIndex(pub i32);

impl EquipmentIndex {
    /// Wire value meaning "no equipment".
    pub const NONE: i32 = -1;

    #[must_use]
    pub const fn new(index: i32) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for EquipmentIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Equipment #{}", self.0)
    }
}

/// Card kind, as tagged on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CardKind {
    Item = 0,
    Equipment = 1,
    Drone = 2,
}

impl CardKind {
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    pub fn from_tag(tag: u8) -> Result<Self, CodecError> {
        match tag {
            0 => Ok(Self::Item),
            1 => Ok(Self::Equipment),
            2 => Ok(Self::Drone),
            other => Err(CodecError::UnknownCardKind(other)),
        }
    }
}

/// What a card is.
///
/// ```
/// use duel_deck::cards::{CardIdentity, CardKind};
///
/// let gunner = CardIdentity::drone("Drone1Master");
/// assert_eq!(gunner.kind(), CardKind::Drone);
/// assert_eq!(gunner.wire_index(), 0);
/// assert_eq!(gunner.wire_key(), "Drone1Master");
///
/// let syringe = CardIdentity::item(4);
/// assert_eq!(syringe.wire_key(), "");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardIdentity {
    Item(ItemIndex),
    Equipment(EquipmentIndex),
    Drone(String),
}

impl CardIdentity {
    #[must_use]
    pub const fn item(index: i32) -> Self {
        Self::Item(ItemIndex(index))
    }

    #[must_use]
    pub const fn equipment(index: i32) -> Self {
        Self::Equipment(EquipmentIndex(index))
    }

    #[must_use]
    pub fn drone(key: impl Into<String>) -> Self {
        Self::Drone(key.into())
    }

    #[must_use]
    pub fn kind(&self) -> CardKind {
        match self {
            Self::Item(_) => CardKind::Item,
            Self::Equipment(_) => CardKind::Equipment,
            Self::Drone(_) => CardKind::Drone,
        }
    }

    /// Index field as written on the wire (0 for drones).
    #[must_use]
    pub fn wire_index(&self) -> i32 {
        match self {
            Self::Item(index) => index.raw(),
            Self::Equipment(index) => index.raw(),
            Self::Drone(_) => 0,
        }
    }

    /// Key field as written on the wire (empty unless a drone).
    #[must_use]
    pub fn wire_key(&self) -> &str {
        match self {
            Self::Drone(key) => key,
            _ => "",
        }
    }

    /// Rebuild an identity from its wire fields.
    pub fn from_wire(kind: u8, index: i32, key: String) -> Result<Self, CodecError> {
        Ok(match CardKind::from_tag(kind)? {
            CardKind::Item => Self::item(index),
            CardKind::Equipment => Self::equipment(index),
            CardKind::Drone => Self::Drone(key),
        })
    }
}

impl std::fmt::Display for CardIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Item(index) => index.fmt(f),
            Self::Equipment(index) => index.fmt(f),
            Self::Drone(key) => write!(f, "Drone {}", key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags() {
        assert_eq!(CardKind::Item.tag(), 0);
        assert_eq!(CardKind::Drone.tag(), 2);
        assert_eq!(CardKind::from_tag(1), Ok(CardKind::Equipment));
        assert_eq!(CardKind::from_tag(9), Err(CodecError::UnknownCardKind(9)));
    }

    #[test]
    fn test_from_wire_ignores_meaningless_fields() {
        let item = CardIdentity::from_wire(0, 12, "junk".to_string()).unwrap();
        assert_eq!(item, CardIdentity::item(12));

        let drone = CardIdentity::from_wire(2, 77, "Turret1Master".to_string()).unwrap();
        assert_eq!(drone, CardIdentity::drone("Turret1Master"));
    }

    #[test]
    fn test_display() {
        assert_eq!(CardIdentity::item(3).to_string(), "Item #3");
        assert_eq!(CardIdentity::equipment(5).to_string(), "Equipment #5");
        assert_eq!(CardIdentity::drone("MegaDroneMaster").to_string(), "Drone MegaDroneMaster");
    }
}
