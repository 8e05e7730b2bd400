//! Deck wire format.
//!
//! ```text
//! survivor        i32   (-1 = none)
//! equipment       i32   (-1 = none)
//! equipment cost  i32
//! card count      i32
//! per card, in insertion order:
//!   kind          u8
//!   index         i32   (0 for drones)
//!   copy number   i32
//!   resolved cost i32
//!   drone key     string (empty unless a drone)
//! ```
//!
//! Decoded costs are advisory: the decoded deck recomputes its total, and
//! the host's validator ignores them entirely.

use crate::cards::{CardIdentity, EquipmentIndex};
use crate::deck::{Deck, DeckCard};
use crate::error::CodecResult;

use super::wire::{WireReader, WireWriter};

/// Smallest possible encoded card: kind + three ints + empty key prefix.
const MIN_CARD_SIZE: usize = 1 + 4 + 4 + 4 + 4;

const NO_SURVIVOR: i32 = -1;

impl Deck {
    /// Encode into a standalone buffer.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut writer = WireWriter::with_capacity(16 + self.len() * MIN_CARD_SIZE);
        self.write_to(&mut writer);
        writer.into_bytes()
    }

    /// Decode a standalone buffer. Trailing bytes are an error.
    pub fn decode(bytes: &[u8]) -> CodecResult<Deck> {
        let mut reader = WireReader::new(bytes);
        let deck = Self::read_from(&mut reader)?;
        reader.finish()?;
        Ok(deck)
    }

    pub fn write_to(&self, writer: &mut WireWriter) {
        writer.write_i32(self.survivor().unwrap_or(NO_SURVIVOR));
        writer.write_i32(self.equipment().map_or(EquipmentIndex::NONE, EquipmentIndex::raw));
        writer.write_i32(self.equipment_cost());
        writer.write_i32(i32::try_from(self.len()).unwrap_or(i32::MAX));

        for card in self.cards() {
            let identity = card.identity();
            writer.write_u8(identity.kind().tag());
            writer.write_i32(identity.wire_index());
            writer.write_i32(i32::try_from(card.copy_number()).unwrap_or(i32::MAX));
            writer.write_i32(card.resolved_cost());
            writer.write_str(identity.wire_key());
        }
    }

    pub fn read_from(reader: &mut WireReader<'_>) -> CodecResult<Deck> {
        let survivor = reader.read_i32()?;
        let equipment = reader.read_i32()?;
        let equipment_cost = reader.read_i32()?;
        let count = reader.read_count(MIN_CARD_SIZE)?;

        let mut cards = Vec::with_capacity(count);
        for _ in 0..count {
            let kind = reader.read_u8()?;
            let index = reader.read_i32()?;
            let copy_number = reader.read_i32()?;
            let resolved_cost = reader.read_i32()?;
            let key = reader.read_string()?;

            let identity = CardIdentity::from_wire(kind, index, key)?;
            cards.push(DeckCard::new(
                identity,
                u32::try_from(copy_number).unwrap_or(0),
                resolved_cost,
            ));
        }

        Ok(Deck::from_parts(
            (survivor >= 0).then_some(survivor),
            (equipment != EquipmentIndex::NONE).then_some(EquipmentIndex::new(equipment)),
            equipment_cost,
            cards,
        ))
    }
}
