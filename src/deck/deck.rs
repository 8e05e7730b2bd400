//! The deck a participant builds before a match.
//!
//! Cards keep insertion order. Each card remembers the copy number it was
//! given and the stacked price it cost at the moment it was added; neither
//! is ever rewritten. Copy numbers are handed out from a per-identity
//! counter that only moves forward while any copy of that identity remains,
//! so removing the 2nd of three copies and adding another yields copy 4.
//!
//! Storage is persistent (`im`), so [`Deck::snapshot`] is an O(1) owned
//! value that later edits cannot reach.

use im::{HashMap as ImHashMap, Vector};

use crate::cards::{CardIdentity, CostModel, EquipmentIndex};
use crate::core::DeckRules;
use crate::error::DeckError;

/// One card in a deck.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DeckCard {
    identity: CardIdentity,
    copy_number: u32,
    resolved_cost: i32,
}

impl DeckCard {
    pub(crate) fn new(identity: CardIdentity, copy_number: u32, resolved_cost: i32) -> Self {
        Self {
            identity,
            copy_number,
            resolved_cost,
        }
    }

    #[must_use]
    pub fn identity(&self) -> &CardIdentity {
        &self.identity
    }

    /// 1-based ordinal among copies of the same identity.
    #[must_use]
    pub fn copy_number(&self) -> u32 {
        self.copy_number
    }

    /// Stacked price cached when the card was added. Display only.
    #[must_use]
    pub fn resolved_cost(&self) -> i32 {
        self.resolved_cost
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
struct CopyCounter {
    /// Copies currently in the deck.
    live: u32,
    /// Last copy number handed out.
    next: u32,
}

/// An ordered, budgeted card list with an optional equipment slot.
///
/// ## Example
///
/// ```
/// use duel_deck::cards::{CardIdentity, CostModel, ItemEntry, ItemTier, StaticCatalog};
/// use duel_deck::core::DeckRules;
/// use duel_deck::deck::Deck;
///
/// let rules = DeckRules::default().with_budget(10).with_stacking(1, 0);
/// let catalog = StaticCatalog::new().with_item(1, ItemEntry::new("Hoof", ItemTier::Tier2));
/// let model = CostModel::new(&rules, &catalog);
///
/// let mut deck = Deck::new();
/// deck.add_card(CardIdentity::item(1), &model).unwrap();
/// deck.add_card(CardIdentity::item(1), &model).unwrap();
///
/// assert_eq!(deck.total_cost(), 3 + 4);
/// assert!(deck.add_card(CardIdentity::item(1), &model).is_err());
/// assert_eq!(deck.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deck {
    survivor: Option<i32>,
    cards: Vector<DeckCard>,
    equipment: Option<EquipmentIndex>,
    equipment_cost: i32,
    total_cost: i32,
    copies: ImHashMap<CardIdentity, CopyCounter>,
}

impl Deck {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a deck from decoded parts. Copy counters resume after the
    /// highest copy number seen per identity; the total is recomputed.
    pub(crate) fn from_parts(
        survivor: Option<i32>,
        equipment: Option<EquipmentIndex>,
        equipment_cost: i32,
        cards: Vec<DeckCard>,
    ) -> Self {
        let mut copies: ImHashMap<CardIdentity, CopyCounter> = ImHashMap::new();
        for card in &cards {
            let mut counter = copies.get(&card.identity).copied().unwrap_or_default();
            counter.live += 1;
            counter.next = counter.next.max(card.copy_number).max(counter.live);
            copies.insert(card.identity.clone(), counter);
        }

        let mut deck = Self {
            survivor,
            cards: cards.into_iter().collect(),
            equipment,
            equipment_cost: if equipment.is_some() { equipment_cost } else { 0 },
            total_cost: 0,
            copies,
        };
        deck.recalculate_total_cost();
        deck
    }

    /// Body index the deck is built for.
    #[must_use]
    pub fn survivor(&self) -> Option<i32> {
        self.survivor
    }

    /// Negative body indices are refused; they have no wire encoding.
    pub fn set_survivor(&mut self, survivor: Option<i32>) -> Result<(), DeckError> {
        if let Some(index) = survivor.filter(|index| *index < 0) {
            return Err(DeckError::NegativeIndex(index));
        }
        self.survivor = survivor;
        Ok(())
    }

    pub fn cards(&self) -> impl Iterator<Item = &DeckCard> {
        self.cards.iter()
    }

    #[must_use]
    pub fn card(&self, index: usize) -> Option<&DeckCard> {
        self.cards.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn equipment(&self) -> Option<EquipmentIndex> {
        self.equipment
    }

    #[must_use]
    pub fn equipment_cost(&self) -> i32 {
        self.equipment_cost
    }

    /// Sum of cached card prices plus the equipment price.
    #[must_use]
    pub fn total_cost(&self) -> i32 {
        self.total_cost
    }

    /// Copies of `identity` currently in the deck.
    #[must_use]
    pub fn copies_of(&self, identity: &CardIdentity) -> u32 {
        self.copies.get(identity).map_or(0, |counter| counter.live)
    }

    /// Number of distinct identities tracked by the copy table.
    #[must_use]
    pub fn distinct_cards(&self) -> usize {
        self.copies.len()
    }

    /// Append a copy of `identity`, priced by `model`.
    ///
    /// A full deck is rejected before anything changes. A card that pushes
    /// the total past the budget is rolled back, copy counter included.
    pub fn add_card(
        &mut self,
        identity: CardIdentity,
        model: &CostModel<'_>,
    ) -> Result<&DeckCard, DeckError> {
        let rules = model.rules();
        if self.cards.len() >= rules.max_deck_size {
            return Err(DeckError::Full {
                max: rules.max_deck_size,
            });
        }

        let previous = self.copies.get(&identity).copied();
        let mut counter = previous.unwrap_or_default();
        counter.live += 1;
        counter.next += 1;

        let cost = model.card_cost(&identity, counter.next);
        self.copies.insert(identity.clone(), counter);
        self.cards.push_back(DeckCard::new(identity.clone(), counter.next, cost));
        self.recalculate_total_cost();

        if self.total_cost > rules.budget {
            let attempted = self.total_cost;
            self.cards.pop_back();
            match previous {
                Some(counter) => {
                    self.copies.insert(identity, counter);
                }
                None => {
                    self.copies.remove(&identity);
                }
            }
            self.recalculate_total_cost();
            return Err(DeckError::OverBudget {
                cost: attempted,
                budget: rules.budget,
            });
        }

        Ok(&self.cards[self.cards.len() - 1])
    }

    /// Remove and return the card at `index`. Other copies keep their
    /// copy numbers.
    pub fn remove_card_at(&mut self, index: usize) -> Option<DeckCard> {
        if index >= self.cards.len() {
            return None;
        }
        let card = self.cards.remove(index);

        if let Some(mut counter) = self.copies.get(&card.identity).copied() {
            counter.live = counter.live.saturating_sub(1);
            if counter.live == 0 {
                self.copies.remove(&card.identity);
            } else {
                self.copies.insert(card.identity.clone(), counter);
            }
        }

        self.recalculate_total_cost();
        Some(card)
    }

    /// Put `identity` in the equipment slot at price `cost`, replacing any
    /// previous equipment. Rolled back if the total exceeds the budget.
    /// Negative indices are refused.
    pub fn set_equipment(
        &mut self,
        identity: CardIdentity,
        cost: i32,
        rules: &DeckRules,
    ) -> Result<(), DeckError> {
        let CardIdentity::Equipment(index) = identity else {
            return Err(DeckError::NotEquipment);
        };
        if index.raw() < 0 {
            return Err(DeckError::NegativeIndex(index.raw()));
        }

        let previous = (self.equipment, self.equipment_cost);
        self.equipment = Some(index);
        self.equipment_cost = cost;
        self.recalculate_total_cost();

        if self.total_cost > rules.budget {
            let attempted = self.total_cost;
            (self.equipment, self.equipment_cost) = previous;
            self.recalculate_total_cost();
            return Err(DeckError::OverBudget {
                cost: attempted,
                budget: rules.budget,
            });
        }
        Ok(())
    }

    pub fn clear_equipment(&mut self) {
        self.equipment = None;
        self.equipment_cost = 0;
        self.recalculate_total_cost();
    }

    /// Empty the deck, the equipment slot and the copy table. The survivor
    /// choice is kept.
    pub fn clear(&mut self) {
        self.cards.clear();
        self.copies.clear();
        self.equipment = None;
        self.equipment_cost = 0;
        self.total_cost = 0;
    }

    /// Recompute the total from the cached card prices and equipment price.
    pub fn recalculate_total_cost(&mut self) -> i32 {
        let cards = self
            .cards
            .iter()
            .fold(0i32, |sum, card| sum.saturating_add(card.resolved_cost));
        self.total_cost = cards.saturating_add(self.equipment_cost);
        self.total_cost
    }

    /// Independent owned copy; edits to either side never reach the other.
    #[must_use]
    pub fn snapshot(&self) -> Deck {
        self.clone()
    }
}
