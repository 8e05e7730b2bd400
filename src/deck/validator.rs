//! Authoritative deck validation.
//!
//! Checks run in a fixed order and the first failure is the reported reason:
//!
//! 1. too many cards
//! 2. empty deck
//! 3. equipment present but not allowed
//! 4. equipment banned (or unknown to the catalog)
//! 5. any card banned (or unknown to the catalog)
//! 6. every card re-priced from rules + catalog, copy ordinals rebuilt from
//!    card order
//! 7. equipment re-priced and added
//! 8. recomputed total over budget
//!
//! Cached `resolved_cost`, `equipment_cost` and `total_cost` on the deck are
//! never read here. They exist for display; a client that lowers them on the
//! wire changes nothing about the verdict.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::cards::{CardIdentity, CostModel};

use super::deck::Deck;

/// Why a deck was refused. `Display` is the player-facing reason.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("Too many cards: {count}/{max}")]
    TooManyCards { count: usize, max: usize },

    #[error("Deck is empty")]
    EmptyDeck,

    #[error("Equipment is not allowed in this match")]
    EquipmentNotAllowed,

    #[error("{name} is banned")]
    Banned { name: String },

    #[error("{name} is not in the catalog")]
    Unknown { name: String },

    #[error("Deck costs {cost}, budget is {budget}")]
    OverBudget { cost: i32, budget: i32 },
}

/// Outcome of [`validate`], as shown to players.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Empty when valid.
    pub reason: String,
}

impl ValidationResult {
    #[must_use]
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            reason: String::new(),
        }
    }

    #[must_use]
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            reason: reason.into(),
        }
    }
}

impl From<Result<(), Rejection>> for ValidationResult {
    fn from(result: Result<(), Rejection>) -> Self {
        match result {
            Ok(()) => Self::valid(),
            Err(rejection) => Self::invalid(rejection.to_string()),
        }
    }
}

/// Validate `deck` and report the first failing check.
#[must_use]
pub fn validate(deck: &Deck, model: &CostModel<'_>) -> ValidationResult {
    check(deck, model).into()
}

/// Typed form of [`validate`].
pub fn check(deck: &Deck, model: &CostModel<'_>) -> Result<(), Rejection> {
    let rules = model.rules();

    if deck.len() > rules.max_deck_size {
        return Err(Rejection::TooManyCards {
            count: deck.len(),
            max: rules.max_deck_size,
        });
    }
    if deck.is_empty() {
        return Err(Rejection::EmptyDeck);
    }

    let equipment = deck.equipment().map(CardIdentity::Equipment);
    if let Some(equipment) = &equipment {
        if !rules.allow_equipment {
            return Err(Rejection::EquipmentNotAllowed);
        }
        screen(equipment, model)?;
    }

    let mut copies: FxHashMap<&CardIdentity, u32> = FxHashMap::default();
    let mut total = 0i32;
    for card in deck.cards() {
        let identity = card.identity();
        screen(identity, model)?;

        let copy = copies.entry(identity).or_insert(0);
        *copy += 1;
        total = total.saturating_add(model.card_cost(identity, *copy));
    }

    if let Some(equipment) = &equipment {
        total = total.saturating_add(model.base_cost(equipment));
    }

    if total > rules.budget {
        return Err(Rejection::OverBudget {
            cost: total,
            budget: rules.budget,
        });
    }
    Ok(())
}

/// What the host would charge for `deck`, ignoring cached prices.
#[must_use]
pub fn recompute_total(deck: &Deck, model: &CostModel<'_>) -> i32 {
    let mut copies: FxHashMap<&CardIdentity, u32> = FxHashMap::default();
    let cards = deck.cards().fold(0i32, |total, card| {
        let copy = copies.entry(card.identity()).or_insert(0);
        *copy += 1;
        total.saturating_add(model.card_cost(card.identity(), *copy))
    });
    let equipment = deck
        .equipment()
        .map_or(0, |index| model.base_cost(&CardIdentity::Equipment(index)));
    cards.saturating_add(equipment)
}

fn screen(identity: &CardIdentity, model: &CostModel<'_>) -> Result<(), Rejection> {
    if !model.resolves(identity) {
        return Err(Rejection::Unknown {
            name: model.display_name(identity),
        });
    }
    if model.is_banned(identity) {
        return Err(Rejection::Banned {
            name: model.display_name(identity),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{EquipmentEntry, ItemEntry, ItemTier, StaticCatalog};
    use crate::core::DeckRules;
    use crate::deck::DeckCard;

    fn catalog() -> StaticCatalog {
        StaticCatalog::new()
            .with_item(1, ItemEntry::new("Hoof", ItemTier::Tier1))
            .with_item(2, ItemEntry::new("Ukulele", ItemTier::Tier2))
            .with_item(42, ItemEntry::new("Clover", ItemTier::Tier1).with_display_name("57 Leaf Clover"))
            .with_equipment(0, EquipmentEntry::new("Fruit").with_display_name("Foreign Fruit"))
            .with_equipment(1, EquipmentEntry::new("Meteor").lunar().banned())
    }

    fn deck_of(cards: &[CardIdentity], equipment: Option<i32>) -> Deck {
        let cards = cards
            .iter()
            .map(|identity| DeckCard::new(identity.clone(), 1, 0))
            .collect();
        Deck::from_parts(
            None,
            equipment.map(crate::cards::EquipmentIndex::new),
            0,
            cards,
        )
    }

    #[test]
    fn test_valid_deck() {
        let rules = DeckRules::default();
        let catalog = catalog();
        let model = CostModel::new(&rules, &catalog);
        let deck = deck_of(&[CardIdentity::item(1), CardIdentity::item(2)], Some(0));

        assert_eq!(validate(&deck, &model), ValidationResult::valid());
    }

    #[test]
    fn test_empty_deck() {
        let rules = DeckRules::default();
        let catalog = catalog();
        let model = CostModel::new(&rules, &catalog);

        let result = validate(&Deck::new(), &model);
        assert!(!result.is_valid);
        assert_eq!(result.reason, "Deck is empty");
    }

    #[test]
    fn test_max_size_reported_before_budget() {
        let rules = DeckRules::default().with_max_deck_size(2).with_budget(1);
        let catalog = catalog();
        let model = CostModel::new(&rules, &catalog);
        let deck = deck_of(&vec![CardIdentity::item(2); 3], None);

        assert_eq!(
            check(&deck, &model),
            Err(Rejection::TooManyCards { count: 3, max: 2 })
        );
    }

    #[test]
    fn test_equipment_disallowed() {
        let rules = DeckRules::default().with_equipment_allowed(false);
        let catalog = catalog();
        let model = CostModel::new(&rules, &catalog);
        let deck = deck_of(&[CardIdentity::item(1)], Some(0));

        assert_eq!(check(&deck, &model), Err(Rejection::EquipmentNotAllowed));
    }

    #[test]
    fn test_equipment_banned() {
        let rules = DeckRules::default();
        let catalog = catalog();
        let model = CostModel::new(&rules, &catalog);
        let deck = deck_of(&[CardIdentity::item(1)], Some(1));

        assert_eq!(
            validate(&deck, &model).reason,
            "Meteor is banned"
        );
    }

    #[test]
    fn test_banned_item_names_card() {
        let rules = DeckRules::default().with_banned_items("42");
        let catalog = catalog();
        let model = CostModel::new(&rules, &catalog);
        let deck = deck_of(&[CardIdentity::item(42)], None);

        let result = validate(&deck, &model);
        assert!(!result.is_valid);
        assert_eq!(result.reason, "57 Leaf Clover is banned");
    }

    #[test]
    fn test_unknown_item_fails_closed() {
        let rules = DeckRules::default().with_budget(10_000);
        let catalog = catalog();
        let model = CostModel::new(&rules, &catalog);
        let deck = deck_of(&[CardIdentity::item(404)], None);

        assert_eq!(
            check(&deck, &model),
            Err(Rejection::Unknown {
                name: "Item #404".to_string()
            })
        );
    }

    #[test]
    fn test_over_budget_uses_recomputed_total() {
        let rules = DeckRules::default().with_budget(8).with_stacking(1, 0);
        let catalog = catalog();
        let model = CostModel::new(&rules, &catalog);
        // Ukulele x3 = 3 + 4 + 5, all cached at 0.
        let deck = deck_of(&vec![CardIdentity::item(2); 3], None);

        assert_eq!(deck.total_cost(), 0);
        assert_eq!(recompute_total(&deck, &model), 12);
        assert_eq!(
            validate(&deck, &model).reason,
            "Deck costs 12, budget is 8"
        );
    }

    #[test]
    fn test_equipment_priced_fresh() {
        let rules = DeckRules::default().with_budget(4).with_equipment_costs(3, 1);
        let catalog = catalog();
        let model = CostModel::new(&rules, &catalog);
        let deck = deck_of(&[CardIdentity::item(2)], Some(0));

        assert_eq!(
            check(&deck, &model),
            Err(Rejection::OverBudget { cost: 6, budget: 4 })
        );
    }

    #[test]
    fn test_drones_always_screen_clean() {
        let rules = DeckRules::default();
        let catalog = catalog();
        let model = CostModel::new(&rules, &catalog);
        let deck = deck_of(&[CardIdentity::drone("SomeModdedDrone")], None);

        assert!(validate(&deck, &model).is_valid);
    }
}
