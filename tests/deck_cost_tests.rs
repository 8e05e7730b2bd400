//! Deck pricing and validation tests.
//!
//! These tests exercise the cost model through whole decks:
//! - Copy ordinals and stacking surcharges
//! - Budget rollback on local edits
//! - Validation order and ban enforcement
//! - Properties that must hold for any card sequence

use proptest::prelude::*;

use duel_deck::cards::{CardIdentity, CostModel, EquipmentEntry, ItemEntry, ItemTier, StaticCatalog};
use duel_deck::core::DeckRules;
use duel_deck::deck::{check, recompute_total, validate, Deck, Rejection};
use duel_deck::error::DeckError;

fn catalog() -> StaticCatalog {
    StaticCatalog::new()
        .with_item(1, ItemEntry::new("Hoof", ItemTier::Tier1))
        .with_item(2, ItemEntry::new("Ukulele", ItemTier::Tier2))
        .with_item(3, ItemEntry::new("Behemoth", ItemTier::Tier3))
        .with_item(4, ItemEntry::new("Brainstalks", ItemTier::Boss))
        .with_item(5, ItemEntry::new("Transcendence", ItemTier::Lunar))
        .with_item(42, ItemEntry::new("Clover", ItemTier::Tier1).with_display_name("57 Leaf Clover"))
        .with_equipment(0, EquipmentEntry::new("Fruit").with_display_name("Foreign Fruit"))
        .with_equipment(1, EquipmentEntry::new("Meteor").lunar())
}

/// Adding the same card three times numbers copies 1, 2, 3; a re-add after
/// removing the middle copy gets 4.
#[test]
fn test_copy_numbers_never_reused() {
    let rules = DeckRules::default().with_budget(100);
    let catalog = catalog();
    let model = CostModel::new(&rules, &catalog);
    let hoof = CardIdentity::item(1);

    let mut deck = Deck::new();
    for _ in 0..3 {
        deck.add_card(hoof.clone(), &model).unwrap();
    }
    let numbers: Vec<u32> = deck.cards().map(|c| c.copy_number()).collect();
    assert_eq!(numbers, vec![1, 2, 3]);

    deck.remove_card_at(1).unwrap();
    let added = deck.add_card(hoof.clone(), &model).unwrap();
    assert_eq!(added.copy_number(), 4);
    assert_eq!(deck.copies_of(&hoof), 3);
}

/// The copy table forgets a card once its last copy is removed.
#[test]
fn test_copy_table_drops_empty_entries() {
    let rules = DeckRules::default();
    let catalog = catalog();
    let model = CostModel::new(&rules, &catalog);

    let mut deck = Deck::new();
    deck.add_card(CardIdentity::item(1), &model).unwrap();
    deck.add_card(CardIdentity::item(2), &model).unwrap();
    deck.remove_card_at(0).unwrap();

    assert_eq!(deck.distinct_cards(), 1);

    deck.add_card(CardIdentity::item(1), &model).unwrap();
    assert_eq!(deck.card(1).map(|c| c.copy_number()), Some(1));
}

/// Budget 10, deck at 9, adding a base-5 card leaves the deck untouched.
#[test]
fn test_add_over_budget_rolls_back() {
    let rules = DeckRules::default()
        .with_budget(10)
        .with_stacking(0, 0)
        .with_tier_costs(duel_deck::core::TierCosts {
            tier1: 3,
            tier2: 5,
            ..Default::default()
        });
    let catalog = catalog();
    let model = CostModel::new(&rules, &catalog);

    let mut deck = Deck::new();
    for _ in 0..3 {
        deck.add_card(CardIdentity::item(1), &model).unwrap();
    }
    assert_eq!(deck.total_cost(), 9);
    let before = deck.snapshot();

    let err = deck.add_card(CardIdentity::item(2), &model).unwrap_err();

    assert_eq!(err, DeckError::OverBudget { cost: 14, budget: 10 });
    assert_eq!(deck, before);
    assert_eq!(deck.copies_of(&CardIdentity::item(2)), 0);
}

/// A full deck refuses new cards before pricing them.
#[test]
fn test_full_deck() {
    let rules = DeckRules::default().with_max_deck_size(2).with_budget(100);
    let catalog = catalog();
    let model = CostModel::new(&rules, &catalog);

    let mut deck = Deck::new();
    deck.add_card(CardIdentity::item(1), &model).unwrap();
    deck.add_card(CardIdentity::item(1), &model).unwrap();

    assert_eq!(
        deck.add_card(CardIdentity::item(4), &model).unwrap_err(),
        DeckError::Full { max: 2 }
    );
}

/// Equipment swaps roll back when over budget and refuse non-equipment.
#[test]
fn test_equipment_slot() {
    let rules = DeckRules::default().with_budget(5);
    let catalog = catalog();
    let model = CostModel::new(&rules, &catalog);
    let meteor = CardIdentity::equipment(1);

    let mut deck = Deck::new();
    deck.add_card(CardIdentity::item(2), &model).unwrap();
    deck.set_equipment(meteor.clone(), model.base_cost(&meteor), &rules)
        .unwrap();
    assert_eq!(deck.total_cost(), 5);

    let fruit = CardIdentity::equipment(0);
    assert_eq!(
        deck.set_equipment(fruit.clone(), model.base_cost(&fruit), &rules),
        Err(DeckError::OverBudget { cost: 6, budget: 5 })
    );
    assert_eq!(deck.equipment().map(|e| e.raw()), Some(1));

    assert_eq!(
        deck.set_equipment(CardIdentity::item(1), 0, &rules),
        Err(DeckError::NotEquipment)
    );
}

/// Item 42 banned by index: rejected by name even though it is cheap.
#[test]
fn test_ban_list_rejects_cheap_card() {
    let rules = DeckRules::default().with_banned_items("42");
    let catalog = catalog();
    let model = CostModel::new(&rules, &catalog);

    let mut deck = Deck::new();
    deck.add_card(CardIdentity::item(42), &model).unwrap();
    assert_eq!(deck.total_cost(), 1);

    let result = validate(&deck, &model);
    assert!(!result.is_valid);
    assert!(result.reason.contains("57 Leaf Clover"));
}

/// Ban lists also match internal names, case-insensitively.
#[test]
fn test_ban_list_by_name() {
    let rules = DeckRules::default().with_banned_equipment("METEOR");
    let catalog = catalog();
    let model = CostModel::new(&rules, &catalog);

    let mut deck = Deck::new();
    deck.add_card(CardIdentity::item(1), &model).unwrap();
    deck.set_equipment(CardIdentity::equipment(1), 2, &rules).unwrap();

    assert_eq!(
        check(&deck, &model),
        Err(Rejection::Banned {
            name: "Meteor".to_string()
        })
    );
}

/// Too many cards is reported even when the deck is also over budget.
#[test]
fn test_size_checked_before_budget() {
    let generous = DeckRules::default().with_budget(1000);
    let catalog = catalog();
    let mut deck = Deck::new();
    {
        let model = CostModel::new(&generous, &catalog);
        for _ in 0..6 {
            deck.add_card(CardIdentity::item(4), &model).unwrap();
        }
    }

    let strict = DeckRules::default().with_max_deck_size(5).with_budget(3);
    let model = CostModel::new(&strict, &catalog);

    assert_eq!(
        validate(&deck, &model).reason,
        "Too many cards: 6/5"
    );
}

/// Rules loaded from JSON drive the same checks as builder-made rules.
#[test]
fn test_rules_from_json() {
    let rules = DeckRules::from_json(
        r#"{ "budget": 7, "stack_flat": 2, "banned_items": "3" }"#,
    )
    .unwrap();
    let catalog = catalog();
    let model = CostModel::new(&rules, &catalog);

    let mut deck = Deck::new();
    deck.add_card(CardIdentity::item(1), &model).unwrap();
    deck.add_card(CardIdentity::item(1), &model).unwrap();
    assert_eq!(deck.total_cost(), 4);

    // third copy costs 1 + 2 * 2
    assert_eq!(
        deck.add_card(CardIdentity::item(1), &model).unwrap_err(),
        DeckError::OverBudget { cost: 9, budget: 7 }
    );
    assert_eq!(rules.max_deck_size, DeckRules::default().max_deck_size);
    assert!(model.is_banned(&CardIdentity::item(3)));
}

/// Drones price from the registry, unknown keys from the default.
#[test]
fn test_drone_pricing() {
    let rules = DeckRules::default().with_drone_costs(3, 5);
    let catalog = catalog();
    let model = CostModel::new(&rules, &catalog);

    assert_eq!(model.base_cost(&CardIdentity::drone("MegaDroneMaster")), 6);
    assert_eq!(model.base_cost(&CardIdentity::drone("ModdedDroneMaster")), 5);
}

fn card_strategy() -> impl Strategy<Value = CardIdentity> {
    prop_oneof![
        prop::sample::select(vec![1, 2, 3, 4, 5]).prop_map(CardIdentity::item),
        prop::sample::select(vec!["Drone1Master", "FlameDroneMaster", "Custom"])
            .prop_map(|key| CardIdentity::drone(key)),
    ]
}

proptest! {
    /// Two independent models over equal inputs price every copy the same.
    #[test]
    fn prop_cost_is_deterministic(card in card_strategy(), copy in 1u32..20, flat in 0i32..5, pct in 0i32..100) {
        let rules_a = DeckRules::default().with_stacking(flat, pct);
        let rules_b = rules_a.clone();
        let catalog_a = catalog();
        let catalog_b = catalog();
        let a = CostModel::new(&rules_a, &catalog_a);
        let b = CostModel::new(&rules_b, &catalog_b);

        prop_assert_eq!(a.card_cost(&card, copy), b.card_cost(&card, copy));
        prop_assert!(a.card_cost(&card, copy + 1) >= a.card_cost(&card, copy));
    }

    /// A locally built deck decodes to the same cards and total.
    #[test]
    fn prop_encode_decode_preserves_deck(cards in prop::collection::vec(card_strategy(), 0..12)) {
        let rules = DeckRules::default().with_budget(10_000).with_max_deck_size(12);
        let catalog = catalog();
        let model = CostModel::new(&rules, &catalog);

        let mut deck = Deck::new();
        for card in cards {
            deck.add_card(card, &model).unwrap();
        }

        let decoded = Deck::decode(&deck.encode()).unwrap();
        prop_assert_eq!(decoded.len(), deck.len());
        prop_assert_eq!(decoded.total_cost(), deck.total_cost());
        for (a, b) in decoded.cards().zip(deck.cards()) {
            prop_assert_eq!(a, b);
        }
    }

    /// The verdict ignores cached prices: recomputing with honest edits
    /// matches what local editing charged.
    #[test]
    fn prop_recompute_matches_local_total(cards in prop::collection::vec(card_strategy(), 1..10)) {
        let rules = DeckRules::default().with_budget(10_000).with_stacking(1, 25);
        let catalog = catalog();
        let model = CostModel::new(&rules, &catalog);

        let mut deck = Deck::new();
        for card in cards {
            deck.add_card(card, &model).unwrap();
        }

        prop_assert_eq!(recompute_total(&deck, &model), deck.total_cost());
    }
}
