//! Card pricing.
//!
//! Every price is an integer derived only from `(DeckRules, catalog)`, so a
//! client's optimistic total and the host's authoritative recomputation
//! agree whenever both hold the same rules and catalog snapshot.

use crate::core::DeckRules;

use super::catalog::{CatalogProvider, ItemTier};
use super::identity::{CardIdentity, EquipmentIndex, ItemIndex};

/// Price of anything the catalog cannot resolve. High enough that any deck
/// holding it fails the budget check.
pub const UNRESOLVED_COST: i32 = 999;

/// Fixed price per drone master key.
pub const DRONE_COSTS: &[(&str, i32)] = &[
    ("Drone1Master", 2),
    ("Drone2Master", 2),
    ("Turret1Master", 3),
    ("EquipmentDroneMaster", 3),
    ("EmergencyDroneMaster", 4),
    ("FlameDroneMaster", 4),
    ("MissileDroneMaster", 4),
    ("MegaDroneMaster", 6),
];

/// Registry price for a drone key, if it has one.
#[must_use]
pub fn drone_cost(key: &str) -> Option<i32> {
    DRONE_COSTS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, cost)| *cost)
}

/// Price of copy number `copy` (1-based) of a card whose base price is `base`.
///
/// `base + (copy - 1) * (stack_flat + base * stack_percent / 100)`, saturating.
/// Copies at or below 1 pay the base price.
///
/// ```
/// use duel_deck::cards::stack_cost;
/// use duel_deck::core::DeckRules;
///
/// let rules = DeckRules::default().with_stacking(1, 50);
/// assert_eq!(stack_cost(&rules, 4, 1), 4);
/// assert_eq!(stack_cost(&rules, 4, 2), 7);
/// assert_eq!(stack_cost(&rules, 4, 3), 10);
/// ```
#[must_use]
pub fn stack_cost(rules: &DeckRules, base: i32, copy: u32) -> i32 {
    if copy <= 1 {
        return base;
    }
    let extra_copies = i32::try_from(copy - 1).unwrap_or(i32::MAX);
    let percent = base.saturating_mul(rules.stack_percent) / 100;
    let per_copy = rules.stack_flat.saturating_add(percent).max(0);
    base.saturating_add(per_copy.saturating_mul(extra_copies))
}

/// Rules plus catalog: everything needed to price or ban-check a card.
#[derive(Clone, Copy)]
pub struct CostModel<'a> {
    rules: &'a DeckRules,
    catalog: &'a dyn CatalogProvider,
}

impl<'a> CostModel<'a> {
    #[must_use]
    pub fn new(rules: &'a DeckRules, catalog: &'a dyn CatalogProvider) -> Self {
        Self { rules, catalog }
    }

    #[must_use]
    pub fn rules(&self) -> &'a DeckRules {
        self.rules
    }

    #[must_use]
    pub fn catalog(&self) -> &'a dyn CatalogProvider {
        self.catalog
    }

    /// Unstacked price of one card.
    #[must_use]
    pub fn base_cost(&self, identity: &CardIdentity) -> i32 {
        match identity {
            CardIdentity::Item(index) => self.item_cost(*index),
            CardIdentity::Equipment(index) => self.equipment_cost(*index),
            CardIdentity::Drone(key) => drone_cost(key).unwrap_or(self.rules.default_drone_cost),
        }
    }

    /// Price of copy number `copy` of `identity`.
    #[must_use]
    pub fn card_cost(&self, identity: &CardIdentity, copy: u32) -> i32 {
        stack_cost(self.rules, self.base_cost(identity), copy)
    }

    #[must_use]
    pub fn stack_cost(&self, base: i32, copy: u32) -> i32 {
        stack_cost(self.rules, base, copy)
    }

    /// Whether the catalog knows this card. Drones always resolve; unknown
    /// drone keys fall back to the default drone price.
    #[must_use]
    pub fn resolves(&self, identity: &CardIdentity) -> bool {
        match identity {
            CardIdentity::Item(index) => self.catalog.tier_of(*index).is_some(),
            CardIdentity::Equipment(index) => self.catalog.is_lunar(*index).is_some(),
            CardIdentity::Drone(_) => true,
        }
    }

    /// Banned by the catalog or by the configured ban lists.
    #[must_use]
    pub fn is_banned(&self, identity: &CardIdentity) -> bool {
        let name = self.catalog.internal_name(identity);
        match identity {
            CardIdentity::Item(index) => {
                self.catalog.is_item_banned(*index)
                    || self.rules.banned_items.matches(index.raw(), name.as_deref())
            }
            CardIdentity::Equipment(index) => {
                self.catalog.is_equipment_banned(*index)
                    || self.rules.banned_equipment.matches(index.raw(), name.as_deref())
            }
            CardIdentity::Drone(_) => false,
        }
    }

    /// Display name, falling back to the identity itself.
    #[must_use]
    pub fn display_name(&self, identity: &CardIdentity) -> String {
        self.catalog
            .display_name(identity)
            .unwrap_or_else(|| identity.to_string())
    }

    fn item_cost(&self, index: ItemIndex) -> i32 {
        if self.catalog.is_drone_item(index) {
            return self.rules.drone_item_cost;
        }
        self.catalog
            .tier_of(index)
            .and_then(|tier| self.rules.tier_costs.get(tier))
            .unwrap_or(UNRESOLVED_COST)
    }

    fn equipment_cost(&self, index: EquipmentIndex) -> i32 {
        match self.catalog.is_lunar(index) {
            Some(true) => self.rules.lunar_equipment_cost,
            Some(false) => self.rules.equipment_cost,
            None => UNRESOLVED_COST,
        }
    }
}

impl std::fmt::Debug for CostModel<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CostModel").field("rules", self.rules).finish_non_exhaustive()
    }
}
