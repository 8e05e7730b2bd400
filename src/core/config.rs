//! Deck building rules.
//!
//! `DeckRules` is the configuration half of the capability pair passed into
//! cost and validation calls (the other half is a
//! [`CatalogProvider`](crate::cards::CatalogProvider)). Nothing in the crate
//! reads rules from global state, so client and host agree exactly when
//! they hold the same `DeckRules` value.
//!
//! Rules can be built in code, loaded from a JSON file, or received from the
//! host as a `RulesSync` message (bincode).

use rustc_hash::FxHashSet;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::cards::ItemTier;
use crate::error::CodecError;

/// Base cost per item tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierCosts {
    pub tier1: i32,
    pub tier2: i32,
    pub tier3: i32,
    pub boss: i32,
    pub lunar: i32,
    pub void_tier1: i32,
    pub void_tier2: i32,
    pub void_tier3: i32,
    pub void_boss: i32,
}

impl Default for TierCosts {
    fn default() -> Self {
        Self {
            tier1: 1,
            tier2: 3,
            tier3: 6,
            boss: 5,
            lunar: 4,
            void_tier1: 2,
            void_tier2: 4,
            void_tier3: 7,
            void_boss: 6,
        }
    }
}

impl TierCosts {
    /// Configured cost for `tier`. Untiered items have no cost entry.
    #[must_use]
    pub fn get(&self, tier: ItemTier) -> Option<i32> {
        match tier {
            ItemTier::Tier1 => Some(self.tier1),
            ItemTier::Tier2 => Some(self.tier2),
            ItemTier::Tier3 => Some(self.tier3),
            ItemTier::Boss => Some(self.boss),
            ItemTier::Lunar => Some(self.lunar),
            ItemTier::VoidTier1 => Some(self.void_tier1),
            ItemTier::VoidTier2 => Some(self.void_tier2),
            ItemTier::VoidTier3 => Some(self.void_tier3),
            ItemTier::VoidBoss => Some(self.void_boss),
            ItemTier::NoTier => None,
        }
    }
}

/// A parsed comma-separated ban list.
///
/// Entries are matched case-insensitively against a catalog index (written
/// in decimal) or a catalog internal name. Serializes back to a sorted,
/// comma-joined string so configuration files keep their flat format.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BanList {
    entries: FxHashSet<String>,
}

impl BanList {
    /// Parse `"Behemoth, 42,  ,Clover"` into three entries.
    #[must_use]
    pub fn parse(list: &str) -> Self {
        let entries = list
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_ascii_lowercase)
            .collect();
        Self { entries }
    }

    /// Does this list ban the entry with catalog `index` / internal `name`?
    #[must_use]
    pub fn matches(&self, index: i32, name: Option<&str>) -> bool {
        if self.entries.is_empty() {
            return false;
        }
        if self.entries.contains(&index.to_string()) {
            return true;
        }
        name.is_some_and(|name| self.entries.contains(&name.to_ascii_lowercase()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn joined(&self) -> String {
        let mut sorted: Vec<&str> = self.entries.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        sorted.join(",")
    }
}

impl Serialize for BanList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.joined())
    }
}

impl<'de> Deserialize<'de> for BanList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Complete deck building configuration.
///
/// ## Example
///
/// ```
/// use duel_deck::core::DeckRules;
///
/// let rules = DeckRules::default()
///     .with_budget(12)
///     .with_max_deck_size(6)
///     .with_banned_items("42, Behemoth");
///
/// assert_eq!(rules.budget, 12);
/// assert_eq!(rules.banned_items.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckRules {
    /// Most cards a deck may hold (the equipment slot is not counted).
    pub max_deck_size: usize,

    /// Point budget for cards plus equipment.
    pub budget: i32,

    /// Base cost per item tier.
    pub tier_costs: TierCosts,

    /// Flat surcharge added for every copy after the first.
    pub stack_flat: i32,

    /// Additional per-copy surcharge as a percentage of the base cost.
    pub stack_percent: i32,

    /// Whether the equipment slot may be used at all.
    pub allow_equipment: bool,

    pub equipment_cost: i32,
    pub lunar_equipment_cost: i32,

    /// Cost of items the catalog tags as drone items.
    pub drone_item_cost: i32,

    /// Cost of drone types missing from the drone registry.
    pub default_drone_cost: i32,

    pub banned_items: BanList,
    pub banned_equipment: BanList,
}

impl Default for DeckRules {
    fn default() -> Self {
        Self {
            max_deck_size: 10,
            budget: 20,
            tier_costs: TierCosts::default(),
            stack_flat: 1,
            stack_percent: 0,
            allow_equipment: true,
            equipment_cost: 3,
            lunar_equipment_cost: 2,
            drone_item_cost: 3,
            default_drone_cost: 3,
            banned_items: BanList::default(),
            banned_equipment: BanList::default(),
        }
    }
}

impl DeckRules {
    /// Load rules from a JSON document. Missing keys take their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Encode for a `RulesSync` message.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        bincode::serialize(self).map_err(|err| CodecError::Rules(err.to_string()))
    }

    /// Decode a `RulesSync` payload.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        bincode::deserialize(bytes).map_err(|err| CodecError::Rules(err.to_string()))
    }

    #[must_use]
    pub fn with_budget(mut self, budget: i32) -> Self {
        self.budget = budget;
        self
    }

    #[must_use]
    pub fn with_max_deck_size(mut self, max: usize) -> Self {
        self.max_deck_size = max;
        self
    }

    #[must_use]
    pub fn with_tier_costs(mut self, costs: TierCosts) -> Self {
        self.tier_costs = costs;
        self
    }

    /// Set the stacking surcharge parameters.
    #[must_use]
    pub fn with_stacking(mut self, flat: i32, percent: i32) -> Self {
        self.stack_flat = flat;
        self.stack_percent = percent;
        self
    }

    #[must_use]
    pub fn with_equipment_allowed(mut self, allowed: bool) -> Self {
        self.allow_equipment = allowed;
        self
    }

    /// Set the standard and lunar equipment costs.
    #[must_use]
    pub fn with_equipment_costs(mut self, standard: i32, lunar: i32) -> Self {
        self.equipment_cost = standard;
        self.lunar_equipment_cost = lunar;
        self
    }

    #[must_use]
    pub fn with_drone_costs(mut self, drone_item: i32, default_drone: i32) -> Self {
        self.drone_item_cost = drone_item;
        self.default_drone_cost = default_drone;
        self
    }

    /// Replace the item ban list with a comma-separated list.
    #[must_use]
    pub fn with_banned_items(mut self, list: &str) -> Self {
        self.banned_items = BanList::parse(list);
        self
    }

    /// Replace the equipment ban list with a comma-separated list.
    #[must_use]
    pub fn with_banned_equipment(mut self, list: &str) -> Self {
        self.banned_equipment = BanList::parse(list);
        self
    }
}
