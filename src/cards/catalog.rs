//! Catalog access.
//!
//! The game's item, equipment and drone registries live outside this crate.
//! Cost and validation code sees them only through [`CatalogProvider`],
//! which must stay stable for the duration of a single validation call.
//!
//! [`StaticCatalog`] is an in-memory provider for hosts that snapshot the
//! game catalog up front, and for tests.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::identity::{CardIdentity, EquipmentIndex, ItemIndex};

/// Item rarity tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemTier {
    Tier1,
    Tier2,
    Tier3,
    Boss,
    Lunar,
    VoidTier1,
    VoidTier2,
    VoidTier3,
    VoidBoss,
    NoTier,
}

/// Read-only view of the game catalog.
///
/// `None` from a lookup means the catalog cannot resolve the index; callers
/// treat that as invalid rather than free.
pub trait CatalogProvider {
    /// Tier of an item.
    fn tier_of(&self, item: ItemIndex) -> Option<ItemTier>;

    /// Whether the item is a drone item (priced separately from its tier).
    fn is_drone_item(&self, item: ItemIndex) -> bool;

    /// Whether the equipment is lunar.
    fn is_lunar(&self, equipment: EquipmentIndex) -> Option<bool>;

    /// Ban status the catalog itself carries (disabled content).
    fn is_item_banned(&self, item: ItemIndex) -> bool;

    fn is_equipment_banned(&self, equipment: EquipmentIndex) -> bool;

    /// Stable internal name, used to match configured ban lists.
    fn internal_name(&self, identity: &CardIdentity) -> Option<String>;

    /// Player-facing name.
    fn display_name(&self, identity: &CardIdentity) -> Option<String>;
}

/// Item record in a [`StaticCatalog`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemEntry {
    pub internal_name: String,
    pub display_name: String,
    pub tier: ItemTier,
    pub drone: bool,
    pub banned: bool,
}

impl ItemEntry {
    /// Create an entry whose display name equals its internal name.
    #[must_use]
    pub fn new(name: impl Into<String>, tier: ItemTier) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            internal_name: name,
            tier,
            drone: false,
            banned: false,
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Tag as a drone item.
    #[must_use]
    pub fn drone(mut self) -> Self {
        self.drone = true;
        self
    }

    #[must_use]
    pub fn banned(mut self) -> Self {
        self.banned = true;
        self
    }
}

/// Equipment record in a [`StaticCatalog`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentEntry {
    pub internal_name: String,
    pub display_name: String,
    pub lunar: bool,
    pub banned: bool,
}

impl EquipmentEntry {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            internal_name: name,
            lunar: false,
            banned: false,
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    #[must_use]
    pub fn lunar(mut self) -> Self {
        self.lunar = true;
        self
    }

    #[must_use]
    pub fn banned(mut self) -> Self {
        self.banned = true;
        self
    }
}

/// In-memory catalog snapshot.
///
/// ## Example
///
/// ```
/// use duel_deck::cards::{CatalogProvider, CardIdentity, ItemEntry, ItemIndex, ItemTier, StaticCatalog};
///
/// let catalog = StaticCatalog::new()
///     .with_item(4, ItemEntry::new("Syringe", ItemTier::Tier1).with_display_name("Soldier's Syringe"));
///
/// assert_eq!(catalog.tier_of(ItemIndex::new(4)), Some(ItemTier::Tier1));
/// assert_eq!(
///     catalog.display_name(&CardIdentity::item(4)).as_deref(),
///     Some("Soldier's Syringe"),
/// );
/// ```
#[derive(Clone, Debug, Default)]
pub struct StaticCatalog {
    items: FxHashMap<ItemIndex, ItemEntry>,
    equipment: FxHashMap<EquipmentIndex, EquipmentEntry>,
    drone_names: FxHashMap<String, String>,
}

impl StaticCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an item.
    ///
    /// Panics if the index is already registered.
    pub fn register_item(&mut self, index: i32, entry: ItemEntry) {
        let index = ItemIndex::new(index);
        if self.items.contains_key(&index) {
            panic!("{} already registered", index);
        }
        self.items.insert(index, entry);
    }

    /// Register an equipment.
    ///
    /// Panics if the index is already registered.
    pub fn register_equipment(&mut self, index: i32, entry: EquipmentEntry) {
        let index = EquipmentIndex::new(index);
        if self.equipment.contains_key(&index) {
            panic!("{} already registered", index);
        }
        self.equipment.insert(index, entry);
    }

    /// Give a drone master key a display name.
    pub fn name_drone(&mut self, key: impl Into<String>, display_name: impl Into<String>) {
        self.drone_names.insert(key.into(), display_name.into());
    }

    #[must_use]
    pub fn with_item(mut self, index: i32, entry: ItemEntry) -> Self {
        self.register_item(index, entry);
        self
    }

    #[must_use]
    pub fn with_equipment(mut self, index: i32, entry: EquipmentEntry) -> Self {
        self.register_equipment(index, entry);
        self
    }

    #[must_use]
    pub fn with_drone(mut self, key: impl Into<String>, display_name: impl Into<String>) -> Self {
        self.name_drone(key, display_name);
        self
    }

    #[must_use]
    pub fn item(&self, index: ItemIndex) -> Option<&ItemEntry> {
        self.items.get(&index)
    }

    #[must_use]
    pub fn equipment(&self, index: EquipmentIndex) -> Option<&EquipmentEntry> {
        self.equipment.get(&index)
    }

    /// Number of registered items and equipment.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len() + self.equipment.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.equipment.is_empty()
    }

    /// Items matching a predicate, for builder UIs listing a tier.
    pub fn find_items<F>(&self, predicate: F) -> impl Iterator<Item = (ItemIndex, &ItemEntry)>
    where
        F: Fn(&ItemEntry) -> bool,
    {
        self.items
            .iter()
            .filter(move |(_, entry)| predicate(entry))
            .map(|(index, entry)| (*index, entry))
    }
}

impl CatalogProvider for StaticCatalog {
    fn tier_of(&self, item: ItemIndex) -> Option<ItemTier> {
        self.items.get(&item).map(|entry| entry.tier)
    }

    fn is_drone_item(&self, item: ItemIndex) -> bool {
        self.items.get(&item).is_some_and(|entry| entry.drone)
    }

    fn is_lunar(&self, equipment: EquipmentIndex) -> Option<bool> {
        self.equipment.get(&equipment).map(|entry| entry.lunar)
    }

    fn is_item_banned(&self, item: ItemIndex) -> bool {
        self.items.get(&item).is_some_and(|entry| entry.banned)
    }

    fn is_equipment_banned(&self, equipment: EquipmentIndex) -> bool {
        self.equipment.get(&equipment).is_some_and(|entry| entry.banned)
    }

    fn internal_name(&self, identity: &CardIdentity) -> Option<String> {
        match identity {
            CardIdentity::Item(index) => self.items.get(index).map(|e| e.internal_name.clone()),
            CardIdentity::Equipment(index) => {
                self.equipment.get(index).map(|e| e.internal_name.clone())
            }
            CardIdentity::Drone(key) => Some(key.clone()),
        }
    }

    fn display_name(&self, identity: &CardIdentity) -> Option<String> {
        match identity {
            CardIdentity::Item(index) => self.items.get(index).map(|e| e.display_name.clone()),
            CardIdentity::Equipment(index) => {
                self.equipment.get(index).map(|e| e.display_name.clone())
            }
            CardIdentity::Drone(key) => self.drone_names.get(key).cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> StaticCatalog {
        StaticCatalog::new()
            .with_item(1, ItemEntry::new("Hoof", ItemTier::Tier1).with_display_name("Paul's Goat Hoof"))
            .with_item(2, ItemEntry::new("DroneBackup", ItemTier::Tier3).drone())
            .with_item(3, ItemEntry::new("Disabled", ItemTier::Tier2).banned())
            .with_equipment(0, EquipmentEntry::new("Meteor").lunar())
            .with_equipment(1, EquipmentEntry::new("Fruit"))
            .with_drone("Drone1Master", "Gunner Drone")
    }

    #[test]
    fn test_lookups() {
        let catalog = catalog();

        assert_eq!(catalog.tier_of(ItemIndex::new(1)), Some(ItemTier::Tier1));
        assert_eq!(catalog.tier_of(ItemIndex::new(99)), None);
        assert!(catalog.is_drone_item(ItemIndex::new(2)));
        assert!(!catalog.is_drone_item(ItemIndex::new(99)));
        assert_eq!(catalog.is_lunar(EquipmentIndex::new(0)), Some(true));
        assert_eq!(catalog.is_lunar(EquipmentIndex::new(1)), Some(false));
        assert_eq!(catalog.is_lunar(EquipmentIndex::new(5)), None);
        assert!(catalog.is_item_banned(ItemIndex::new(3)));
        assert!(!catalog.is_equipment_banned(EquipmentIndex::new(1)));
        assert_eq!(catalog.len(), 5);
    }

    #[test]
    fn test_names() {
        let catalog = catalog();

        assert_eq!(
            catalog.display_name(&CardIdentity::item(1)).as_deref(),
            Some("Paul's Goat Hoof")
        );
        assert_eq!(catalog.internal_name(&CardIdentity::item(1)).as_deref(), Some("Hoof"));
        assert_eq!(
            catalog.display_name(&CardIdentity::drone("Drone1Master")).as_deref(),
            Some("Gunner Drone")
        );
        assert_eq!(catalog.display_name(&CardIdentity::drone("Unknown")), None);
        assert_eq!(catalog.display_name(&CardIdentity::equipment(9)), None);
    }

    #[test]
    fn test_find_items() {
        let catalog = catalog();
        let drones: Vec<_> = catalog.find_items(|e| e.drone).collect();
        assert_eq!(drones.len(), 1);
        assert_eq!(drones[0].0, ItemIndex::new(2));
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_item_panics() {
        let mut catalog = StaticCatalog::new();
        catalog.register_item(1, ItemEntry::new("A", ItemTier::Tier1));
        catalog.register_item(1, ItemEntry::new("B", ItemTier::Tier1));
    }
}
