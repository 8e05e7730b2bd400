//! Cards: identities, catalog access and pricing.
//!
//! ## Key Types
//!
//! - `CardIdentity`: what a card is (item / equipment index, drone key)
//! - `CatalogProvider`: read-only view of the game catalog
//! - `StaticCatalog`: in-memory catalog snapshot
//! - `CostModel`: base and stacked prices from rules + catalog

pub mod catalog;
pub mod cost;
pub mod identity;

pub use catalog::{CatalogProvider, EquipmentEntry, ItemEntry, ItemTier, StaticCatalog};
pub use cost::{drone_cost, stack_cost, CostModel, DRONE_COSTS, UNRESOLVED_COST};
pub use identity::{CardIdentity, CardKind, EquipmentIndex, ItemIndex};
