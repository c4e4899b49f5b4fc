//! Carried items.

pub mod types;

pub use types::{Inventory, InventoryItem};
