use serde::{Deserialize, Serialize};

use crate::character::stats::Stats;

/// A carried item. Combat only reads `damage`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub name: String,
    pub damage: u32,
    pub dexterity: u32,
    pub crit: u32,
    /// Mana cost reduction
    pub mana: u32,
}

impl InventoryItem {
    pub fn new(name: &str, damage: u32, dexterity: u32, crit: u32, mana: u32) -> Self {
        Self {
            name: name.to_string(),
            damage,
            dexterity,
            crit,
            mana,
        }
    }

    pub fn rusty_sword() -> Self {
        Self::new("Rusty Sword", 3, 0, 1, 0)
    }
}

/// Ordered item collection. `Stats::wielded_item_index` points into it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub items: Vec<InventoryItem>,
}

impl Inventory {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn starting() -> Self {
        Self {
            items: vec![InventoryItem::rusty_sword()],
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&InventoryItem> {
        self.items.get(index)
    }

    pub fn push(&mut self, item: InventoryItem) {
        self.items.push(item);
    }

    /// Damage of the wielded item, or 0 when nothing (or a stale index) is wielded.
    pub fn weapon_damage(&self, stats: &Stats) -> u32 {
        stats
            .wielded_item_index
            .and_then(|i| self.get(i))
            .map(|item| item.damage)
            .unwrap_or(0)
    }

    /// Wields `index`, or unwields it if it is already wielded.
    /// Out-of-range indices are ignored.
    pub fn toggle_wield(&self, stats: &mut Stats, index: usize) {
        if index >= self.items.len() {
            return;
        }
        if stats.wielded_item_index == Some(index) {
            stats.wielded_item_index = None;
        } else {
            stats.wielded_item_index = Some(index);
        }
    }
}
