//! Player stats, class paths and skill-point upgrades.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::constants::*;

/// A permanent character specialization chosen through a class quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassPath {
    Swordsman,
    Mage,
    Cleric,
}

impl ClassPath {
    pub fn all() -> [ClassPath; 3] {
        [ClassPath::Swordsman, ClassPath::Mage, ClassPath::Cleric]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ClassPath::Swordsman => "Swordsman",
            ClassPath::Mage => "Mage",
            ClassPath::Cleric => "Cleric",
        }
    }
}

impl fmt::Display for ClassPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The single mutable stat record owned by the player session.
///
/// `current_mana` never exceeds `mana`, and `xp` stays below `level * 10`
/// outside of a level-up pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    /// Maximum mana
    pub mana: u32,
    pub current_mana: u32,
    pub skill_points: u32,
    pub xp: u32,
    pub level: u32,
    pub gold: u32,
    /// Index into the inventory, never an ownership relation
    #[serde(default, alias = "wielded_index")]
    pub wielded_item_index: Option<usize>,
    /// Older saves predate classes, so a missing field means no class
    #[serde(default)]
    pub class_path: Option<ClassPath>,
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

impl Stats {
    /// Starting stats for a new game.
    pub fn new() -> Self {
        Self {
            hp: START_HP,
            attack: START_ATTACK,
            defense: START_DEFENSE,
            speed: START_SPEED,
            mana: START_MANA,
            current_mana: START_MANA,
            skill_points: 0,
            xp: 0,
            level: 1,
            gold: START_GOLD,
            wielded_item_index: None,
            class_path: None,
        }
    }

    /// XP needed to leave the current level.
    pub fn xp_threshold(&self) -> u32 {
        self.level * XP_PER_LEVEL
    }

    pub fn restore_mana(&mut self) {
        self.current_mana = self.mana;
    }

    pub fn regen_mana(&mut self, amount: u32) {
        self.current_mana = (self.current_mana + amount).min(self.mana);
    }

    /// Spends one skill point on `kind`. Returns false with no points left.
    pub fn upgrade(&mut self, kind: StatKind) -> bool {
        if self.skill_points == 0 {
            return false;
        }
        match kind {
            StatKind::Hp => self.hp += UPGRADE_HP,
            StatKind::Attack => self.attack += UPGRADE_ATTACK,
            StatKind::Defense => self.defense += UPGRADE_DEFENSE,
            StatKind::Speed => self.speed += UPGRADE_SPEED,
            StatKind::Mana => self.mana += UPGRADE_MANA,
        }
        self.skill_points -= 1;
        true
    }
}

/// Stats that can be raised with skill points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    Hp,
    Attack,
    Defense,
    Speed,
    Mana,
}

impl StatKind {
    pub fn all() -> [StatKind; 5] {
        [
            StatKind::Hp,
            StatKind::Attack,
            StatKind::Defense,
            StatKind::Speed,
            StatKind::Mana,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatKind::Hp => "HP",
            StatKind::Attack => "Attack",
            StatKind::Defense => "Defense",
            StatKind::Speed => "Speed",
            StatKind::Mana => "Mana",
        }
    }

    pub fn value(&self, stats: &Stats) -> u32 {
        match self {
            StatKind::Hp => stats.hp,
            StatKind::Attack => stats.attack,
            StatKind::Defense => stats.defense,
            StatKind::Speed => stats.speed,
            StatKind::Mana => stats.mana,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats_match_starting_values() {
        let stats = Stats::new();
        assert_eq!(stats.hp, 20);
        assert_eq!(stats.attack, 5);
        assert_eq!(stats.defense, 1);
        assert_eq!(stats.mana, 10);
        assert_eq!(stats.current_mana, 10);
        assert_eq!(stats.level, 1);
        assert_eq!(stats.gold, 1);
        assert!(stats.class_path.is_none());
    }

    #[test]
    fn test_upgrade_spends_one_point() {
        let mut stats = Stats::new();
        stats.skill_points = 2;

        assert!(stats.upgrade(StatKind::Hp));
        assert_eq!(stats.hp, 22);
        assert!(stats.upgrade(StatKind::Mana));
        assert_eq!(stats.mana, 12);
        assert_eq!(stats.skill_points, 0);
    }

    #[test]
    fn test_upgrade_without_points_is_refused() {
        let mut stats = Stats::new();
        assert!(!stats.upgrade(StatKind::Attack));
        assert_eq!(stats.attack, 5);
    }

    #[test]
    fn test_regen_mana_caps_at_max() {
        let mut stats = Stats::new();
        stats.current_mana = 9;
        stats.regen_mana(5);
        assert_eq!(stats.current_mana, 10);
    }

    #[test]
    fn test_missing_class_path_defaults_to_none() {
        let json = r#"{"hp":20,"attack":5,"defense":1,"speed":2,"mana":10,
            "current_mana":10,"skill_points":0,"xp":3,"level":1,"gold":1,
            "wielded_index":0}"#;
        let stats: Stats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.class_path, None);
        assert_eq!(stats.wielded_item_index, Some(0));
        assert_eq!(stats.xp, 3);
    }
}
