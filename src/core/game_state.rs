use std::collections::BTreeMap;

use crate::character::stats::Stats;
use crate::combat::skills::{sanitize_skill_name, skills_for, Skill, SkillId};
use crate::items::types::Inventory;
use crate::quests::types::{Coord, NpcTable};

/// Everything the overworld loop owns. Combat and quest calls borrow it for
/// the duration of one call.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub stats: Stats,
    pub inventory: Inventory,
    pub position: Coord,
    pub npcs: NpcTable,
    /// Custom skill display names by skill identity
    pub skill_names: BTreeMap<SkillId, String>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// A fresh game at the origin with the starter sword in hand.
    pub fn new() -> Self {
        let inventory = Inventory::starting();
        let mut stats = Stats::new();
        stats.wielded_item_index = Some(0);
        Self {
            stats,
            inventory,
            position: Coord::ORIGIN,
            npcs: NpcTable::starting(),
            skill_names: BTreeMap::new(),
        }
    }

    /// Current skill list, derived from the class path.
    pub fn skills(&self) -> Vec<Skill> {
        skills_for(self.stats.class_path, &self.skill_names)
    }

    pub fn weapon_damage(&self) -> u32 {
        self.inventory.weapon_damage(&self.stats)
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.position = self.position.offset(dx, dy);
    }

    /// Sends the player back to the start after a defeat.
    pub fn respawn(&mut self) {
        self.position = Coord::ORIGIN;
    }

    /// Renames a skill the player currently has. Returns false for blank
    /// names or skills outside the current class.
    pub fn rename_skill(&mut self, id: SkillId, name: &str) -> bool {
        if !self.skills().iter().any(|s| s.id == id) {
            return false;
        }
        match sanitize_skill_name(name) {
            Some(name) => {
                self.skill_names.insert(id, name);
                true
            }
            None => false,
        }
    }

    pub fn toggle_wield(&mut self, index: usize) {
        self.inventory.toggle_wield(&mut self.stats, index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::stats::ClassPath;

    #[test]
    fn test_new_game_starts_at_origin_with_sword() {
        let state = GameState::new();
        assert_eq!(state.position, Coord::ORIGIN);
        assert_eq!(state.inventory.len(), 1);
        assert_eq!(state.weapon_damage(), 3);
        assert!(state.skills().is_empty());
    }

    #[test]
    fn test_move_and_respawn() {
        let mut state = GameState::new();
        state.move_by(3, -2);
        assert_eq!(state.position, Coord::new(3, -2));
        state.respawn();
        assert_eq!(state.position, Coord::ORIGIN);
    }

    #[test]
    fn test_rename_skill_requires_owned_skill() {
        let mut state = GameState::new();
        assert!(!state.rename_skill(SkillId::Fireball, "Blaze"));

        state.stats.class_path = Some(ClassPath::Mage);
        assert!(state.rename_skill(SkillId::Fireball, "Blaze"));
        assert!(!state.rename_skill(SkillId::Fireball, "  "));
        assert_eq!(state.skills()[0].display_name, "Blaze");
        assert_eq!(state.skills()[0].id, SkillId::Fireball);
    }
}
