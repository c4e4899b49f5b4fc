//! Class skills. Skills are rebuilt from the class path whenever they are
//! needed; only their display names are persisted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::character::stats::ClassPath;
use crate::core::constants::MAX_SKILL_NAME_LEN;

/// Canonical skill identity. Display names can change, this cannot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SkillId {
    PowerStrike,
    QuickJab,
    Fireball,
    ArcaneBolt,
    Heal,
    Purify,
}

impl SkillId {
    pub fn name(&self) -> &'static str {
        match self {
            SkillId::PowerStrike => "Power Strike",
            SkillId::QuickJab => "Quick Jab",
            SkillId::Fireball => "Fireball",
            SkillId::ArcaneBolt => "Arcane Bolt",
            SkillId::Heal => "Heal",
            SkillId::Purify => "Purify",
        }
    }
}

/// What a skill does when it resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillEffect {
    /// Empowers the next plain attack
    DamageBuff,
    /// Lowers the monster's defense
    DefenseDebuff,
    /// Heals the caster
    HpBuff,
    /// Immediate damage, bonus picked by skill identity
    Direct,
    /// No declared effect; resolves like `Direct`
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillType {
    Active,
    Passive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillRank {
    S,
    A,
    B,
    C,
    D,
}

impl SkillRank {
    pub fn label(&self) -> &'static str {
        match self {
            SkillRank::S => "S",
            SkillRank::A => "A",
            SkillRank::B => "B",
            SkillRank::C => "C",
            SkillRank::D => "D",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Skill {
    pub id: SkillId,
    pub display_name: String,
    pub description: &'static str,
    pub skill_type: SkillType,
    pub mana_cost: u32,
    pub stamina_cost: u32,
    /// Turns before the skill can be used again
    pub cooldown: u32,
    pub required_class: Option<ClassPath>,
    pub rank: SkillRank,
    pub passive: bool,
    pub level_required: u32,
    pub effect: SkillEffect,
    pub duration: u32,
    pub power: Option<f64>,
}

impl Skill {
    #[allow(clippy::too_many_arguments)]
    fn active(
        id: SkillId,
        description: &'static str,
        class: ClassPath,
        rank: SkillRank,
        mana_cost: u32,
        stamina_cost: u32,
        cooldown: u32,
        effect: SkillEffect,
        duration: u32,
        power: Option<f64>,
    ) -> Self {
        Self {
            id,
            display_name: id.name().to_string(),
            description,
            skill_type: SkillType::Active,
            mana_cost,
            stamina_cost,
            cooldown,
            required_class: Some(class),
            rank,
            passive: false,
            level_required: 1,
            effect,
            duration,
            power,
        }
    }
}

fn class_skills(class: ClassPath) -> Vec<Skill> {
    use SkillEffect::{DamageBuff, DefenseDebuff, Direct, HpBuff};
    match class {
        ClassPath::Swordsman => vec![
            Skill::active(
                SkillId::PowerStrike,
                "Empowers your next attack to do 2.5x the damage.",
                class,
                SkillRank::C,
                0,
                3,
                5,
                DamageBuff,
                1,
                Some(2.5),
            ),
            Skill::active(
                SkillId::QuickJab,
                "A fast, weak jab that drops the opponent's defense.",
                class,
                SkillRank::D,
                0,
                2,
                3,
                DefenseDebuff,
                2,
                Some(0.8),
            ),
        ],
        ClassPath::Mage => vec![
            Skill::active(
                SkillId::Fireball,
                "A ball of fire.",
                class,
                SkillRank::C,
                8,
                1,
                7,
                Direct,
                2,
                Some(1.5),
            ),
            Skill::active(
                SkillId::ArcaneBolt,
                "A bolt of arcane energy.",
                class,
                SkillRank::D,
                4,
                1,
                6,
                Direct,
                1,
                Some(1.6),
            ),
        ],
        ClassPath::Cleric => vec![
            Skill::active(
                SkillId::Heal,
                "A pulse of holy light heals allies.",
                class,
                SkillRank::C,
                10,
                1,
                2,
                HpBuff,
                1,
                None,
            ),
            Skill::active(
                SkillId::Purify,
                "A pulse of holy light weakens enemies.",
                class,
                SkillRank::D,
                8,
                1,
                5,
                DamageBuff,
                1,
                Some(1.2),
            ),
        ],
    }
}

/// Skill list for a class path with custom display names applied.
/// No class means no skills.
pub fn skills_for(class: Option<ClassPath>, names: &BTreeMap<SkillId, String>) -> Vec<Skill> {
    let Some(class) = class else {
        return Vec::new();
    };
    class_skills(class)
        .into_iter()
        .map(|mut skill| {
            if let Some(name) = names.get(&skill.id) {
                skill.display_name = name.clone();
            }
            skill
        })
        .collect()
}

/// Cleans up a requested display name. Returns None for blank input.
pub fn sanitize_skill_name(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_SKILL_NAME_LEN).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_class_has_no_skills() {
        assert!(skills_for(None, &BTreeMap::new()).is_empty());
    }

    #[test]
    fn test_every_class_has_two_skills_for_its_class() {
        for class in ClassPath::all() {
            let skills = skills_for(Some(class), &BTreeMap::new());
            assert_eq!(skills.len(), 2);
            assert!(skills.iter().all(|s| s.required_class == Some(class)));
            assert!(skills.iter().all(|s| s.display_name == s.id.name()));
        }
    }

    #[test]
    fn test_fireball_definition() {
        let skills = skills_for(Some(ClassPath::Mage), &BTreeMap::new());
        let fireball = &skills[0];
        assert_eq!(fireball.id, SkillId::Fireball);
        assert_eq!(fireball.mana_cost, 8);
        assert_eq!(fireball.cooldown, 7);
        assert_eq!(fireball.effect, SkillEffect::Direct);
    }

    #[test]
    fn test_heal_has_no_fixed_power() {
        let skills = skills_for(Some(ClassPath::Cleric), &BTreeMap::new());
        let heal = &skills[0];
        assert_eq!(heal.id, SkillId::Heal);
        assert_eq!(heal.effect, SkillEffect::HpBuff);
        assert_eq!(heal.power, None);
    }

    #[test]
    fn test_rename_keeps_identity() {
        let mut names = BTreeMap::new();
        names.insert(SkillId::PowerStrike, "Big Swing".to_string());
        let skills = skills_for(Some(ClassPath::Swordsman), &names);

        assert_eq!(skills[0].id, SkillId::PowerStrike);
        assert_eq!(skills[0].display_name, "Big Swing");
        assert_eq!(skills[1].display_name, "Quick Jab");
    }

    #[test]
    fn test_sanitize_skill_name() {
        assert_eq!(sanitize_skill_name("   "), None);
        assert_eq!(sanitize_skill_name(" Zap "), Some("Zap".to_string()));
        let long = "a".repeat(40);
        assert_eq!(sanitize_skill_name(&long).map(|s| s.len()), Some(20));
    }
}
