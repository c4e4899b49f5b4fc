//! Skill effect resolution and plain attacks.
//!
//! Costs are charged by the combat engine before anything here runs; the
//! resolver only turns an effect into an [`Outcome`] and mutates the monster
//! or the pending empower state.

use super::skills::{Skill, SkillEffect, SkillId};
use super::types::Monster;
use crate::character::stats::Stats;
use crate::core::constants::*;

/// What a resolved action did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// Damage dealt to the monster
    Damage(u32),
    /// HP restored to the player
    Heal(u32),
    /// Nothing numeric happened (buffs, debuffs)
    MessageOnly,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EffectReport {
    pub outcome: Outcome,
    pub message: String,
}

impl EffectReport {
    fn new(outcome: Outcome, message: String) -> Self {
        Self { outcome, message }
    }
}

/// One-shot multiplier for the next plain attack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Empower {
    pub multiplier: f64,
    pub turns: u32,
}

impl Default for Empower {
    fn default() -> Self {
        Self::neutral()
    }
}

impl Empower {
    pub fn neutral() -> Self {
        Self {
            multiplier: 1.0,
            turns: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.turns > 0
    }

    pub fn arm(&mut self, multiplier: f64) {
        self.multiplier = multiplier;
        self.turns = 1;
    }

    /// Returns the multiplier to apply and resets to neutral.
    pub fn consume(&mut self) -> Option<f64> {
        if !self.is_active() {
            return None;
        }
        let multiplier = self.multiplier;
        *self = Self::neutral();
        Some(multiplier)
    }
}

/// `attack + bonus - defense`, never below 1.
pub fn base_damage(attack: u32, bonus: u32, defense: u32) -> u32 {
    (attack + bonus).saturating_sub(defense).max(1)
}

/// Plain weapon attack. Consumes a pending empower if there is one.
pub fn plain_attack(
    stats: &Stats,
    weapon_damage: u32,
    monster: &Monster,
    empower: &mut Empower,
) -> (u32, bool) {
    let base = base_damage(stats.attack, weapon_damage, monster.defense);
    match empower.consume() {
        Some(multiplier) => (((base as f64) * multiplier).floor().max(1.0) as u32, true),
        None => (base, false),
    }
}

fn direct_bonus(id: SkillId) -> u32 {
    match id {
        SkillId::Fireball => FIREBALL_BONUS,
        SkillId::ArcaneBolt => ARCANE_BOLT_BONUS,
        _ => GENERIC_SKILL_BONUS,
    }
}

fn direct_message(skill: &Skill, damage: u32) -> String {
    match skill.id {
        SkillId::Fireball => format!("You cast {} for {} damage!", skill.display_name, damage),
        SkillId::ArcaneBolt => format!("You fire an {} for {} damage!", skill.display_name, damage),
        _ => format!("You use {} for {} damage!", skill.display_name, damage),
    }
}

/// Applies a skill's effect. The caller has already verified and charged it.
pub fn resolve(
    skill: &Skill,
    stats: &Stats,
    monster: &mut Monster,
    empower: &mut Empower,
) -> EffectReport {
    match skill.effect {
        SkillEffect::DamageBuff => {
            empower.arm(skill.power.unwrap_or(DEFAULT_EMPOWER_MULTIPLIER));
            EffectReport::new(
                Outcome::MessageOnly,
                "Your entire body glows with power! Your next attack will be stronger.".into(),
            )
        }
        SkillEffect::DefenseDebuff => {
            let power = skill.power.unwrap_or(DEFAULT_DEBUFF_POWER);
            let message = if power < 1.0 {
                monster.defense = ((monster.defense as f64) * power).floor().max(0.0) as u32;
                "You weaken the foe's guard! Their defense drops."
            } else {
                monster.defense = monster.defense.saturating_sub(power as u32);
                "You pierce their armor! Their defense drops."
            };
            EffectReport::new(Outcome::MessageOnly, message.into())
        }
        SkillEffect::HpBuff => {
            let heal = match skill.power {
                Some(power) if power != 0.0 => power.max(0.0) as u32,
                _ => stats.level * HEAL_PER_LEVEL,
            };
            EffectReport::new(
                Outcome::Heal(heal),
                format!("You bless yourself and heal {} HP.", heal),
            )
        }
        SkillEffect::Direct | SkillEffect::None => {
            let damage = base_damage(stats.attack, direct_bonus(skill.id), monster.defense);
            EffectReport::new(Outcome::Damage(damage), direct_message(skill, damage))
        }
    }
}
