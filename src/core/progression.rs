//! XP, level-ups and the death penalty.

use crate::character::stats::Stats;
use crate::core::constants::LEVEL_UP_SKILL_POINTS;

/// Adds XP and applies every level-up it pays for.
///
/// Each level costs `level * 10` XP, grants 5 skill points and refills mana.
/// Returns true if at least one level was gained.
pub fn gain_xp(stats: &mut Stats, amount: u32) -> bool {
    stats.xp += amount;
    let mut leveled_up = false;
    while stats.xp >= stats.xp_threshold() {
        stats.xp -= stats.xp_threshold();
        stats.level += 1;
        stats.skill_points += LEVEL_UP_SKILL_POINTS;
        stats.restore_mana();
        leveled_up = true;
    }
    if leveled_up {
        tracing::info!(level = stats.level, "level up");
    }
    leveled_up
}

/// Removes half of the current XP (rounded down). Returns the amount lost.
pub fn apply_death_penalty(stats: &mut Stats) -> u32 {
    let lost = stats.xp / 2;
    stats.xp -= lost;
    lost
}
