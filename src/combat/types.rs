use rand::Rng;
use std::fmt;

use crate::core::constants::*;

/// Monster species. Unknown names get generic base stats.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Species {
    Slime,
    Goblin,
    Kobold,
    Orc,
    Other(String),
}

impl Species {
    pub fn from_name(name: &str) -> Self {
        match name {
            "Slime" => Species::Slime,
            "Goblin" => Species::Goblin,
            "Kobold" => Species::Kobold,
            "Orc" => Species::Orc,
            other => Species::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Species::Slime => "Slime",
            Species::Goblin => "Goblin",
            Species::Kobold => "Kobold",
            Species::Orc => "Orc",
            Species::Other(name) => name,
        }
    }

    /// Returns (hp, attack, speed, defense) before level scaling.
    pub fn base_stats(&self) -> (u32, u32, u32, u32) {
        match self {
            Species::Slime => SLIME_BASE,
            Species::Goblin => GOBLIN_BASE,
            Species::Kobold => KOBOLD_BASE,
            Species::Orc => ORC_BASE,
            Species::Other(_) => GENERIC_BASE,
        }
    }

    pub fn base_xp(&self) -> u32 {
        match self {
            Species::Slime => SLIME_XP,
            Species::Goblin => GOBLIN_XP,
            Species::Kobold => KOBOLD_XP,
            Species::Orc => ORC_XP,
            Species::Other(_) => GENERIC_XP,
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inclusive monster level range supplied by a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelRange {
    pub min: u32,
    pub max: u32,
}

impl LevelRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub const fn single(level: u32) -> Self {
        Self {
            min: level,
            max: level,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SpawnError {
    #[error("invalid level range: min {min} is greater than max {max}")]
    InvalidLevelRange { min: u32, max: u32 },
}

/// A leveled monster, alive for a single encounter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monster {
    /// Display name, carries the elite prefix when mutated
    pub name: String,
    pub species: Species,
    pub level: u32,
    pub hp: u32,
    pub attack: u32,
    pub speed: u32,
    pub defense: u32,
    pub elite: bool,
}

impl Monster {
    /// Applies level scaling to the species base stats.
    pub fn new(species: Species, level: u32) -> Self {
        let (hp, attack, speed, defense) = species.base_stats();
        Self {
            name: species.name().to_string(),
            species,
            level,
            hp: hp + level * HP_PER_LEVEL,
            attack: attack + level * ATTACK_PER_LEVEL,
            speed: speed + level / LEVELS_PER_SPEED,
            defense: defense + level * DEFENSE_PER_LEVEL,
            elite: false,
        }
    }

    /// Doubles hp, attack and defense and prefixes the name.
    pub fn make_elite(&mut self) {
        if self.elite {
            return;
        }
        self.name = format!("{}{}", ELITE_PREFIX, self.name);
        self.hp *= 2;
        self.attack *= 2;
        self.defense *= 2;
        self.elite = true;
    }

    /// Species name with any elite prefix stripped; used for XP and quest matching.
    pub fn base_name(&self) -> &str {
        self.species.name()
    }

    pub fn kill_xp(&self) -> u32 {
        let xp = self.species.base_xp() + self.level * XP_PER_MONSTER_LEVEL;
        if self.elite {
            xp * 2
        } else {
            xp
        }
    }
}

/// Spawns a monster of `species` with a level drawn uniformly from `range`,
/// then rolls the elite mutation.
pub fn spawn(
    species: &str,
    range: LevelRange,
    rng: &mut impl Rng,
) -> Result<Monster, SpawnError> {
    if range.min > range.max {
        return Err(SpawnError::InvalidLevelRange {
            min: range.min,
            max: range.max,
        });
    }
    let level = rng.gen_range(range.min..=range.max);
    let mut monster = Monster::new(Species::from_name(species), level);
    if rng.gen_bool(ELITE_CHANCE) {
        monster.make_elite();
    }
    Ok(monster)
}
