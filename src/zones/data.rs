//! Bush zones and overworld landmarks.

use crate::combat::types::LevelRange;
use crate::core::constants::*;
use crate::quests::types::Coord;

/// Monsters a zone can spawn.
#[derive(Debug, Clone, PartialEq)]
pub enum ZoneSpawn {
    Single(&'static str),
    /// (species, relative weight)
    Weighted(&'static [(&'static str, f64)]),
}

/// A named set of bush tiles with a spawn table.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    pub name: &'static str,
    pub tiles: &'static [(i32, i32)],
    pub level_range: LevelRange,
    /// Chance per step that an encounter starts
    pub encounter_chance: f64,
    pub spawn: ZoneSpawn,
}

impl Zone {
    pub fn contains(&self, at: Coord) -> bool {
        self.tiles.iter().any(|&(x, y)| at == Coord::new(x, y))
    }
}

const SLIME_TILES: &[(i32, i32)] = &[
    (1, 1),
    (1, 2),
    (2, 0),
    (2, 1),
    (2, 2),
    (3, 0),
    (3, 1),
    (3, 2),
    (1, 3),
    (1, 4),
    (2, 3),
    (2, 4),
    (3, 3),
    (3, 4),
    (4, 2),
    (4, 3),
    (5, 3),
    (6, 3),
    (7, 3),
    (5, 2),
    (6, 2),
];
const GOBLIN_TILES: &[(i32, i32)] = &[(-5, -5), (-5, -6), (-6, -5), (-6, -6)];
const ORC_TILES: &[(i32, i32)] = &[(10, 10), (10, 11), (11, 10), (11, 11)];
const MIXED_TILES: &[(i32, i32)] = &[(8, -3), (8, -4), (9, -3), (9, -4)];

const MIXED_WEIGHTS: &[(&str, f64)] = &[
    ("Slime", 0.4),
    ("Goblin", 0.3),
    ("Kobold", 0.2),
    ("Orc", 0.1),
];

/// All bush zones in lookup order.
pub fn all_zones() -> Vec<Zone> {
    vec![
        Zone {
            name: "slime",
            tiles: SLIME_TILES,
            level_range: LevelRange::new(1, 3),
            encounter_chance: SLIME_ZONE_CHANCE,
            spawn: ZoneSpawn::Single("Slime"),
        },
        Zone {
            name: "goblin",
            tiles: GOBLIN_TILES,
            level_range: LevelRange::new(4, 6),
            encounter_chance: GOBLIN_ZONE_CHANCE,
            spawn: ZoneSpawn::Single("Goblin"),
        },
        Zone {
            name: "orc",
            tiles: ORC_TILES,
            level_range: LevelRange::new(8, 12),
            encounter_chance: ORC_ZONE_CHANCE,
            spawn: ZoneSpawn::Single("Orc"),
        },
        Zone {
            name: "mixed",
            tiles: MIXED_TILES,
            level_range: LevelRange::new(5, 10),
            encounter_chance: MIXED_ZONE_CHANCE,
            spawn: ZoneSpawn::Weighted(MIXED_WEIGHTS),
        },
    ]
}

/// The first zone containing `at`, if any.
pub fn zone_at(zones: &[Zone], at: Coord) -> Option<&Zone> {
    zones.iter().find(|zone| zone.contains(at))
}

/// What the map shows on a tile, ignoring the player and NPCs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terrain {
    Bush,
    Origin,
    Road,
    Grass,
}

impl Terrain {
    pub fn glyph(&self) -> char {
        match self {
            Terrain::Bush => 'B',
            Terrain::Origin => '*',
            Terrain::Road | Terrain::Grass => '.',
        }
    }
}

pub fn terrain_at(zones: &[Zone], at: Coord) -> Terrain {
    if zone_at(zones, at).is_some() {
        Terrain::Bush
    } else if at == Coord::ORIGIN {
        Terrain::Origin
    } else if (at.y == 0 && at.x.abs() <= ROAD_EXTENT) || (at.x == 0 && at.y.abs() <= ROAD_EXTENT) {
        Terrain::Road
    } else {
        Terrain::Grass
    }
}
