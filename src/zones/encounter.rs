//! Encounter trigger: decides whether stepping on a tile starts a battle.

use rand::Rng;

use super::data::{zone_at, Zone, ZoneSpawn};
use crate::combat::types::LevelRange;
use crate::quests::types::Coord;

/// A battle the overworld should start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encounter {
    pub species: &'static str,
    pub level_range: LevelRange,
}

/// Picks from cumulative weights, falling back to the last entry when
/// float rounding leaves the roll past the total.
pub fn pick_weighted<'a, T>(entries: &'a [(T, f64)], rng: &mut impl Rng) -> Option<&'a T> {
    let (last, _) = entries.last()?;
    let total: f64 = entries.iter().map(|(_, w)| *w).sum();
    let roll = rng.gen::<f64>() * total;
    let mut upto: f64 = 0.0;
    for (entry, weight) in entries {
        if upto + *weight >= roll {
            return Some(entry);
        }
        upto += *weight;
    }
    Some(last)
}

/// Rolls the first zone at `at` for an encounter.
pub fn roll_encounter(zones: &[Zone], at: Coord, rng: &mut impl Rng) -> Option<Encounter> {
    let zone = zone_at(zones, at)?;
    if rng.gen::<f64>() >= zone.encounter_chance {
        return None;
    }
    let species = match &zone.spawn {
        ZoneSpawn::Single(species) => *species,
        ZoneSpawn::Weighted(weights) => *pick_weighted(weights, rng)?,
    };
    tracing::debug!(zone = zone.name, species, "encounter triggered");
    Some(Encounter {
        species,
        level_range: zone.level_range,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zones::data::all_zones;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::BTreeMap;

    #[test]
    fn test_pick_weighted_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let empty: [(&str, f64); 0] = [];
        assert!(pick_weighted(&empty, &mut rng).is_none());
    }

    #[test]
    fn test_pick_weighted_zero_roll_picks_first() {
        let mut rng = StepRng::new(0, 0);
        let entries = [("Slime", 0.4), ("Orc", 0.6)];
        assert_eq!(pick_weighted(&entries, &mut rng), Some(&"Slime"));
    }

    #[test]
    fn test_pick_weighted_all_zero_weights_picks_first() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let entries = [("Slime", 0.0), ("Orc", 0.0)];
        assert_eq!(pick_weighted(&entries, &mut rng), Some(&"Slime"));
    }

    #[test]
    fn test_pick_weighted_distribution() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let entries = [("Slime", 0.4), ("Goblin", 0.3), ("Kobold", 0.2), ("Orc", 0.1)];
        let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
        for _ in 0..10_000 {
            let species = *pick_weighted(&entries, &mut rng).unwrap();
            *counts.entry(species).or_default() += 1;
        }
        assert!(counts["Slime"] > counts["Goblin"]);
        assert!(counts["Goblin"] > counts["Kobold"]);
        assert!(counts["Kobold"] > counts["Orc"]);
        assert!(counts["Orc"] > 500);
    }

    #[test]
    fn test_no_encounter_off_zone() {
        let zones = all_zones();
        let mut rng = StepRng::new(0, 0);
        assert!(roll_encounter(&zones, Coord::new(0, 1), &mut rng).is_none());
    }

    #[test]
    fn test_encounter_uses_zone_table() {
        let zones = all_zones();
        let mut rng = StepRng::new(0, 0);
        let encounter = roll_encounter(&zones, Coord::new(-5, -5), &mut rng).unwrap();
        assert_eq!(encounter.species, "Goblin");
        assert_eq!(encounter.level_range, LevelRange::new(4, 6));

        let mixed = roll_encounter(&zones, Coord::new(8, -3), &mut rng).unwrap();
        assert_eq!(mixed.species, "Slime");
    }

    #[test]
    fn test_encounter_rate_matches_chance() {
        let zones = all_zones();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let hits = (0..10_000)
            .filter(|_| roll_encounter(&zones, Coord::new(1, 1), &mut rng).is_some())
            .count();
        assert!((1_700..2_300).contains(&hits), "hits = {}", hits);
    }
}
