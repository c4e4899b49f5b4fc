//! Monsters, skills and the turn-based combat engine.

#![allow(unused_imports)]

pub mod effects;
pub mod logic;
pub mod skills;
pub mod types;

pub use logic::{run_battle, BattleOutcome, BattleReport, CombatSession, CombatSurface};
pub use types::{spawn, LevelRange, Monster, Species, SpawnError};
