//! Bush zones and the encounter trigger used by the overworld.

#![allow(unused_imports)]

pub mod data;
pub mod encounter;

pub use data::{all_zones, zone_at, Zone};
pub use encounter::{roll_encounter, Encounter};
