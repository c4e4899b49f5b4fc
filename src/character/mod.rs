//! Player stats and save files.

#![allow(unused_imports)]

pub mod save;
pub mod stats;

pub use save::{SaveError, SaveManager, SaveRecord};
pub use stats::{ClassPath, StatKind, Stats};
