//! Bramble - a single-player terminal RPG.
//!
//! The game logic (combat, progression, quests, saves) is exposed here for
//! testing; the binary adds the terminal front end.

pub mod app;
pub mod character;
pub mod combat;
pub mod core;
pub mod items;
pub mod quests;
pub mod ui;
pub mod utils;
pub mod zones;
