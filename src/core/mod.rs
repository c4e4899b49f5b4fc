//! Core game state, tuning constants and progression.

#![allow(unused_imports)]

pub mod constants;
pub mod game_state;
pub mod progression;

pub use game_state::GameState;
