//! Per-NPC quests: kill counters, class paths and the merchant stub.

#![allow(unused_imports)]

pub mod logic;
pub mod types;

pub use logic::{accept_class, record_kill, visit_npc, NpcVisit, QuestStatus};
pub use types::{Coord, Npc, NpcTable, Quest};
