//! Save files: a flat JSON record of stats, position and quest progress.
//!
//! Quest state is keyed by a textual coordinate ("x,y"). Keys are parsed with
//! a strict validator; a bad key skips that one entry instead of failing the
//! whole load.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use super::stats::Stats;
use crate::combat::skills::SkillId;
use crate::core::constants::MAX_COORD_ABS;
use crate::core::progression::gain_xp;
use crate::core::game_state::GameState;
use crate::items::types::{Inventory, InventoryItem};
use crate::quests::types::{Coord, Quest};
use crate::utils::persistence::{default_save_path, read_json, write_json};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SaveError {
    #[error("no saved game found")]
    NoSave,
    #[error("save file i/o failed: {0}")]
    Io(String),
    #[error("save file is not valid: {0}")]
    Json(String),
}

impl From<io::Error> for SaveError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => SaveError::NoSave,
            io::ErrorKind::InvalidData => SaveError::Json(err.to_string()),
            _ => SaveError::Io(err.to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CoordKeyError {
    #[error("coordinate key {0:?} has no comma")]
    MissingSeparator(String),
    #[error("coordinate key {0:?} is not a pair of integers")]
    InvalidInteger(String),
    #[error("coordinate ({x}, {y}) is out of bounds")]
    OutOfBounds { x: i64, y: i64 },
}

/// Encodes a coordinate as a quest map key.
pub fn coord_key(at: Coord) -> String {
    format!("{},{}", at.x, at.y)
}

/// Parses "x,y". The parenthesized "(x, y)" form of older saves is accepted too.
pub fn parse_coord_key(key: &str) -> Result<Coord, CoordKeyError> {
    let trimmed = key.trim();
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(trimmed);
    let (x, y) = inner
        .split_once(',')
        .ok_or_else(|| CoordKeyError::MissingSeparator(key.to_string()))?;

    let parse = |part: &str| {
        part.trim()
            .parse::<i64>()
            .map_err(|_| CoordKeyError::InvalidInteger(key.to_string()))
    };
    let (x, y) = (parse(x)?, parse(y)?);

    let limit = i64::from(MAX_COORD_ABS);
    if x.abs() > limit || y.abs() > limit {
        return Err(CoordKeyError::OutOfBounds { x, y });
    }
    Ok(Coord::new(x as i32, y as i32))
}

/// Persisted slice of one NPC's quest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestSnapshot {
    #[serde(default)]
    pub progress: u32,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub reward_given: bool,
    #[serde(default)]
    pub accepted: bool,
}

impl QuestSnapshot {
    fn capture(quest: &Quest) -> Self {
        match quest {
            Quest::Kill(kill) => Self {
                progress: kill.progress,
                completed: kill.completed,
                reward_given: kill.reward_given,
                accepted: false,
            },
            Quest::Class(class) => Self {
                completed: class.completed,
                accepted: class.accepted,
                ..Self::default()
            },
            Quest::Gold => Self::default(),
        }
    }

    fn apply(&self, quest: &mut Quest) {
        match quest {
            Quest::Kill(kill) => {
                kill.progress = self.progress.min(kill.required);
                kill.completed = self.completed;
                kill.reward_given = self.reward_given;
            }
            Quest::Class(class) => {
                class.accepted = self.accepted;
                class.completed = self.completed;
            }
            Quest::Gold => {}
        }
    }
}

/// The on-disk save layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRecord {
    pub stats: Stats,
    pub player_x: i32,
    pub player_y: i32,
    #[serde(default)]
    pub quests: BTreeMap<String, QuestSnapshot>,
    /// Missing in older saves; restores the starting inventory
    #[serde(default)]
    pub inventory: Option<Vec<InventoryItem>>,
    #[serde(default)]
    pub skill_names: BTreeMap<SkillId, String>,
}

impl SaveRecord {
    pub fn capture(state: &GameState) -> Self {
        let quests = state
            .npcs
            .iter()
            .filter_map(|(at, npc)| {
                let quest = npc.quest.as_ref()?;
                Some((coord_key(*at), QuestSnapshot::capture(quest)))
            })
            .collect();

        Self {
            stats: state.stats.clone(),
            player_x: state.position.x,
            player_y: state.position.y,
            quests,
            inventory: Some(state.inventory.items.clone()),
            skill_names: state.skill_names.clone(),
        }
    }

    /// Rebuilds a game on top of a fresh world.
    pub fn restore(self) -> GameState {
        let mut state = GameState::new();
        state.stats = self.stats;
        state.stats.current_mana = state.stats.current_mana.min(state.stats.mana);
        // Hand-edited saves may hold XP past the level threshold
        if gain_xp(&mut state.stats, 0) {
            tracing::warn!(level = state.stats.level, "saved xp settled into level-ups");
        }
        state.position = Coord::new(self.player_x, self.player_y);
        state.inventory = match self.inventory {
            Some(items) => Inventory { items },
            None => Inventory::starting(),
        };
        state.skill_names = self.skill_names;

        for (key, snapshot) in &self.quests {
            let at = match parse_coord_key(key) {
                Ok(at) => at,
                Err(err) => {
                    tracing::warn!(key = %key, error = %err, "skipping saved quest");
                    continue;
                }
            };
            if let Some(quest) = state.npcs.quest_mut(at) {
                snapshot.apply(quest);
            }
        }
        state
    }
}

/// Reads and writes the save file.
#[derive(Debug, Clone)]
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Uses `savegame.json` in the platform data directory.
    pub fn new() -> Result<Self, SaveError> {
        Ok(Self {
            save_path: default_save_path()?,
        })
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            save_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.save_path
    }

    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }

    pub fn save(&self, state: &GameState) -> Result<(), SaveError> {
        write_json(&self.save_path, &SaveRecord::capture(state))?;
        tracing::info!(path = %self.save_path.display(), "game saved");
        Ok(())
    }

    /// Returns `SaveError::NoSave` when there is no file yet.
    pub fn load(&self) -> Result<GameState, SaveError> {
        let record: SaveRecord = read_json(&self.save_path)?;
        tracing::info!(path = %self.save_path.display(), "game loaded");
        Ok(record.restore())
    }
}
