// Combat timing
pub const INPUT_WINDOW_MS: u64 = 1000;
pub const TURN_PAUSE_MS: u64 = 1000;

// Monster spawning
pub const ELITE_CHANCE: f64 = 0.0001;
pub const ELITE_PREFIX: &str = "Elite ";
pub const HP_PER_LEVEL: u32 = 5;
pub const ATTACK_PER_LEVEL: u32 = 2;
pub const DEFENSE_PER_LEVEL: u32 = 2;
/// Speed grows by one every two levels.
pub const LEVELS_PER_SPEED: u32 = 2;

// Species base stats: (hp, attack, speed, defense)
pub const SLIME_BASE: (u32, u32, u32, u32) = (10, 3, 1, 1);
pub const GOBLIN_BASE: (u32, u32, u32, u32) = (30, 6, 10, 3);
pub const KOBOLD_BASE: (u32, u32, u32, u32) = (35, 7, 5, 4);
pub const ORC_BASE: (u32, u32, u32, u32) = (100, 30, 2, 6);
pub const GENERIC_BASE: (u32, u32, u32, u32) = (15, 5, 2, 2);

// Kill XP by species
pub const SLIME_XP: u32 = 5;
pub const GOBLIN_XP: u32 = 10;
pub const KOBOLD_XP: u32 = 15;
pub const ORC_XP: u32 = 40;
pub const GENERIC_XP: u32 = 5;
pub const XP_PER_MONSTER_LEVEL: u32 = 2;

// Skill effects
pub const DEFAULT_EMPOWER_MULTIPLIER: f64 = 1.8;
pub const DEFAULT_DEBUFF_POWER: f64 = 0.9;
pub const HEAL_PER_LEVEL: u32 = 2;
pub const FIREBALL_BONUS: u32 = 5;
pub const ARCANE_BOLT_BONUS: u32 = 3;
pub const GENERIC_SKILL_BONUS: u32 = 2;
pub const MANA_REGEN_PER_TURN: u32 = 1;
pub const MAX_SKILL_NAME_LEN: usize = 20;

// Leveling
pub const XP_PER_LEVEL: u32 = 10;
pub const LEVEL_UP_SKILL_POINTS: u32 = 5;

// Stat upgrades (per skill point)
pub const UPGRADE_HP: u32 = 2;
pub const UPGRADE_ATTACK: u32 = 1;
pub const UPGRADE_DEFENSE: u32 = 1;
pub const UPGRADE_SPEED: u32 = 1;
pub const UPGRADE_MANA: u32 = 2;

// New game
pub const START_HP: u32 = 20;
pub const START_ATTACK: u32 = 5;
pub const START_DEFENSE: u32 = 1;
pub const START_SPEED: u32 = 2;
pub const START_MANA: u32 = 10;
pub const START_GOLD: u32 = 1;

// Overworld
pub const VIEWPORT_WIDTH: i32 = 20;
pub const VIEWPORT_HEIGHT: i32 = 10;
pub const ROAD_EXTENT: i32 = 20;
/// Saved coordinate keys outside this range are rejected on load.
pub const MAX_COORD_ABS: i32 = 1_000_000;

// Persistence
pub const SAVE_FILE_NAME: &str = "savegame.json";
pub const LOG_FILE_NAME: &str = "bramble.log";

// Encounter chance per step inside each bush zone
pub const SLIME_ZONE_CHANCE: f64 = 0.20;
pub const GOBLIN_ZONE_CHANCE: f64 = 0.10;
pub const ORC_ZONE_CHANCE: f64 = 0.08;
pub const MIXED_ZONE_CHANCE: f64 = 0.15;
