use std::collections::BTreeMap;
use std::fmt;

use crate::character::stats::ClassPath;

/// A grid position on the overworld.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const ORIGIN: Coord = Coord { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestReward {
    pub xp: u32,
    pub skill_points: u32,
}

/// Defeat `required` monsters of the `target` species.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KillQuest {
    pub target: String,
    pub required: u32,
    pub progress: u32,
    pub completed: bool,
    pub reward: QuestReward,
    pub reward_given: bool,
}

impl KillQuest {
    pub fn new(target: &str, required: u32, reward: QuestReward) -> Self {
        Self {
            target: target.to_string(),
            required,
            progress: 0,
            completed: false,
            reward,
            reward_given: false,
        }
    }
}

/// Offers a permanent class path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassQuest {
    pub class: ClassPath,
    pub accepted: bool,
    pub completed: bool,
}

impl ClassQuest {
    pub fn new(class: ClassPath) -> Self {
        Self {
            class,
            accepted: false,
            completed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Quest {
    Kill(KillQuest),
    Class(ClassQuest),
    /// Merchant placeholder with dialogue only
    Gold,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Npc {
    pub dialogue: String,
    pub quest: Option<Quest>,
}

impl Npc {
    pub fn new(dialogue: &str, quest: Quest) -> Self {
        Self {
            dialogue: dialogue.to_string(),
            quest: Some(quest),
        }
    }
}

/// Every NPC in the world, keyed by the tile they stand on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NpcTable {
    npcs: BTreeMap<Coord, Npc>,
}

impl NpcTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The villagers of a fresh world.
    pub fn starting() -> Self {
        let kill = |target: &str, required: u32, xp: u32, skill_points: u32| {
            Quest::Kill(KillQuest::new(
                target,
                required,
                QuestReward { xp, skill_points },
            ))
        };

        let mut table = Self::new();
        table.insert(
            Coord::new(0, 1),
            Npc::new(
                "A youngster tells you, 'Slimes are tricky to catch, so I guess I'll play with their corpses.'",
                kill("Slime", 3, 20, 0),
            ),
        );
        table.insert(
            Coord::new(10, 9),
            Npc::new(
                "A frail old man tells you, 'If you give me 2 goblin heads, I will give you a reward.'",
                kill("Goblin", 2, 40, 0),
            ),
        );
        table.insert(
            Coord::new(-5, -4),
            Npc::new(
                "An agitated farmer paces back and forth, muttering, 'Those disgusting orcs...'",
                kill("Orc", 1, 100, 1),
            ),
        );
        table.insert(
            Coord::new(-1, 0),
            Npc::new(
                "A wizened figure stands, staff in hand: 'You want to follow the path of magic?'",
                Quest::Class(ClassQuest::new(ClassPath::Mage)),
            ),
        );
        table.insert(
            Coord::new(1, 0),
            Npc::new(
                "A rugged veteran sits, hair in the wind, 'Fight like a warrior.'",
                Quest::Class(ClassQuest::new(ClassPath::Swordsman)),
            ),
        );
        table.insert(
            Coord::new(0, -1),
            Npc::new(
                "A kind old man gazes at you warmly, 'May He be with you.'",
                Quest::Class(ClassQuest::new(ClassPath::Cleric)),
            ),
        );
        table.insert(
            Coord::new(0, 4),
            Npc::new("A merchant shows off their wares.", Quest::Gold),
        );
        table
    }

    pub fn insert(&mut self, at: Coord, npc: Npc) {
        self.npcs.insert(at, npc);
    }

    pub fn get(&self, at: Coord) -> Option<&Npc> {
        self.npcs.get(&at)
    }

    pub fn get_mut(&mut self, at: Coord) -> Option<&mut Npc> {
        self.npcs.get_mut(&at)
    }

    pub fn contains(&self, at: Coord) -> bool {
        self.npcs.contains_key(&at)
    }

    pub fn quest_mut(&mut self, at: Coord) -> Option<&mut Quest> {
        self.npcs.get_mut(&at).and_then(|npc| npc.quest.as_mut())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Coord, &Npc)> {
        self.npcs.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&Coord, &mut Npc)> {
        self.npcs.iter_mut()
    }

    pub fn kill_quest(&self, at: Coord) -> Option<&KillQuest> {
        match self.get(at)?.quest.as_ref()? {
            Quest::Kill(quest) => Some(quest),
            _ => None,
        }
    }
}
