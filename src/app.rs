//! UI-agnostic application state: which screen is up and what each key does.
//!
//! The terminal layer translates key events into [`KeyInput`], calls
//! [`App::handle_key`], and runs a battle whenever it gets
//! [`AppAction::StartBattle`] back.

use rand::Rng;

use crate::character::save::{SaveError, SaveManager};
use crate::character::stats::{ClassPath, StatKind};
use crate::combat::logic::{run_battle, BattleReport, CombatSurface};
use crate::combat::skills::SkillId;
use crate::core::constants::MAX_SKILL_NAME_LEN;
use crate::core::game_state::GameState;
use crate::quests::logic::{accept_class, visit_npc, QuestStatus};
use crate::quests::types::Coord;
use crate::zones::data::{all_zones, Zone};
use crate::zones::encounter::{roll_encounter, Encounter};

/// Key events the game reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    Backspace,
    Char(char),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOption {
    NewGame,
    LoadGame,
    Quit,
}

impl StartOption {
    pub fn all() -> [StartOption; 3] {
        [StartOption::NewGame, StartOption::LoadGame, StartOption::Quit]
    }

    pub fn label(&self) -> &'static str {
        match self {
            StartOption::NewGame => "New Game",
            StartOption::LoadGame => "Load Game",
            StartOption::Quit => "Quit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    StartMenu { selected: usize },
    Overworld,
    Upgrade { selected: usize },
    Inventory,
    SkillList { selected: usize },
    RenamePick,
    RenameInput { skill: SkillId, buffer: String },
    ClassOffer { at: Coord, class: ClassPath },
    Help,
    BattleResult { lines: Vec<String> },
}

/// What the caller must do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    None,
    StartBattle(Encounter),
    Quit,
}

pub struct App {
    pub state: GameState,
    pub screen: Screen,
    /// Lines shown under the map until the next overworld key
    pub messages: Vec<String>,
    pub zones: Vec<Zone>,
    saves: SaveManager,
}

/// Maps '1'..='9' to a zero-based index.
fn digit_index(c: char) -> Option<usize> {
    match c {
        '1'..='9' => c.to_digit(10).map(|d| d as usize - 1),
        _ => None,
    }
}

fn is_back(input: KeyInput) -> bool {
    matches!(input, KeyInput::Esc | KeyInput::Char('b'))
}

impl App {
    pub fn new(saves: SaveManager) -> Self {
        Self {
            state: GameState::new(),
            screen: Screen::StartMenu { selected: 0 },
            messages: Vec::new(),
            zones: all_zones(),
            saves,
        }
    }

    pub fn save_path(&self) -> &std::path::Path {
        self.saves.path()
    }

    pub fn handle_key(&mut self, input: KeyInput, rng: &mut impl Rng) -> AppAction {
        match self.screen.clone() {
            Screen::StartMenu { selected } => self.handle_start_menu(input, selected),
            Screen::Overworld => self.handle_overworld(input, rng),
            Screen::Upgrade { selected } => {
                self.handle_upgrade(input, selected);
                AppAction::None
            }
            Screen::Inventory => {
                self.handle_inventory(input);
                AppAction::None
            }
            Screen::SkillList { selected } => {
                self.handle_skill_list(input, selected);
                AppAction::None
            }
            Screen::RenamePick => {
                self.handle_rename_pick(input);
                AppAction::None
            }
            Screen::RenameInput { skill, buffer } => {
                self.handle_rename_input(input, skill, buffer);
                AppAction::None
            }
            Screen::ClassOffer { at, class } => {
                self.handle_class_offer(input, at, class);
                AppAction::None
            }
            Screen::Help | Screen::BattleResult { .. } => {
                self.screen = Screen::Overworld;
                AppAction::None
            }
        }
    }

    fn handle_start_menu(&mut self, input: KeyInput, selected: usize) -> AppAction {
        let options = StartOption::all();
        let chosen = match input {
            KeyInput::Up | KeyInput::Down => {
                let step = if input == KeyInput::Up { options.len() - 1 } else { 1 };
                self.screen = Screen::StartMenu {
                    selected: (selected + step) % options.len(),
                };
                return AppAction::None;
            }
            KeyInput::Enter => options[selected.min(options.len() - 1)],
            KeyInput::Char(c) => match digit_index(c).and_then(|i| options.get(i)) {
                Some(option) => *option,
                None => return AppAction::None,
            },
            _ => return AppAction::None,
        };

        match chosen {
            StartOption::NewGame => self.new_game(),
            StartOption::LoadGame => match self.load() {
                Err(SaveError::NoSave) => {
                    self.new_game();
                    self.messages = vec!["No save found. Starting new game.".into()];
                }
                // A broken save keeps the player on the menu so it is not overwritten
                Ok(()) | Err(_) => {}
            },
            StartOption::Quit => return AppAction::Quit,
        }
        AppAction::None
    }

    fn new_game(&mut self) {
        self.state = GameState::new();
        self.messages.clear();
        self.screen = Screen::Overworld;
        tracing::info!("new game started");
    }

    fn handle_overworld(&mut self, input: KeyInput, rng: &mut impl Rng) -> AppAction {
        self.messages.clear();
        let (dx, dy) = match input {
            KeyInput::Up => (0, -1),
            KeyInput::Down => (0, 1),
            KeyInput::Left => (-1, 0),
            KeyInput::Right => (1, 0),
            KeyInput::Char('q') => return AppAction::Quit,
            KeyInput::Char('u') => {
                self.screen = Screen::Upgrade { selected: 0 };
                return AppAction::None;
            }
            KeyInput::Char('i') => {
                self.screen = Screen::Inventory;
                return AppAction::None;
            }
            KeyInput::Char('p') => {
                self.screen = Screen::SkillList { selected: 0 };
                return AppAction::None;
            }
            KeyInput::Char('k') => {
                if self.state.skills().is_empty() {
                    self.messages = vec!["You have no skills to rename.".into()];
                } else {
                    self.screen = Screen::RenamePick;
                }
                return AppAction::None;
            }
            KeyInput::Char('h') => {
                self.screen = Screen::Help;
                return AppAction::None;
            }
            KeyInput::Char('s') => {
                self.save();
                return AppAction::None;
            }
            KeyInput::Char('l') => {
                if let Err(SaveError::NoSave) = self.load() {
                    self.messages = vec!["No save found.".into()];
                }
                return AppAction::None;
            }
            _ => return AppAction::None,
        };

        self.state.move_by(dx, dy);
        self.arrive(rng)
    }

    /// Runs NPC talk and the encounter roll for the tile just entered.
    fn arrive(&mut self, rng: &mut impl Rng) -> AppAction {
        let at = self.state.position;
        if let Some(visit) = visit_npc(&mut self.state.npcs, at, &mut self.state.stats) {
            self.messages.push(visit.dialogue);
            self.messages
                .extend(visit.status.message(self.state.stats.level));
            if let QuestStatus::ClassOffer(class) = visit.status {
                self.screen = Screen::ClassOffer { at, class };
                return AppAction::None;
            }
        }

        match roll_encounter(&self.zones, at, rng) {
            Some(encounter) => AppAction::StartBattle(encounter),
            None => AppAction::None,
        }
    }

    fn handle_class_offer(&mut self, input: KeyInput, at: Coord, class: ClassPath) {
        if input == KeyInput::Char('y') {
            if let Some(class) = accept_class(&mut self.state.npcs, at, &mut self.state.stats) {
                self.messages = vec![format!("You are now on the path of the {}!", class)];
            }
        } else {
            self.messages = vec![format!("You decline the path of the {}.", class)];
        }
        self.screen = Screen::Overworld;
    }

    fn handle_upgrade(&mut self, input: KeyInput, selected: usize) {
        let kinds = StatKind::all();
        let kind = match input {
            KeyInput::Up => {
                self.screen = Screen::Upgrade {
                    selected: selected.saturating_sub(1),
                };
                return;
            }
            KeyInput::Down => {
                self.screen = Screen::Upgrade {
                    selected: (selected + 1).min(kinds.len() - 1),
                };
                return;
            }
            KeyInput::Enter => kinds[selected.min(kinds.len() - 1)],
            input if is_back(input) => {
                self.screen = Screen::Overworld;
                return;
            }
            KeyInput::Char(c) => match digit_index(c).and_then(|i| kinds.get(i)) {
                Some(kind) => *kind,
                None => return,
            },
            _ => return,
        };

        if self.state.stats.upgrade(kind) {
            self.messages = vec![format!("{} upgraded!", kind.label())];
        } else {
            self.messages = vec!["Not enough skill points.".into()];
        }
    }

    fn handle_inventory(&mut self, input: KeyInput) {
        match input {
            input if is_back(input) => self.screen = Screen::Overworld,
            KeyInput::Char(c) => {
                if let Some(index) = digit_index(c) {
                    self.state.toggle_wield(index);
                }
            }
            _ => {}
        }
    }

    fn handle_skill_list(&mut self, input: KeyInput, selected: usize) {
        let count = self.state.skills().len().max(1);
        self.screen = match input {
            input if is_back(input) => Screen::Overworld,
            KeyInput::Up => Screen::SkillList {
                selected: (selected + count - 1) % count,
            },
            KeyInput::Down => Screen::SkillList {
                selected: (selected + 1) % count,
            },
            _ => Screen::SkillList { selected },
        };
    }

    fn handle_rename_pick(&mut self, input: KeyInput) {
        match input {
            input if is_back(input) => self.screen = Screen::Overworld,
            KeyInput::Char(c) => {
                let skills = self.state.skills();
                if let Some(skill) = digit_index(c).and_then(|i| skills.get(i)) {
                    self.screen = Screen::RenameInput {
                        skill: skill.id,
                        buffer: String::new(),
                    };
                }
            }
            _ => {}
        }
    }

    fn handle_rename_input(&mut self, input: KeyInput, skill: SkillId, mut buffer: String) {
        match input {
            KeyInput::Esc => {
                self.screen = Screen::Overworld;
                return;
            }
            KeyInput::Enter => {
                if self.state.rename_skill(skill, &buffer) {
                    self.messages = vec![format!("Skill renamed to {}.", buffer.trim())];
                    tracing::info!(skill = skill.name(), "skill renamed");
                }
                self.screen = Screen::Overworld;
                return;
            }
            KeyInput::Backspace => {
                buffer.pop();
            }
            KeyInput::Char(c) if !c.is_control() && buffer.chars().count() < MAX_SKILL_NAME_LEN => {
                buffer.push(c);
            }
            _ => {}
        }
        self.screen = Screen::RenameInput { skill, buffer };
    }

    fn save(&mut self) {
        match self.saves.save(&self.state) {
            Ok(()) => self.messages = vec!["Game saved.".into()],
            Err(err) => {
                tracing::error!(error = %err, "save failed");
                self.messages = vec![format!("Save failed: {}", err)];
            }
        }
    }

    /// Replaces the session with the saved one. A missing save is left to
    /// the caller; any other failure is reported in the message line.
    fn load(&mut self) -> Result<(), SaveError> {
        match self.saves.load() {
            Ok(state) => {
                self.state = state;
                self.screen = Screen::Overworld;
                self.messages = vec!["Game loaded.".into()];
                Ok(())
            }
            Err(SaveError::NoSave) => Err(SaveError::NoSave),
            Err(err) => {
                tracing::error!(error = %err, "load failed");
                self.messages = vec![format!("Load failed: {}", err)];
                Err(err)
            }
        }
    }

    /// Fights `encounter` on `surface` and shows the result screen.
    pub fn run_encounter(
        &mut self,
        encounter: &Encounter,
        surface: &mut impl CombatSurface,
        rng: &mut impl Rng,
    ) {
        match run_battle(
            &mut self.state,
            encounter.species,
            encounter.level_range,
            surface,
            rng,
        ) {
            Ok(report) => self.finish_battle(report),
            Err(err) => {
                tracing::error!(error = %err, species = encounter.species, "encounter skipped");
                self.messages = vec![format!("Encounter failed: {}", err)];
            }
        }
    }

    pub fn finish_battle(&mut self, report: BattleReport) {
        if report.should_respawn() {
            self.state.respawn();
        }
        self.screen = Screen::BattleResult {
            lines: report.lines(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::logic::{PlayerInput, ScriptedActions};
    use crate::combat::types::LevelRange;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::fs;
    use tempfile::TempDir;

    fn app(dir: &TempDir) -> App {
        let mut app = App::new(SaveManager::at(dir.path().join("savegame.json")));
        app.screen = Screen::Overworld;
        app
    }

    fn press(app: &mut App, keys: &[KeyInput]) -> AppAction {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut last = AppAction::None;
        for key in keys {
            last = app.handle_key(*key, &mut rng);
        }
        last
    }

    #[test]
    fn test_start_menu_new_game() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(SaveManager::at(dir.path().join("savegame.json")));
        press(&mut app, &[KeyInput::Down, KeyInput::Up, KeyInput::Enter]);
        assert_eq!(app.screen, Screen::Overworld);
        assert_eq!(app.state, GameState::new());
    }

    #[test]
    fn test_start_menu_load_without_save_starts_new_game() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(SaveManager::at(dir.path().join("savegame.json")));
        press(&mut app, &[KeyInput::Char('2')]);
        assert_eq!(app.screen, Screen::Overworld);
        assert_eq!(app.messages, vec!["No save found. Starting new game.".to_string()]);
    }

    #[test]
    fn test_start_menu_load_with_corrupt_save_reports_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("savegame.json");
        fs::write(&path, "{corrupt").unwrap();
        let mut app = App::new(SaveManager::at(&path));

        press(&mut app, &[KeyInput::Char('2')]);

        assert_eq!(app.screen, Screen::StartMenu { selected: 0 });
        assert_eq!(app.messages.len(), 1);
        assert!(app.messages[0].starts_with("Load failed"));
        // The broken file is still there for the player to inspect
        assert_eq!(fs::read_to_string(&path).unwrap(), "{corrupt");
    }

    #[test]
    fn test_overworld_load_with_corrupt_save_keeps_game() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("savegame.json");
        let mut app = App::new(SaveManager::at(&path));
        press(&mut app, &[KeyInput::Char('1')]);
        fs::write(&path, "{corrupt").unwrap();

        press(&mut app, &[KeyInput::Char('l')]);

        assert_eq!(app.screen, Screen::Overworld);
        assert_eq!(app.state, GameState::new());
        assert!(app.messages[0].starts_with("Load failed"));
    }

    #[test]
    fn test_start_menu_quit() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(SaveManager::at(dir.path().join("savegame.json")));
        let action = press(&mut app, &[KeyInput::Down, KeyInput::Down, KeyInput::Enter]);
        assert_eq!(action, AppAction::Quit);
    }

    #[test]
    fn test_arrow_keys_move_with_y_down() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        press(&mut app, &[KeyInput::Down, KeyInput::Down, KeyInput::Left]);
        assert_eq!(app.state.position, Coord::new(-1, 2));
        press(&mut app, &[KeyInput::Up]);
        assert_eq!(app.state.position, Coord::new(-1, 1));
    }

    #[test]
    fn test_npc_talks_on_arrival() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        press(&mut app, &[KeyInput::Down]);
        assert_eq!(app.state.position, Coord::new(0, 1));
        assert!(app.messages[0].contains("youngster"));
        assert_eq!(app.messages[1], "Quest: Defeat 3 Slimes [0/3]");
    }

    #[test]
    fn test_class_offer_accept_and_decline() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        press(&mut app, &[KeyInput::Right]);
        assert_eq!(
            app.screen,
            Screen::ClassOffer {
                at: Coord::new(1, 0),
                class: ClassPath::Swordsman
            }
        );
        press(&mut app, &[KeyInput::Char('n')]);
        assert_eq!(app.screen, Screen::Overworld);
        assert_eq!(app.state.stats.class_path, None);

        press(&mut app, &[KeyInput::Left, KeyInput::Left]);
        press(&mut app, &[KeyInput::Char('y')]);
        assert_eq!(app.state.stats.class_path, Some(ClassPath::Mage));
        assert_eq!(app.state.skills().len(), 2);
    }

    #[test]
    fn test_bush_step_can_start_battle() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.state.position = Coord::new(1, 0);
        let mut rng = StepRng::new(0, 0);
        let action = app.handle_key(KeyInput::Down, &mut rng);
        assert_eq!(
            action,
            AppAction::StartBattle(Encounter {
                species: "Slime",
                level_range: LevelRange::new(1, 3)
            })
        );
    }

    #[test]
    fn test_upgrade_screen_spends_points() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.state.stats.skill_points = 1;
        press(&mut app, &[KeyInput::Char('u'), KeyInput::Char('2')]);
        assert_eq!(app.state.stats.attack, 6);
        assert_eq!(app.state.stats.skill_points, 0);

        press(&mut app, &[KeyInput::Down, KeyInput::Enter]);
        assert_eq!(app.messages, vec!["Not enough skill points.".to_string()]);
        press(&mut app, &[KeyInput::Char('b')]);
        assert_eq!(app.screen, Screen::Overworld);
    }

    #[test]
    fn test_start_menu_wraps() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(SaveManager::at(dir.path().join("savegame.json")));
        press(&mut app, &[KeyInput::Up]);
        assert_eq!(app.screen, Screen::StartMenu { selected: 2 });
    }

    #[test]
    fn test_skill_list_wraps() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.state.stats.class_path = Some(ClassPath::Mage);
        press(&mut app, &[KeyInput::Char('p'), KeyInput::Up]);
        assert_eq!(app.screen, Screen::SkillList { selected: 1 });
        press(&mut app, &[KeyInput::Down]);
        assert_eq!(app.screen, Screen::SkillList { selected: 0 });
        press(&mut app, &[KeyInput::Esc]);
        assert_eq!(app.screen, Screen::Overworld);
    }

    #[test]
    fn test_inventory_toggles_wield() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        press(&mut app, &[KeyInput::Char('i'), KeyInput::Char('1')]);
        assert_eq!(app.state.stats.wielded_item_index, None);
        press(&mut app, &[KeyInput::Char('1'), KeyInput::Char('9')]);
        assert_eq!(app.state.stats.wielded_item_index, Some(0));
    }

    #[test]
    fn test_rename_flow() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        press(&mut app, &[KeyInput::Char('k')]);
        assert_eq!(app.screen, Screen::Overworld);

        app.state.stats.class_path = Some(ClassPath::Cleric);
        let mut keys = vec![KeyInput::Char('k'), KeyInput::Char('2')];
        keys.extend("Glow!".chars().map(KeyInput::Char));
        keys.extend([KeyInput::Backspace, KeyInput::Enter]);
        press(&mut app, &keys);

        assert_eq!(app.state.skills()[1].display_name, "Glow");
        assert_eq!(app.state.skills()[1].id, SkillId::Purify);
    }

    #[test]
    fn test_rename_input_caps_length() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.screen = Screen::RenameInput {
            skill: SkillId::Heal,
            buffer: String::new(),
        };
        let keys: Vec<KeyInput> = std::iter::repeat(KeyInput::Char('x')).take(30).collect();
        press(&mut app, &keys);
        match &app.screen {
            Screen::RenameInput { buffer, .. } => assert_eq!(buffer.len(), MAX_SKILL_NAME_LEN),
            other => panic!("unexpected screen {:?}", other),
        }
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        press(&mut app, &[KeyInput::Down, KeyInput::Char('s')]);
        assert_eq!(app.messages, vec!["Game saved.".to_string()]);

        app.state.position = Coord::new(40, 40);
        press(&mut app, &[KeyInput::Char('l')]);
        assert_eq!(app.state.position, Coord::new(0, 1));
        assert_eq!(app.messages, vec!["Game loaded.".to_string()]);
    }

    #[test]
    fn test_defeat_respawns_at_origin() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.state.position = Coord::new(10, 10);
        app.state.stats.hp = 1;
        app.state.stats.xp = 8;
        let encounter = Encounter {
            species: "Orc",
            level_range: LevelRange::new(8, 12),
        };
        let mut surface = ScriptedActions::new(vec![PlayerInput::Attack]);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        app.run_encounter(&encounter, &mut surface, &mut rng);
        assert_eq!(app.state.position, Coord::ORIGIN);
        assert_eq!(app.state.stats.xp, 4);
        assert!(matches!(app.screen, Screen::BattleResult { .. }));

        press(&mut app, &[KeyInput::Char('x')]);
        assert_eq!(app.screen, Screen::Overworld);
    }
}
