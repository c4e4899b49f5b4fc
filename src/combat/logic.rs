//! Turn-based combat engine.
//!
//! A round walks `AwaitingAction -> ResolvingPlayer -> ResolvingMonster ->
//! TickingCooldowns` and ends in `AwaitingAction`, `Victory` or `Defeat`.
//! The only suspension point is the timed action read in `AwaitingAction`,
//! delegated to a [`CombatSurface`].

use rand::Rng;
use std::collections::BTreeMap;
use std::time::Duration;

use super::effects::{base_damage, plain_attack, resolve, Empower, Outcome};
use super::skills::{Skill, SkillId};
use super::types::{spawn, LevelRange, Monster, SpawnError};
use crate::character::stats::Stats;
use crate::core::constants::{INPUT_WINDOW_MS, MANA_REGEN_PER_TURN};
use crate::core::game_state::GameState;
use crate::core::progression::{apply_death_penalty, gain_xp};
use crate::quests::logic::record_kill;
use crate::quests::types::Coord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatPhase {
    AwaitingAction,
    ResolvingPlayer,
    ResolvingMonster,
    TickingCooldowns,
    Victory,
    Defeat,
}

impl CombatPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, CombatPhase::Victory | CombatPhase::Defeat)
    }
}

/// The action repeated each round until the player picks another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Attack,
    Skill(SkillId),
}

/// Result of one timed input read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    Attack,
    /// Zero-based index into the current skill list
    Skill(usize),
    /// A key that means nothing in combat
    Unrecognized,
    /// The window closed without a key
    NoInput,
}

/// Something that happened during a round.
#[derive(Debug, Clone, PartialEq)]
pub enum CombatEvent {
    PlayerAttack { damage: u32, empowered: bool },
    SkillUsed {
        skill: SkillId,
        outcome: Outcome,
        message: String,
    },
    SkillUnavailable { name: String, damage: u32 },
    UnknownAction { damage: u32 },
    MonsterAttack { name: String, damage: u32 },
}

impl CombatEvent {
    pub fn message(&self) -> String {
        match self {
            CombatEvent::PlayerAttack {
                damage,
                empowered: true,
            } => format!("Empowered strike! You attack for {} damage!", damage),
            CombatEvent::PlayerAttack { damage, .. } => {
                format!("You attack for {} damage!", damage)
            }
            CombatEvent::SkillUsed { message, .. } => message.clone(),
            CombatEvent::SkillUnavailable { name, damage } => {
                format!("{} unavailable, you attack for {} damage!", name, damage)
            }
            CombatEvent::UnknownAction { damage } => {
                format!("(Unknown skill) You attack for {} damage.", damage)
            }
            CombatEvent::MonsterAttack { name, damage } => {
                format!("{} hits you for {} damage!", name, damage)
            }
        }
    }
}

/// Rendering and input collaborator for a battle.
pub trait CombatSurface {
    /// Shows the current state of the fight.
    fn show(&mut self, view: &CombatView<'_>);

    /// Waits up to `window` for a combat key.
    fn read_action(&mut self, window: Duration) -> PlayerInput;

    /// Called after each resolved round.
    fn round_pause(&mut self) {}
}

/// Read-only snapshot handed to a [`CombatSurface`].
#[derive(Debug, Clone)]
pub struct CombatView<'a> {
    pub monster: &'a Monster,
    pub monster_hp: u32,
    pub player_hp: u32,
    /// Hp at the start of the battle
    pub player_max_hp: u32,
    pub current_mana: u32,
    pub max_mana: u32,
    pub skills: &'a [Skill],
    pub cooldowns: &'a BTreeMap<SkillId, u32>,
    pub last_action: Action,
    pub empowered: bool,
    pub log: &'a [CombatEvent],
    pub turn: u32,
}

/// State of a single encounter.
#[derive(Debug, Clone, PartialEq)]
pub struct CombatSession {
    pub monster: Monster,
    pub player_hp: u32,
    pub monster_hp: u32,
    pub cooldowns: BTreeMap<SkillId, u32>,
    pub last_action: Action,
    pub empower: Empower,
    pub phase: CombatPhase,
    pub turn: u32,
}

impl CombatSession {
    pub fn new(monster: Monster, stats: &Stats, skills: &[Skill]) -> Self {
        Self {
            monster_hp: monster.hp,
            monster,
            player_hp: stats.hp,
            cooldowns: skills.iter().map(|s| (s.id, 0)).collect(),
            last_action: Action::Attack,
            empower: Empower::neutral(),
            phase: CombatPhase::AwaitingAction,
            turn: 0,
        }
    }

    pub fn cooldown(&self, id: SkillId) -> u32 {
        self.cooldowns.get(&id).copied().unwrap_or(0)
    }

    pub fn view<'a>(
        &'a self,
        stats: &Stats,
        skills: &'a [Skill],
        log: &'a [CombatEvent],
    ) -> CombatView<'a> {
        CombatView {
            monster: &self.monster,
            monster_hp: self.monster_hp,
            player_hp: self.player_hp,
            player_max_hp: stats.hp,
            current_mana: stats.current_mana,
            max_mana: stats.mana,
            skills,
            cooldowns: &self.cooldowns,
            last_action: self.last_action,
            empowered: self.empower.is_active(),
            log,
            turn: self.turn,
        }
    }

    /// AwaitingAction: a recognized key replaces the remembered action,
    /// anything else repeats it.
    pub fn select_action(&mut self, input: PlayerInput, skills: &[Skill]) {
        match input {
            PlayerInput::Attack => self.last_action = Action::Attack,
            PlayerInput::Skill(index) => {
                if let Some(skill) = skills.get(index) {
                    self.last_action = Action::Skill(skill.id);
                }
            }
            PlayerInput::Unrecognized | PlayerInput::NoInput => {}
        }
        self.phase = CombatPhase::ResolvingPlayer;
    }

    fn hit_monster(&mut self, damage: u32) {
        self.monster_hp = self.monster_hp.saturating_sub(damage);
    }

    /// Plain hit used when a skill cannot run. A pending empower stays armed
    /// for the next real attack.
    fn fallback_attack(&mut self, stats: &Stats, weapon_damage: u32) -> u32 {
        let damage = base_damage(stats.attack, weapon_damage, self.monster.defense);
        self.hit_monster(damage);
        damage
    }

    /// ResolvingPlayer: applies the remembered action exactly once.
    pub fn resolve_player(
        &mut self,
        stats: &mut Stats,
        weapon_damage: u32,
        skills: &[Skill],
    ) -> CombatEvent {
        let event = match self.last_action {
            Action::Attack => {
                let (damage, empowered) =
                    plain_attack(stats, weapon_damage, &self.monster, &mut self.empower);
                self.hit_monster(damage);
                CombatEvent::PlayerAttack { damage, empowered }
            }
            Action::Skill(id) => {
                // Skill actions fall back to attacking on the following round
                self.last_action = Action::Attack;
                match skills.iter().find(|s| s.id == id) {
                    None => {
                        let damage = self.fallback_attack(stats, weapon_damage);
                        CombatEvent::UnknownAction { damage }
                    }
                    Some(skill) if !self.can_use(skill, stats) => {
                        let damage = self.fallback_attack(stats, weapon_damage);
                        CombatEvent::SkillUnavailable {
                            name: skill.display_name.clone(),
                            damage,
                        }
                    }
                    Some(skill) => {
                        stats.current_mana -= skill.mana_cost;
                        self.cooldowns.insert(skill.id, skill.cooldown);

                        let report = resolve(skill, stats, &mut self.monster, &mut self.empower);
                        match report.outcome {
                            Outcome::Damage(damage) => self.hit_monster(damage),
                            Outcome::Heal(amount) => self.player_hp += amount,
                            Outcome::MessageOnly => {}
                        }
                        CombatEvent::SkillUsed {
                            skill: skill.id,
                            outcome: report.outcome,
                            message: report.message,
                        }
                    }
                }
            }
        };
        self.phase = CombatPhase::ResolvingMonster;
        event
    }

    /// Level, mana and cooldown must all allow the skill.
    pub fn can_use(&self, skill: &Skill, stats: &Stats) -> bool {
        stats.level >= skill.level_required
            && stats.current_mana >= skill.mana_cost
            && self.cooldown(skill.id) == 0
    }

    /// ResolvingMonster: a living monster hits back for at least 1.
    pub fn resolve_monster(&mut self, stats: &Stats) -> Option<CombatEvent> {
        self.phase = CombatPhase::TickingCooldowns;
        if self.monster_hp == 0 {
            return None;
        }
        let damage = self.monster.attack.saturating_sub(stats.defense).max(1);
        self.player_hp = self.player_hp.saturating_sub(damage);
        Some(CombatEvent::MonsterAttack {
            name: self.monster.name.clone(),
            damage,
        })
    }

    /// TickingCooldowns: runs every round, including the last one.
    pub fn tick(&mut self, stats: &mut Stats) -> CombatPhase {
        for remaining in self.cooldowns.values_mut() {
            *remaining = remaining.saturating_sub(1);
        }
        stats.regen_mana(MANA_REGEN_PER_TURN);
        self.turn += 1;

        self.phase = if self.player_hp == 0 {
            CombatPhase::Defeat
        } else if self.monster_hp == 0 {
            CombatPhase::Victory
        } else {
            CombatPhase::AwaitingAction
        };
        self.phase
    }

    /// Plays one full round from a given input.
    pub fn play_round(
        &mut self,
        input: PlayerInput,
        stats: &mut Stats,
        weapon_damage: u32,
        skills: &[Skill],
    ) -> Vec<CombatEvent> {
        self.select_action(input, skills);
        let mut events = vec![self.resolve_player(stats, weapon_damage, skills)];
        events.extend(self.resolve_monster(stats));
        self.tick(stats);
        events
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

/// Summary of a finished encounter for the overworld.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleReport {
    pub monster_name: String,
    pub monster_level: u32,
    pub outcome: BattleOutcome,
    pub turns: u32,
    pub xp_gained: u32,
    pub xp_lost: u32,
    pub leveled_up: bool,
    pub level: u32,
    /// NPCs whose kill quest this battle completed
    pub completed_quests: Vec<Coord>,
}

impl BattleReport {
    /// A lost battle sends the player back to the origin.
    pub fn should_respawn(&self) -> bool {
        self.outcome == BattleOutcome::Defeat
    }

    pub fn lines(&self) -> Vec<String> {
        match self.outcome {
            BattleOutcome::Victory => {
                let mut lines = vec![format!(
                    "You defeated the {}! You gained {} XP.",
                    self.monster_name, self.xp_gained
                )];
                if self.leveled_up {
                    lines.push(format!(
                        "You leveled up to level {}! +5 skill points!",
                        self.level
                    ));
                }
                if !self.completed_quests.is_empty() {
                    lines.push("A quest objective is complete. Return to the quest giver.".into());
                }
                lines
            }
            BattleOutcome::Defeat => vec![
                format!("You were defeated by the {}...", self.monster_name),
                format!(
                    "You lost {} XP and will respawn at the starting point.",
                    self.xp_lost
                ),
            ],
        }
    }
}

/// Hands a finished session to progression and the quest log.
pub fn settle(state: &mut GameState, session: &CombatSession) -> BattleReport {
    let monster = &session.monster;
    let mut report = BattleReport {
        monster_name: monster.name.clone(),
        monster_level: monster.level,
        outcome: BattleOutcome::Victory,
        turns: session.turn,
        xp_gained: 0,
        xp_lost: 0,
        leveled_up: false,
        level: state.stats.level,
        completed_quests: Vec::new(),
    };

    if session.phase == CombatPhase::Defeat {
        report.outcome = BattleOutcome::Defeat;
        report.xp_lost = apply_death_penalty(&mut state.stats);
        tracing::info!(monster = %monster.name, xp_lost = report.xp_lost, "player defeated");
    } else {
        report.xp_gained = monster.kill_xp();
        report.leveled_up = gain_xp(&mut state.stats, report.xp_gained);
        report.completed_quests = record_kill(&mut state.npcs, monster.base_name());
        tracing::info!(
            monster = %monster.name,
            xp = report.xp_gained,
            turns = session.turn,
            "monster defeated"
        );
    }
    report.level = state.stats.level;
    report
}

/// Fights one encounter to the end.
///
/// Fails only when the zone hands over an inverted level range.
pub fn run_battle(
    state: &mut GameState,
    species: &str,
    range: LevelRange,
    surface: &mut impl CombatSurface,
    rng: &mut impl Rng,
) -> Result<BattleReport, SpawnError> {
    let monster = spawn(species, range, rng)?;
    tracing::info!(
        monster = %monster.name,
        level = monster.level,
        elite = monster.elite,
        "encounter started"
    );

    let skills = state.skills();
    let weapon_damage = state.weapon_damage();
    let mut session = CombatSession::new(monster, &state.stats, &skills);
    let mut log = Vec::new();
    let window = Duration::from_millis(INPUT_WINDOW_MS);

    while !session.phase.is_terminal() {
        surface.show(&session.view(&state.stats, &skills, &log));
        let input = surface.read_action(window);
        log = session.play_round(input, &mut state.stats, weapon_damage, &skills);
        surface.show(&session.view(&state.stats, &skills, &log));
        surface.round_pause();
    }

    Ok(settle(state, &session))
}

/// Replays a fixed list of inputs, then reports no input forever.
#[derive(Debug, Clone, Default)]
pub struct ScriptedActions {
    inputs: Vec<PlayerInput>,
    next: usize,
    pub frames_shown: usize,
}

impl ScriptedActions {
    pub fn new(inputs: Vec<PlayerInput>) -> Self {
        Self {
            inputs,
            next: 0,
            frames_shown: 0,
        }
    }
}

impl CombatSurface for ScriptedActions {
    fn show(&mut self, _view: &CombatView<'_>) {
        self.frames_shown += 1;
    }

    fn read_action(&mut self, _window: Duration) -> PlayerInput {
        let input = self
            .inputs
            .get(self.next)
            .copied()
            .unwrap_or(PlayerInput::NoInput);
        self.next += 1;
        input
    }
}
