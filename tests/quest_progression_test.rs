//! Integration test: kills feeding quests, rewards and class adoption
//!
//! Runs the path a player takes through the village: win battles, return to
//! the quest giver, get paid, repeat, and pick a class path.

use bramble::character::stats::ClassPath;
use bramble::combat::logic::{run_battle, settle, CombatPhase, CombatSession, ScriptedActions};
use bramble::combat::types::{LevelRange, Monster, Species};
use bramble::core::game_state::GameState;
use bramble::quests::logic::{accept_class, visit_npc, QuestStatus, RewardGrant};
use bramble::quests::types::Coord;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const SLIME_NPC: Coord = Coord::new(0, 1);
const ORC_NPC: Coord = Coord::new(-5, -4);
const MAGE_NPC: Coord = Coord::new(-1, 0);
const CLERIC_NPC: Coord = Coord::new(0, -1);

/// Settles a won battle against `monster` without playing it out.
fn win_against(state: &mut GameState, monster: Monster) {
    let mut session = CombatSession::new(monster, &state.stats, &state.skills());
    session.monster_hp = 0;
    session.phase = CombatPhase::Victory;
    settle(state, &session);
}

fn reward_given(state: &GameState, at: Coord) -> bool {
    state.npcs.kill_quest(at).unwrap().reward_given
}

// =============================================================================
// Kill quests
// =============================================================================

#[test]
fn test_slime_quest_pays_once_per_cycle() {
    let mut state = GameState::new();

    for _ in 0..3 {
        win_against(&mut state, Monster::new(Species::Slime, 1));
    }
    // 3 kills of 7 XP each level the player once
    assert_eq!(state.stats.level, 2);
    assert_eq!(state.stats.xp, 11);
    assert!(state.npcs.kill_quest(SLIME_NPC).unwrap().completed);
    assert!(!reward_given(&state, SLIME_NPC));

    let visit = visit_npc(&mut state.npcs, SLIME_NPC, &mut state.stats).unwrap();
    assert_eq!(
        visit.status,
        QuestStatus::RewardGranted(RewardGrant {
            xp: 20,
            skill_points: 0,
            leveled_up: true,
        })
    );
    assert!(reward_given(&state, SLIME_NPC));
    assert_eq!(state.npcs.kill_quest(SLIME_NPC).unwrap().progress, 0);

    // A second visit pays nothing
    let again = visit_npc(&mut state.npcs, SLIME_NPC, &mut state.stats).unwrap();
    assert!(matches!(again.status, QuestStatus::KillProgress { progress: 0, .. }));

    // The next kill opens a new cycle
    win_against(&mut state, Monster::new(Species::Slime, 1));
    assert!(!reward_given(&state, SLIME_NPC));
    win_against(&mut state, Monster::new(Species::Slime, 1));
    win_against(&mut state, Monster::new(Species::Slime, 1));
    let visit = visit_npc(&mut state.npcs, SLIME_NPC, &mut state.stats).unwrap();
    assert!(matches!(visit.status, QuestStatus::RewardGranted(_)));
    assert!(reward_given(&state, SLIME_NPC));
}

#[test]
fn test_elite_kill_counts_toward_base_species() {
    let mut state = GameState::new();
    let mut orc = Monster::new(Species::Orc, 10);
    orc.make_elite();

    win_against(&mut state, orc);

    let quest = state.npcs.kill_quest(ORC_NPC).unwrap();
    assert!(quest.completed);

    let skill_points = state.stats.skill_points;
    let visit = visit_npc(&mut state.npcs, ORC_NPC, &mut state.stats).unwrap();
    match visit.status {
        QuestStatus::RewardGranted(grant) => {
            assert_eq!(grant.xp, 100);
            assert_eq!(grant.skill_points, 1);
        }
        other => panic!("expected a reward, got {:?}", other),
    }
    assert!(state.stats.skill_points >= skill_points + 1);
}

#[test]
fn test_defeat_does_not_advance_quests() {
    let mut state = GameState::new();
    let mut session =
        CombatSession::new(Monster::new(Species::Slime, 1), &state.stats, &state.skills());
    session.player_hp = 0;
    session.phase = CombatPhase::Defeat;
    settle(&mut state, &session);

    assert_eq!(state.npcs.kill_quest(SLIME_NPC).unwrap().progress, 0);
}

#[test]
fn test_played_battles_complete_slime_quest() {
    let mut state = GameState::new();
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    for _ in 0..3 {
        let mut surface = ScriptedActions::default();
        let report = run_battle(
            &mut state,
            "Slime",
            LevelRange::single(1),
            &mut surface,
            &mut rng,
        )
        .unwrap();
        assert!(!report.should_respawn());
        assert!(surface.frames_shown > 0);
    }

    assert!(state.npcs.kill_quest(SLIME_NPC).unwrap().completed);
}

// =============================================================================
// Class quests
// =============================================================================

#[test]
fn test_class_offer_then_accept() {
    let mut state = GameState::new();

    let visit = visit_npc(&mut state.npcs, MAGE_NPC, &mut state.stats).unwrap();
    assert_eq!(visit.status, QuestStatus::ClassOffer(ClassPath::Mage));

    assert_eq!(
        accept_class(&mut state.npcs, MAGE_NPC, &mut state.stats),
        Some(ClassPath::Mage)
    );
    assert_eq!(state.stats.class_path, Some(ClassPath::Mage));
    assert_eq!(state.skills().len(), 2);

    let visit = visit_npc(&mut state.npcs, MAGE_NPC, &mut state.stats).unwrap();
    assert_eq!(visit.status, QuestStatus::ClassContinue(ClassPath::Mage));
}

#[test]
fn test_class_path_is_permanent() {
    let mut state = GameState::new();
    accept_class(&mut state.npcs, MAGE_NPC, &mut state.stats);

    let visit = visit_npc(&mut state.npcs, CLERIC_NPC, &mut state.stats).unwrap();
    assert_eq!(
        visit.status,
        QuestStatus::ClassClosed {
            chosen: ClassPath::Mage,
            offered: ClassPath::Cleric,
        }
    );
    assert_eq!(accept_class(&mut state.npcs, CLERIC_NPC, &mut state.stats), None);
    assert_eq!(state.stats.class_path, Some(ClassPath::Mage));
}

#[test]
fn test_accepting_at_a_kill_npc_does_nothing() {
    let mut state = GameState::new();
    assert_eq!(accept_class(&mut state.npcs, SLIME_NPC, &mut state.stats), None);
    assert_eq!(accept_class(&mut state.npcs, Coord::new(7, 7), &mut state.stats), None);
    assert_eq!(state.stats.class_path, None);
}
