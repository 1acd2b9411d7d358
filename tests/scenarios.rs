//! End-to-end gameplay scenarios through the public API

use asteroid_run::consts::SIM_DT;
use asteroid_run::persistence::MemoryStore;
use asteroid_run::sim::{
    ContactOutcome, GameEvent, GameState, Obstacle, ObstacleId, ObstacleLife, RetireReason,
    SessionPhase, TickInput, Vitality, resolve_contact, tick,
};
use asteroid_run::tuning::{ObstacleTemplate, Tuning};
use asteroid_run::{BestScore, Session};
use glam::{Quat, Vec3};

fn quiet_tuning() -> Tuning {
    let mut tuning = Tuning::default();
    tuning.obstacle_templates.clear();
    tuning
}

fn place(state: &mut GameState, mass: f32, offset: Vec3) -> ObstacleId {
    let template = ObstacleTemplate::new("rock", mass, 1.0);
    let at = state.craft.position + offset;
    state.add_obstacle(Obstacle::new(0, &template, at, Quat::IDENTITY, 1.0, Vec3::Y, 45.0))
}

fn run(state: &mut GameState, ticks: usize) {
    for _ in 0..ticks {
        tick(state, &TickInput::default(), SIM_DT);
    }
}

#[test]
fn test_frontal_hit_costs_mass_in_health() {
    let mut state = GameState::new(1, quiet_tuning());
    place(&mut state, 5.0, Vec3::new(0.0, 0.0, 1.5));
    run(&mut state, 1);

    assert_eq!(state.health.current(), 45.0);
    assert_eq!(state.health.percent(), 90);
    assert!(state.events().contains(&GameEvent::HealthChanged {
        current: 45.0,
        max: 50.0,
        percent: 90
    }));
}

#[test]
fn test_cumulative_hits_kill_once_and_freeze_score() {
    let mut state = GameState::new(2, quiet_tuning());
    run(&mut state, 120);

    // Ten mass-5 hits, spaced so each is its own contact
    for _ in 0..10 {
        place(&mut state, 5.0, Vec3::new(0.0, 0.0, 1.5));
        run(&mut state, 30);
    }
    assert_eq!(state.health.current(), 0.0);
    assert_eq!(state.health.vitality(), Vitality::Dead);
    let score_at_death = state.sequencer.final_score().unwrap();

    run(&mut state, 200);
    assert_eq!(state.phase, SessionPhase::GameOver);
    assert_eq!(state.score(), score_at_death);

    let events = state.drain_events();
    let disabled = events.iter().filter(|e| **e == GameEvent::CraftDisabled).count();
    let reports: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::SessionOver { score } => Some(*score),
            _ => None,
        })
        .collect();
    assert_eq!(disabled, 1);
    assert_eq!(reports, vec![score_at_death]);
}

#[test]
fn test_contact_from_behind_is_harmless_and_rearms() {
    let mut state = GameState::new(3, quiet_tuning());
    let id = place(&mut state, 5.0, Vec3::new(0.0, 0.5, -1.0));

    assert_eq!(resolve_contact(&mut state, id), ContactOutcome::Grazed);
    let obstacle = state.obstacle(id).unwrap();
    assert_eq!(state.health.current(), 50.0);
    assert!(!obstacle.hit_latch);
    assert_eq!(obstacle.life, ObstacleLife::Active);

    // Later contact from a valid angle still counts
    state.obstacles.get_mut(id).unwrap().position = state.craft.position + Vec3::new(0.0, 0.0, 1.0);
    assert_eq!(resolve_contact(&mut state, id), ContactOutcome::Hit { damage: 5.0 });
    assert_eq!(state.health.current(), 45.0);
}

#[test]
fn test_full_field_skips_spawns() {
    let mut tuning = Tuning::default();
    tuning.spawner.max_obstacles = 3;
    let mut state = GameState::new(4, tuning);

    // Park three hazards far ahead so they are neither hit nor passed
    for x in [-4.0, 0.0, 4.0] {
        place(&mut state, 5.0, Vec3::new(x, 2.5, 500.0));
    }
    assert_eq!(state.active_obstacle_count(), 3);

    run(&mut state, 240);
    assert_eq!(state.obstacles.len(), 3);
    assert_eq!(state.stats.spawned, 0);
    assert!(state.stats.skipped_at_cap >= 3);
}

#[test]
fn test_passed_obstacle_retires_without_damage() {
    let mut state = GameState::new(5, quiet_tuning());
    let id = place(&mut state, 5.0, Vec3::new(4.5, 2.5, 2.0));

    // 15 units of clearance behind at ~10 units/s
    run(&mut state, 120 * 2);
    assert!(state.obstacle(id).is_none());
    assert_eq!(state.health.current(), 50.0);
    assert_eq!(state.stats.passed, 1);
    assert!(state.events().contains(&GameEvent::ObstacleRetired {
        id,
        reason: RetireReason::Passed
    }));
}

/// Fly a session with `max_health` 5 until the craft has covered `distance`,
/// then crash it and let the game over play out.
fn session_scoring(session: &mut Session, distance: f32, seed: u64) -> u32 {
    session.start(seed);
    while session.game().unwrap().craft.position.z < distance {
        session.update(1.0 / 60.0, &TickInput::default());
    }
    let state = session.game_mut().unwrap();
    place(state, 5.0, Vec3::new(0.0, 0.0, 1.5));
    while !session.is_game_over() {
        session.update(1.0 / 60.0, &TickInput::default());
    }
    session.game().unwrap().score()
}

#[test]
fn test_best_score_only_moves_up() {
    let mut tuning = quiet_tuning();
    tuning.health.max_health = 5.0;
    let store = MemoryStore::with_best(120);
    let mut session = Session::new(tuning, Box::new(store.clone()));
    assert_eq!(session.best(), BestScore::new(120));

    let low = session_scoring(&mut session, 95.0, 1);
    assert!(low < 120);
    assert_eq!(store.get(), Some(120));
    assert!(!session.results.new_best);
    assert_eq!(session.results.best_text(), "Best Flight Distance: 120");

    let high = session_scoring(&mut session, 150.0, 2);
    assert!(high >= 150);
    assert_eq!(store.get(), Some(high));
    assert_eq!(session.results.distance_text(), format!("Flight Distance: {high} (BEST)"));
}
