//! Fixed timestep simulation tick
//!
//! One call advances every component once, in dependency order:
//! spawner -> obstacles -> craft motion -> contacts -> health/game over.

use super::autopilot;
use super::collision::{ContactOutcome, detect_contacts, resolve_contact};
use super::spawner::SpawnAttempt;
use super::state::{GameEvent, GameState, RetireReason, SessionPhase};
use super::timers::{Clock, TimerKey};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Lateral axis, nominally [-1, 1]
    pub lateral: f32,
    /// Vertical axis, nominally [-1, 1]
    pub vertical: f32,
    /// Pause toggle (one-shot)
    pub pause: bool,
    /// Idle/demo mode - autopilot flies the craft
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // The unscaled clock keeps running through pause and game over
    for key in state.timers.advance(Clock::Unscaled, dt) {
        if key == TimerKey::ResultsFade {
            log::debug!("Results panel fade complete");
        }
    }

    if input.pause {
        match state.phase {
            SessionPhase::Playing => {
                state.phase = SessionPhase::Paused;
                log::info!("Paused");
                return;
            }
            SessionPhase::Paused => {
                state.phase = SessionPhase::Playing;
                log::info!("Resumed");
            }
            SessionPhase::GameOver => {}
        }
    }

    if state.phase != SessionPhase::Playing {
        return;
    }

    let (lateral, vertical) = if input.idle_mode {
        autopilot::steer(state)
    } else {
        (input.lateral, input.vertical)
    };

    state.time_ticks += 1;
    state.elapsed += dt;

    spawn_obstacles(state, dt);
    update_obstacles(state, dt);
    update_craft(state, lateral, vertical, dt);
    resolve_contacts(state);

    if !state.health.is_alive() {
        state.sequencer.begin(
            &mut state.craft,
            &state.tuning.sequence,
            &mut state.timers,
            &mut state.events,
        );
    }

    advance_scaled_timers(state, dt);
}

fn spawn_obstacles(state: &mut GameState, dt: f32) {
    let active = state.active_obstacle_count();
    let attempt = state.spawner.update(
        dt,
        active,
        state.craft.position.z,
        &state.tuning.spawner,
        &state.tuning.obstacle,
        &state.tuning.obstacle_templates,
        &mut state.rng,
    );

    match attempt {
        SpawnAttempt::Spawned(obstacle) => {
            state.add_obstacle(obstacle);
            state.stats.spawned += 1;
        }
        SpawnAttempt::AtCapacity => {
            state.stats.skipped_at_cap += 1;
            log::trace!("Spawn skipped: {active} obstacles at cap");
        }
        SpawnAttempt::Waiting | SpawnAttempt::Inert => {}
    }
}

fn update_obstacles(state: &mut GameState, dt: f32) {
    for (_, obstacle) in state.obstacles.iter_mut() {
        obstacle.update(dt);
    }

    let craft_z = state.craft.position.z;
    let destroy_distance = state.tuning.obstacle.destroy_distance;
    let passed: Vec<_> = state
        .obstacles
        .iter()
        .filter(|(_, o)| o.has_been_passed(craft_z, destroy_distance))
        .map(|(id, _)| id)
        .collect();

    for id in passed {
        if state.retire_obstacle(id, RetireReason::Passed) {
            state.stats.passed += 1;
        }
    }
}

fn update_craft(state: &mut GameState, lateral: f32, vertical: f32, dt: f32) {
    let tuning = &state.tuning.craft;
    state.craft.advance(lateral, vertical, dt, tuning);
    if state.craft.recover_indicator(dt, tuning.recover_speed) {
        state.events.push(GameEvent::DamageIndicator { on: false });
    }
}

fn resolve_contacts(state: &mut GameState) {
    let began = detect_contacts(&state.craft, &mut state.obstacles);
    for id in began {
        if let ContactOutcome::Hit { damage } = resolve_contact(state, id) {
            log::debug!(
                "Frontal hit for {damage}, integrity {}%",
                state.health.percent()
            );
        }
    }
}

fn advance_scaled_timers(state: &mut GameState, dt: f32) {
    for key in state.timers.advance(Clock::Scaled, dt) {
        match key {
            TimerKey::RetireObstacle(id) => {
                state.retire_obstacle(id, RetireReason::AfterHit);
            }
            TimerKey::Destruction => {
                if let Some(score) = state.sequencer.finish(
                    &state.tuning.sequence,
                    &mut state.timers,
                    &mut state.events,
                ) {
                    state.phase = SessionPhase::GameOver;
                    log::info!(
                        "Game over: distance {score} after {:.1}s ({} hits, {} grazes)",
                        state.elapsed,
                        state.stats.hits,
                        state.stats.grazes
                    );
                }
            }
            TimerKey::ResultsFade | TimerKey::HitFlash => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::obstacle::{Obstacle, ObstacleLife};
    use crate::sim::sequence::SequenceStage;
    use crate::tuning::{ObstacleTemplate, Tuning};
    use glam::{Quat, Vec3};
    use proptest::prelude::*;

    /// Tuning with no templates so the field only holds what a test places
    fn quiet_tuning() -> Tuning {
        let mut tuning = Tuning::default();
        tuning.obstacle_templates.clear();
        tuning
    }

    fn place(state: &mut GameState, mass: f32, at: Vec3) -> crate::sim::ObstacleId {
        let template = ObstacleTemplate::new("test", mass, 1.0);
        state.add_obstacle(Obstacle::new(0, &template, at, Quat::IDENTITY, 1.0, Vec3::Y, 30.0))
    }

    fn run(state: &mut GameState, ticks: usize) {
        let input = TickInput::default();
        for _ in 0..ticks {
            tick(state, &input, SIM_DT);
        }
    }

    #[test]
    fn test_negative_boundary_falls_back_to_defaults() {
        let mut tuning = quiet_tuning();
        tuning.craft.boundary_x = -1.0;
        let mut state = GameState::new(7, tuning);
        assert_eq!(state.tuning, Tuning::default());

        let input = TickInput {
            lateral: 1.0,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut state, &input, SIM_DT);
        }
        assert!(state.craft.position.x <= state.tuning.craft.boundary_x);
    }

    #[test]
    fn test_tick_moves_craft_forward() {
        let mut state = GameState::new(12345, quiet_tuning());
        run(&mut state, 120);
        assert!(state.craft.position.z > 9.9);
        assert_eq!(state.time_ticks, 120);
        assert_eq!(state.score(), state.craft.position.z.floor() as u32);
    }

    #[test]
    fn test_tick_pause() {
        let mut state = GameState::new(12345, quiet_tuning());
        run(&mut state, 10);
        let z = state.craft.position.z;

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, SessionPhase::Paused);
        run(&mut state, 50);
        assert_eq!(state.craft.position.z, z);
        assert_eq!(state.time_ticks, 10);

        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, SessionPhase::Playing);
        assert!(state.craft.position.z > z);
    }

    #[test]
    fn test_spawner_fills_field() {
        let mut state = GameState::new(99, Tuning::default());
        // 0.5s interval -> one spawn per 60 (or 61, with rounding) ticks
        run(&mut state, 60 * 5 + 10);
        assert_eq!(state.stats.spawned, 5);
        assert!(state.events().iter().any(|e| matches!(e, GameEvent::ObstacleSpawned { .. })));
    }

    #[test]
    fn test_hit_obstacle_retired_after_delay() {
        let mut state = GameState::new(1, quiet_tuning());
        let id = place(&mut state, 5.0, Vec3::new(0.0, 0.0, 1.0));
        run(&mut state, 1);
        assert_eq!(state.obstacle(id).unwrap().life, ObstacleLife::Hit);
        assert_eq!(state.health.current(), 45.0);

        // destroy_after_hit = 3s = 360 ticks, counted from the hit tick
        run(&mut state, 358);
        assert!(state.obstacle(id).is_some());
        run(&mut state, 3);
        assert!(state.obstacle(id).is_none());
        assert!(state.drain_events().contains(&GameEvent::ObstacleRetired {
            id,
            reason: RetireReason::AfterHit
        }));
    }

    #[test]
    fn test_damage_indicator_turns_off() {
        let mut state = GameState::new(1, quiet_tuning());
        place(&mut state, 5.0, Vec3::new(0.0, 0.0, 1.0));
        run(&mut state, 1);
        assert_eq!(state.craft.damage_indicator, 1.0);
        run(&mut state, 360);
        assert_eq!(state.craft.damage_indicator, 0.0);
        let offs = state
            .events()
            .iter()
            .filter(|e| **e == GameEvent::DamageIndicator { on: false })
            .count();
        assert_eq!(offs, 1);
    }

    #[test]
    fn test_death_runs_sequence_once() {
        let mut tuning = quiet_tuning();
        tuning.health.max_health = 5.0;
        let mut state = GameState::new(1, tuning);
        run(&mut state, 240);
        let z = state.craft.position.z;
        place(&mut state, 5.0, Vec3::new(0.0, 0.0, z + 1.5));

        run(&mut state, 1);
        assert!(!state.health.is_alive());
        assert!(!state.craft.is_active());
        assert_eq!(state.sequencer.stage(), SequenceStage::Destructing);
        let score_at_death = state.score();
        assert_eq!(state.phase, SessionPhase::Playing);

        // Default destruction wait is 0.6s = 72 ticks
        run(&mut state, 72);
        assert_eq!(state.phase, SessionPhase::GameOver);
        assert_eq!(state.score(), score_at_death);

        let frozen = state.time_ticks;
        run(&mut state, 200);
        assert_eq!(state.time_ticks, frozen);

        let reports: Vec<_> = state
            .events()
            .iter()
            .filter_map(|e| match e {
                GameEvent::SessionOver { score } => Some(*score),
                _ => None,
            })
            .collect();
        assert_eq!(reports, vec![score_at_death]);
    }

    #[test]
    fn test_results_fade_runs_after_freeze() {
        let mut tuning = quiet_tuning();
        tuning.health.max_health = 1.0;
        let mut state = GameState::new(1, tuning);
        place(&mut state, 5.0, Vec3::new(0.0, 0.0, 1.0));
        run(&mut state, 1 + 72);
        assert!(state.is_game_over());
        assert!(state.results_alpha() < 0.1);

        run(&mut state, 36);
        let half = state.results_alpha();
        assert!(half > 0.4 && half < 0.6);
        run(&mut state, 40);
        assert_eq!(state.results_alpha(), 1.0);
    }

    #[test]
    fn test_pause_ignored_after_game_over() {
        let mut tuning = quiet_tuning();
        tuning.health.max_health = 1.0;
        let mut state = GameState::new(1, tuning);
        place(&mut state, 5.0, Vec3::new(0.0, 0.0, 1.0));
        run(&mut state, 1 + 72);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, SessionPhase::GameOver);
    }

    #[test]
    fn test_same_seed_same_run() {
        let idle = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        let mut a = GameState::new(4242, Tuning::default());
        let mut b = GameState::new(4242, Tuning::default());
        for _ in 0..1200 {
            tick(&mut a, &idle, SIM_DT);
            tick(&mut b, &idle, SIM_DT);
        }
        assert_eq!(a.craft.position, b.craft.position);
        assert_eq!(a.health.current(), b.health.current());
        assert_eq!(a.stats, b.stats);
        assert_eq!(a.drain_events(), b.drain_events());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_session_invariants_hold(
            seed in any::<u64>(),
            inputs in proptest::collection::vec((-1.0f32..1.0, -1.0f32..1.0), 200..600)
        ) {
            let mut tuning = Tuning::default();
            tuning.spawner.max_obstacles = 6;
            tuning.spawner.spawn_interval = 0.1;
            let cap = tuning.spawner.max_obstacles;
            let mut state = GameState::new(seed, tuning);
            let mut last_score = 0;

            for (lateral, vertical) in inputs {
                let input = TickInput { lateral, vertical, ..Default::default() };
                tick(&mut state, &input, SIM_DT);

                prop_assert!(state.health.current() >= 0.0);
                prop_assert!(state.health.current() <= state.health.max());
                prop_assert!(state.active_obstacle_count() <= cap);
                prop_assert!(state.score() >= last_score);
                last_score = state.score();
            }
        }
    }
}
