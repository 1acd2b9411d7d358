//! World state and core simulation types
//!
//! One `GameState` per session: the craft record, the obstacle arena, the
//! component state, the timer scheduler and the outgoing event queue.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::{Arena, SlotId};
use super::craft::Craft;
use super::health::HealthTracker;
use super::obstacle::{Obstacle, ObstacleLife};
use super::sequence::GameOverSequencer;
use super::spawner::ObstacleSpawner;
use super::timers::{TimerKey, Timers};
use crate::tuning::Tuning;

pub type ObstacleId = SlotId;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Gameplay clock running
    Playing,
    /// Gameplay clock stopped by the player
    Paused,
    /// Score reported, gameplay frozen
    GameOver,
}

/// Visual effects the presentation layer is asked to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    HitSpark,
    Explosion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetireReason {
    /// Fell behind the craft without being hit
    Passed,
    /// Hit delay elapsed
    AfterHit,
}

/// Fire-and-forget requests to collaborators, drained by the host each frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    PlayEffect { effect: EffectKind, at: Vec3 },
    ShakeCamera { duration: f32, strength: f32 },
    HealthChanged { current: f32, max: f32, percent: u32 },
    DamageIndicator { on: bool },
    CraftDisabled,
    EngineStopped,
    ObstacleSpawned { id: ObstacleId, template: usize },
    ObstacleRetired { id: ObstacleId, reason: RetireReason },
    /// Final score, emitted once when the destruction sequence completes
    SessionOver { score: u32 },
}

/// Running counters for logging and the results screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub spawned: u32,
    pub skipped_at_cap: u32,
    pub passed: u32,
    pub hits: u32,
    pub grazes: u32,
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: SessionPhase,
    /// Gameplay ticks simulated (paused ticks excluded)
    pub time_ticks: u64,
    /// Gameplay seconds simulated
    pub elapsed: f32,
    pub craft: Craft,
    pub health: HealthTracker,
    pub obstacles: Arena<Obstacle>,
    pub spawner: ObstacleSpawner,
    pub sequencer: GameOverSequencer,
    pub timers: Timers,
    pub stats: SessionStats,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh session with the given seed and balance
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.validated_or_default();
        let craft = Craft::new(&tuning.craft);
        let health = HealthTracker::new(tuning.health.max_health);
        let spawner = ObstacleSpawner::new(&tuning.obstacle_templates);
        let capacity = tuning.spawner.max_obstacles * 2;

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: SessionPhase::Playing,
            time_ticks: 0,
            elapsed: 0.0,
            craft,
            health,
            obstacles: Arena::with_capacity(capacity),
            spawner,
            sequencer: GameOverSequencer::new(),
            timers: Timers::new(),
            stats: SessionStats::default(),
            events: Vec::new(),
        };

        // Let the HUD pick up the starting value
        let initial = state.health.changed_event();
        state.events.push(initial);
        state
    }

    /// Reinitialize everything to session-start values, keeping the tuning
    pub fn reset(&mut self, seed: u64) {
        let tuning = std::mem::take(&mut self.tuning);
        *self = Self::new(seed, tuning);
    }

    /// Current score: live distance while flying, frozen once destroyed
    pub fn score(&self) -> u32 {
        self.sequencer
            .final_score()
            .unwrap_or_else(|| self.craft.score())
    }

    /// Obstacles still classified as hazards (the population the cap applies to)
    pub fn active_obstacle_count(&self) -> usize {
        self.obstacles
            .iter()
            .filter(|(_, o)| o.life == ObstacleLife::Active)
            .count()
    }

    pub fn obstacle(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.get(id)
    }

    /// Insert an obstacle into the world
    pub fn add_obstacle(&mut self, obstacle: Obstacle) -> ObstacleId {
        let template = obstacle.template;
        let id = self.obstacles.insert(obstacle);
        self.events.push(GameEvent::ObstacleSpawned { id, template });
        id
    }

    /// Remove an obstacle from the world for good
    pub(crate) fn retire_obstacle(&mut self, id: ObstacleId, reason: RetireReason) -> bool {
        let Some(mut obstacle) = self.obstacles.remove(id) else {
            return false;
        };
        obstacle.life = ObstacleLife::Retired;
        log::debug!("Obstacle {}:{} retired ({reason:?})", id.index, id.generation);
        self.events.push(GameEvent::ObstacleRetired { id, reason });
        true
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }

    /// Results panel opacity: 0 before game over, fading to 1 on the
    /// unscaled clock afterwards
    pub fn results_alpha(&self) -> f32 {
        if self.phase != SessionPhase::GameOver {
            return 0.0;
        }
        self.timers.progress(TimerKey::ResultsFade).unwrap_or(1.0)
    }

    /// Pending collaborator requests, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(12345, Tuning::default());
        assert_eq!(state.phase, SessionPhase::Playing);
        assert_eq!(state.health.current(), 50.0);
        assert_eq!(state.score(), 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.results_alpha(), 0.0);
        assert!(matches!(state.events()[0], GameEvent::HealthChanged { percent: 100, .. }));
    }

    #[test]
    fn test_reset_restores_initial_values() {
        let mut state = GameState::new(1, Tuning::default());
        state.craft.position.z = 250.0;
        state.health.apply_damage(20.0);
        let template = state.tuning.obstacle_templates[0].clone();
        state.add_obstacle(Obstacle::new(0, &template, Vec3::Z, Quat::IDENTITY, 1.0, Vec3::Y, 30.0));

        state.reset(2);
        assert_eq!(state.seed, 2);
        assert_eq!(state.craft.position, Vec3::ZERO);
        assert_eq!(state.health.current(), state.health.max());
        assert!(state.obstacles.is_empty());
        assert!(state.timers.is_empty());
        assert_eq!(state.stats, SessionStats::default());
    }

    #[test]
    fn test_retire_is_final() {
        let mut state = GameState::new(1, Tuning::default());
        let template = state.tuning.obstacle_templates[0].clone();
        let id = state.add_obstacle(Obstacle::new(0, &template, Vec3::Z, Quat::IDENTITY, 1.0, Vec3::Y, 30.0));
        assert!(state.retire_obstacle(id, RetireReason::Passed));
        assert!(!state.retire_obstacle(id, RetireReason::AfterHit));
        assert!(state.obstacle(id).is_none());
    }

    #[test]
    fn test_events_serialize_with_type_tag() {
        let json = serde_json::to_string(&GameEvent::ShakeCamera {
            duration: 0.2,
            strength: 0.45,
        })
        .unwrap();
        assert!(json.contains("\"type\":\"shake_camera\""));
    }
}
