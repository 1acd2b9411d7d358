//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by slot index)
//! - No rendering, storage or platform dependencies

pub mod arena;
pub mod autopilot;
pub mod collision;
pub mod craft;
pub mod health;
pub mod obstacle;
pub mod sampling;
pub mod sequence;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod timers;

pub use arena::{Arena, SlotId};
pub use collision::{ContactOutcome, HitJudgement, detect_contacts, judge_contact, resolve_contact};
pub use craft::{Craft, CraftLife};
pub use health::{DamageOutcome, HealthTracker, Vitality};
pub use obstacle::{Classification, Obstacle, ObstacleLife};
pub use sequence::{GameOverSequencer, SequenceStage};
pub use snapshot::Snapshot;
pub use spawner::{ObstacleSpawner, SpawnAttempt};
pub use state::{
    EffectKind, GameEvent, GameState, ObstacleId, RetireReason, SessionPhase, SessionStats,
};
pub use tick::{TickInput, tick};
pub use timers::{Clock, TimerKey, Timers};
