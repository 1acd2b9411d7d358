//! Asteroid Run - an arcade flight-avoidance game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (craft, obstacles, contacts, game over)
//! - `session`: Fixed-step host, menu/restart, best-score bookkeeping
//! - `hud`: UI-facing mirror of health and the results panel
//! - `persistence`: Best-score storage backends
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance

pub mod best_score;
pub mod error;
pub mod hud;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use best_score::BestScore;
pub use error::{Error, Result};
pub use session::Session;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the host will feed the accumulator
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// World forward axis; distance is measured along it
    pub const FORWARD: Vec3 = Vec3::Z;
}
