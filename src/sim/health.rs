//! Authoritative craft health
//!
//! Health is only ever mutated through [`HealthTracker::apply_damage`],
//! which clamps to [0, max] and flips Alive -> Dead exactly once.

use serde::{Deserialize, Serialize};

use super::state::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vitality {
    Alive,
    /// Terminal
    Dead,
}

/// Result of a damage application
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// Already dead, or a non-finite amount
    Ignored,
    /// Health dropped but the craft survives
    Damaged { remaining: f32 },
    /// This application killed the craft
    Killed,
}

#[derive(Debug, Clone)]
pub struct HealthTracker {
    current: f32,
    max: f32,
    vitality: Vitality,
}

impl HealthTracker {
    pub fn new(max: f32) -> Self {
        let max = max.max(f32::EPSILON);
        Self {
            current: max,
            max,
            vitality: Vitality::Alive,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn vitality(&self) -> Vitality {
        self.vitality
    }

    pub fn is_alive(&self) -> bool {
        self.vitality == Vitality::Alive
    }

    /// Health as a fraction of max, in [0, 1]
    pub fn fraction(&self) -> f32 {
        (self.current / self.max).clamp(0.0, 1.0)
    }

    /// Rounded integrity percentage shown on the HUD
    pub fn percent(&self) -> u32 {
        (self.fraction() * 100.0).round() as u32
    }

    pub fn apply_damage(&mut self, amount: f32) -> DamageOutcome {
        if !self.is_alive() || !amount.is_finite() {
            return DamageOutcome::Ignored;
        }

        self.current = (self.current - amount.max(0.0)).clamp(0.0, self.max);
        log::debug!("Craft hit: damage {amount}, health {}/{}", self.current, self.max);

        if self.current <= 0.0 {
            self.vitality = Vitality::Dead;
            DamageOutcome::Killed
        } else {
            DamageOutcome::Damaged {
                remaining: self.current,
            }
        }
    }

    /// UI update request mirroring the current value
    pub fn changed_event(&self) -> GameEvent {
        GameEvent::HealthChanged {
            current: self.current,
            max: self.max,
            percent: self.percent(),
        }
    }
}
