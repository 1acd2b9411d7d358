//! UI-facing state derived from simulation events
//!
//! The HUD never reads health directly: it mirrors the `HealthChanged`
//! requests the world emits, the way a detached UI widget would.

use glam::Vec4;

use crate::sim::{Clock, GameEvent, TimerKey, Timers};
use crate::tuning::HudTuning;

/// RGBA colours, components in [0, 1]
pub mod palette {
    use glam::Vec4;

    pub const PANEL_NORMAL: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);
    pub const PANEL_LOW_HP: Vec4 = Vec4::new(1.0, 0.3, 0.3, 1.0);
    pub const PANEL_HIT_FLASH: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);
    pub const TEXT_HEALTHY: Vec4 = Vec4::new(0.0, 1.0, 0.0, 1.0);
    pub const TEXT_LOW_HP: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);
}

/// Integrity panel and distance counter
#[derive(Debug, Clone)]
pub struct StatusHud {
    current: f32,
    max: f32,
    percent: u32,
    distance: u32,
    flash_duration: f32,
    timers: Timers,
}

impl StatusHud {
    pub fn new(tuning: &HudTuning) -> Self {
        Self {
            current: 0.0,
            max: 1.0,
            percent: 100,
            distance: 0,
            flash_duration: tuning.flash_duration,
            timers: Timers::new(),
        }
    }

    /// Mirror a simulation event. Damage (a drop in health) triggers the
    /// hit flash; re-triggering restarts it.
    pub fn on_event(&mut self, event: &GameEvent) {
        if let GameEvent::HealthChanged {
            current,
            max,
            percent,
        } = *event
        {
            let damaged = current < self.current;
            self.current = current;
            self.max = max;
            self.percent = percent;
            if damaged {
                self.timers
                    .start(TimerKey::HitFlash, Clock::Scaled, self.flash_duration);
            }
        }
    }

    pub fn set_distance(&mut self, distance: u32) {
        self.distance = distance;
    }

    /// Advance the flash on gameplay time
    pub fn advance(&mut self, dt: f32) {
        self.timers.advance(Clock::Scaled, dt);
    }

    fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            return 0.0;
        }
        (self.current / self.max).clamp(0.0, 1.0)
    }

    pub fn percent(&self) -> u32 {
        self.percent
    }

    pub fn is_flashing(&self) -> bool {
        self.timers.is_pending(TimerKey::HitFlash)
    }

    pub fn integrity_text(&self) -> String {
        format!("Integrity: {}%", self.percent)
    }

    pub fn distance_text(&self) -> String {
        format!("Flight Distance\n{}\n", self.distance)
    }

    /// Panel tint: red at 0 HP, white at full, solid red while flashing
    pub fn panel_colour(&self) -> Vec4 {
        if self.is_flashing() {
            return palette::PANEL_HIT_FLASH;
        }
        palette::PANEL_LOW_HP.lerp(palette::PANEL_NORMAL, self.fraction())
    }

    pub fn text_colour(&self) -> Vec4 {
        palette::TEXT_LOW_HP.lerp(palette::TEXT_HEALTHY, self.fraction())
    }
}

/// Game over panel contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsPanel {
    pub visible: bool,
    pub distance: u32,
    pub best: u32,
    pub new_best: bool,
}

impl ResultsPanel {
    pub fn show(&mut self, distance: u32, best: u32, new_best: bool) {
        self.visible = true;
        self.distance = distance;
        self.best = best;
        self.new_best = new_best;
    }

    pub fn hide(&mut self) {
        *self = Self::default();
    }

    pub fn distance_text(&self) -> String {
        if self.new_best {
            format!("Flight Distance: {} (BEST)", self.distance)
        } else {
            format!("Flight Distance: {}", self.distance)
        }
    }

    pub fn best_text(&self) -> String {
        format!("Best Flight Distance: {}", self.best)
    }
}
