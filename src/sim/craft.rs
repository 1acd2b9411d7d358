//! Craft motion
//!
//! Forward speed ramps with distance traveled, steering moves the craft
//! inside a hard-walled corridor, and a cosmetic tilt follows the input.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::tuning::CraftTuning;

/// Below this the damage indicator snaps back to normal
const INDICATOR_SNAP: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CraftLife {
    Active,
    /// Terminal
    Destroyed,
}

/// The player's craft
#[derive(Debug, Clone)]
pub struct Craft {
    pub position: Vec3,
    /// Forward coordinate at session start
    pub start_z: f32,
    /// Cosmetic only; gameplay always uses the world forward axis
    pub orientation: Quat,
    /// Last computed forward speed
    pub forward_speed: f32,
    pub life: CraftLife,
    pub radius: f32,
    /// Collision volume enabled
    pub collidable: bool,
    pub visible: bool,
    pub engine_on: bool,
    /// Damage indicator intensity, 1.0 right after a hit, eases to 0.0
    pub damage_indicator: f32,
}

impl Craft {
    pub fn new(tuning: &CraftTuning) -> Self {
        Self {
            position: Vec3::ZERO,
            start_z: 0.0,
            orientation: Quat::IDENTITY,
            forward_speed: tuning.base_forward_speed,
            life: CraftLife::Active,
            radius: tuning.radius,
            collidable: true,
            visible: true,
            engine_on: true,
            damage_indicator: 0.0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.life == CraftLife::Active
    }

    pub fn distance_traveled(&self) -> f32 {
        (self.position.z - self.start_z).max(0.0)
    }

    /// Whole units flown so far
    pub fn score(&self) -> u32 {
        self.distance_traveled().floor() as u32
    }

    /// Integrate one tick of motion from the two input axes.
    ///
    /// Axes are nominally in [-1, 1] and are not clamped here.
    pub fn advance(&mut self, lateral: f32, vertical: f32, dt: f32, tuning: &CraftTuning) {
        if !self.is_active() {
            return;
        }

        self.forward_speed = forward_speed(self.distance_traveled(), tuning);
        self.position.z += self.forward_speed * dt;

        self.position.x += lateral * tuning.move_speed * dt;
        self.position.y += vertical * tuning.move_speed * dt;
        self.position.x = self.position.x.clamp(-tuning.boundary_x, tuning.boundary_x);
        self.position.y = self.position.y.clamp(-tuning.boundary_y, tuning.boundary_y);

        let target = tilt_target(lateral, vertical, tuning.tilt_angle);
        let t = (tuning.tilt_speed * dt).clamp(0.0, 1.0);
        self.orientation = self.orientation.slerp(target, t).normalize();
    }

    /// Switch the damage indicator on
    pub fn mark_damaged(&mut self) {
        self.damage_indicator = 1.0;
    }

    /// Ease the damage indicator back to normal.
    ///
    /// Returns true on the tick it switches off.
    pub fn recover_indicator(&mut self, dt: f32, recover_speed: f32) -> bool {
        if self.damage_indicator <= 0.0 || !self.is_active() {
            return false;
        }
        let t = (recover_speed * dt).clamp(0.0, 1.0);
        self.damage_indicator -= self.damage_indicator * t;
        if self.damage_indicator < INDICATOR_SNAP {
            self.damage_indicator = 0.0;
            return true;
        }
        false
    }

    /// Make the craft non-interactive. Terminal.
    pub fn destroy(&mut self) {
        self.life = CraftLife::Destroyed;
        self.collidable = false;
        self.visible = false;
        self.engine_on = false;
    }
}

/// Forward speed for a given distance: ramps linearly, clamped to
/// [base, max].
pub fn forward_speed(distance: f32, tuning: &CraftTuning) -> f32 {
    let ramped = tuning.base_forward_speed + distance.max(0.0) * tuning.speed_increase_per_unit;
    ramped
        .min(tuning.max_forward_speed)
        .max(tuning.base_forward_speed)
}

/// Bank into lateral input, pitch with vertical input (degrees at full input)
pub fn tilt_target(lateral: f32, vertical: f32, tilt_angle: f32) -> Quat {
    let roll = (-lateral * tilt_angle).to_radians();
    // Right-handed: negative rotation about X lifts the nose (+Z toward +Y)
    let pitch = (-vertical * tilt_angle).to_radians();
    Quat::from_rotation_x(pitch) * Quat::from_rotation_z(roll)
}
