//! Obstacles: spinning asteroids with a hit latch

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::tuning::ObstacleTemplate;

/// Obstacle lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleLife {
    Active,
    /// Took a frontal hit; harmless, coasting until retirement
    Hit,
    /// Removed from the world
    Retired,
}

/// Collision classification checked by the contact pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    /// Blocks and damages the craft
    Hazard,
    /// Non-blocking; no contact events
    Debris,
}

/// An asteroid in the field
#[derive(Debug, Clone)]
pub struct Obstacle {
    /// Index into the tuning's template list
    pub template: usize,
    pub position: Vec3,
    pub orientation: Quat,
    /// Uniform visual and collision scale
    pub scale: f32,
    pub mass: f32,
    /// Collision radius at scale 1.0
    pub base_radius: f32,
    /// Fixed self-rotation axis (unit length)
    pub rotate_axis: Vec3,
    /// Fixed self-rotation speed, degrees per second
    pub rotate_speed: f32,
    /// Linear velocity picked up from knockback
    pub velocity: Vec3,
    /// Angular velocity picked up from torque impulses (radians/s)
    pub angular_velocity: Vec3,
    /// Set once on the first frontal hit, never cleared
    pub hit_latch: bool,
    pub life: ObstacleLife,
    pub class: Classification,
    /// Overlapping the craft as of the last contact pass
    pub touching: bool,
}

impl Obstacle {
    pub fn new(
        template_index: usize,
        template: &ObstacleTemplate,
        position: Vec3,
        orientation: Quat,
        scale: f32,
        rotate_axis: Vec3,
        rotate_speed: f32,
    ) -> Self {
        Self {
            template: template_index,
            position,
            orientation,
            scale,
            mass: template.mass,
            base_radius: template.radius,
            rotate_axis: rotate_axis.normalize_or(Vec3::Y),
            rotate_speed,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            hit_latch: false,
            life: ObstacleLife::Active,
            class: Classification::Hazard,
            touching: false,
        }
    }

    pub fn collision_radius(&self) -> f32 {
        self.base_radius * self.scale
    }

    pub fn is_hazard(&self) -> bool {
        self.class == Classification::Hazard
    }

    /// Spin about the fixed local axis and coast with any knockback.
    pub fn update(&mut self, dt: f32) {
        let spin = Quat::from_axis_angle(self.rotate_axis, self.rotate_speed.to_radians() * dt);
        self.orientation = (self.orientation * spin).normalize();

        let omega = self.angular_velocity.length();
        if omega > 0.0 {
            let tumble = Quat::from_axis_angle(self.angular_velocity / omega, omega * dt);
            self.orientation = (tumble * self.orientation).normalize();
        }

        self.position += self.velocity * dt;
    }

    /// True once an unhit obstacle has fallen `destroy_distance` behind
    pub fn has_been_passed(&self, craft_z: f32, destroy_distance: f32) -> bool {
        self.life == ObstacleLife::Active && self.position.z < craft_z - destroy_distance
    }

    /// Latch a frontal hit. Returns false if it was already latched.
    pub fn latch_hit(&mut self) -> bool {
        if self.hit_latch {
            return false;
        }
        self.hit_latch = true;
        self.life = ObstacleLife::Hit;
        self.class = Classification::Debris;
        true
    }

    pub fn apply_impulse(&mut self, impulse: Vec3) {
        self.velocity += impulse / self.mass;
    }

    pub fn apply_torque_impulse(&mut self, torque: Vec3) {
        self.angular_velocity += torque / self.mass;
    }
}
