//! Obstacle spawner
//!
//! Accumulates time and, every `spawn_interval`, tries to place one obstacle
//! ahead of the craft. Attempts at the population cap are skipped silently
//! and simply retried at the next interval.

use glam::Vec3;
use rand::Rng;

use super::obstacle::Obstacle;
use super::sampling;
use crate::tuning::{ObstacleTemplate, ObstacleTuning, SpawnerTuning};

/// What a spawner update did
#[derive(Debug, Clone)]
pub enum SpawnAttempt {
    /// Interval not yet elapsed
    Waiting,
    /// No templates were loaded; never spawns
    Inert,
    /// Interval elapsed but the field is full
    AtCapacity,
    Spawned(Obstacle),
}

#[derive(Debug, Clone)]
pub struct ObstacleSpawner {
    timer: f32,
    inert: bool,
}

impl ObstacleSpawner {
    /// Build a spawner over the loaded templates. With none loaded it logs
    /// once and stays inert for the whole session.
    pub fn new(templates: &[ObstacleTemplate]) -> Self {
        let inert = templates.is_empty();
        if inert {
            log::error!("No obstacle templates loaded; spawner disabled for this session");
        }
        Self { timer: 0.0, inert }
    }

    pub fn is_inert(&self) -> bool {
        self.inert
    }

    /// Time accumulated toward the next attempt
    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// Advance the spawn clock.
    ///
    /// `active_count` is the number of obstacles still classified as hazards.
    #[allow(clippy::too_many_arguments)]
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        active_count: usize,
        craft_z: f32,
        spawner: &SpawnerTuning,
        obstacle: &ObstacleTuning,
        templates: &[ObstacleTemplate],
        rng: &mut R,
    ) -> SpawnAttempt {
        if self.inert || templates.is_empty() {
            return SpawnAttempt::Inert;
        }

        self.timer += dt;
        if self.timer < spawner.spawn_interval {
            return SpawnAttempt::Waiting;
        }
        self.timer = 0.0;

        if active_count >= spawner.max_obstacles {
            return SpawnAttempt::AtCapacity;
        }

        let template_index = rng.random_range(0..templates.len());
        let template = &templates[template_index];

        // Lateral/vertical placement spans the corridor; depth is relative to the craft
        let position = Vec3::new(
            rng.random_range(-spawner.range_x..=spawner.range_x),
            rng.random_range(-spawner.range_y..=spawner.range_y),
            craft_z + rng.random_range(spawner.min_z..=spawner.max_z),
        );
        let orientation = sampling::rotation(rng);
        let scale = rng.random_range(spawner.min_scale..=spawner.max_scale);
        let axis = sampling::on_unit_sphere(rng);
        let speed = rng.random_range(obstacle.min_rotate_speed..=obstacle.max_rotate_speed);

        log::trace!(
            "Spawning '{}' at ({:.1}, {:.1}, {:.1}) scale {scale:.2}",
            template.name,
            position.x,
            position.y,
            position.z
        );

        SpawnAttempt::Spawned(Obstacle::new(
            template_index,
            template,
            position,
            orientation,
            scale,
            axis,
            speed,
        ))
    }
}
