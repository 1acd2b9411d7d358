//! Data-driven game balance
//!
//! Every tunable lives here, grouped per component. Files may be partial:
//! missing fields fall back to the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Obstacle spawning area and cadence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerTuning {
    /// Lateral spawn half-extent (spawn x in [-range_x, range_x])
    pub range_x: f32,
    /// Vertical spawn half-extent
    pub range_y: f32,
    /// Nearest spawn distance ahead of the craft
    pub min_z: f32,
    /// Farthest spawn distance ahead of the craft
    pub max_z: f32,
    /// Population cap on hazardous obstacles
    pub max_obstacles: usize,
    /// Seconds between spawn attempts
    pub spawn_interval: f32,
    pub min_scale: f32,
    pub max_scale: f32,
}

impl Default for SpawnerTuning {
    fn default() -> Self {
        Self {
            range_x: 5.33,
            range_y: 3.0,
            min_z: 30.0,
            max_z: 80.0,
            max_obstacles: 30,
            spawn_interval: 0.5,
            min_scale: 0.6,
            max_scale: 1.4,
        }
    }
}

/// Per-obstacle behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleTuning {
    /// Self-rotation speed range in degrees per second
    pub min_rotate_speed: f32,
    pub max_rotate_speed: f32,
    /// How far behind the craft an unhit obstacle may fall before it is retired
    pub destroy_distance: f32,
    /// Seconds a hit obstacle keeps coasting before removal
    pub destroy_after_hit: f32,
    /// Knockback impulse applied along the hit direction
    pub hit_force: f32,
    /// Magnitude of the random torque impulse on hit
    pub torque_force: f32,
}

impl Default for ObstacleTuning {
    fn default() -> Self {
        Self {
            min_rotate_speed: 20.0,
            max_rotate_speed: 80.0,
            destroy_distance: 15.0,
            destroy_after_hit: 3.0,
            hit_force: 14.0,
            torque_force: 8.0,
        }
    }
}

/// Craft motion and cosmetics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CraftTuning {
    /// Lateral/vertical speed at full input
    pub move_speed: f32,
    /// Forward speed at distance zero
    pub base_forward_speed: f32,
    pub boundary_x: f32,
    pub boundary_y: f32,
    /// Forward speed gained per unit of distance traveled
    pub speed_increase_per_unit: f32,
    pub max_forward_speed: f32,
    /// Tilt at full input, in degrees
    pub tilt_angle: f32,
    /// Tilt interpolation rate (per second)
    pub tilt_speed: f32,
    /// Damage indicator recovery rate (per second)
    pub recover_speed: f32,
    /// Collision sphere radius
    pub radius: f32,
}

impl Default for CraftTuning {
    fn default() -> Self {
        Self {
            move_speed: 6.0,
            base_forward_speed: 10.0,
            boundary_x: 5.33,
            boundary_y: 3.0,
            speed_increase_per_unit: 0.02,
            max_forward_speed: 30.0,
            tilt_angle: 25.0,
            tilt_speed: 5.0,
            recover_speed: 2.0,
            radius: 0.9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthTuning {
    pub max_health: f32,
}

impl Default for HealthTuning {
    fn default() -> Self {
        Self { max_health: 50.0 }
    }
}

/// Camera feedback requested on a frontal hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactTuning {
    pub shake_duration: f32,
    /// Shake strength per unit of obstacle mass, before clamping
    pub shake_per_mass: f32,
    pub min_shake: f32,
    pub max_shake: f32,
}

impl Default for ImpactTuning {
    fn default() -> Self {
        Self {
            shake_duration: 0.2,
            shake_per_mass: 0.15,
            min_shake: 0.2,
            max_shake: 0.6,
        }
    }
}

impl ImpactTuning {
    /// Shake strength for an obstacle of the given mass
    pub fn shake_strength(&self, mass: f32) -> f32 {
        (mass * self.shake_per_mass).clamp(self.min_shake, self.max_shake)
    }
}

/// Destruction and results timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceTuning {
    /// Length declared by the explosion effect asset, when one is loaded
    pub destruction_effect_duration: Option<f32>,
    /// Used when no effect duration is available
    pub default_destruction_duration: f32,
    /// Results panel fade-in (unscaled clock)
    pub results_fade: f32,
}

impl Default for SequenceTuning {
    fn default() -> Self {
        Self {
            destruction_effect_duration: None,
            default_destruction_duration: 0.6,
            results_fade: 0.6,
        }
    }
}

impl SequenceTuning {
    pub fn destruction_duration(&self) -> f32 {
        self.destruction_effect_duration
            .filter(|d| d.is_finite() && *d >= 0.0)
            .unwrap_or(self.default_destruction_duration)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudTuning {
    /// Hit flash length on the status panel
    pub flash_duration: f32,
}

impl Default for HudTuning {
    fn default() -> Self {
        Self {
            flash_duration: 0.15,
        }
    }
}

/// An obstacle archetype the spawner picks from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleTemplate {
    pub name: String,
    /// Damage dealt on a frontal hit, and knockback divisor
    pub mass: f32,
    /// Collision radius at scale 1.0
    pub radius: f32,
}

impl ObstacleTemplate {
    pub fn new(name: impl Into<String>, mass: f32, radius: f32) -> Self {
        Self {
            name: name.into(),
            mass,
            radius,
        }
    }
}

fn default_templates() -> Vec<ObstacleTemplate> {
    vec![
        ObstacleTemplate::new("pebble", 3.0, 0.6),
        ObstacleTemplate::new("rock", 5.0, 1.0),
        ObstacleTemplate::new("boulder", 8.0, 1.5),
    ]
}

/// Complete balance sheet for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub spawner: SpawnerTuning,
    pub obstacle: ObstacleTuning,
    pub craft: CraftTuning,
    pub health: HealthTuning,
    pub impact: ImpactTuning,
    pub sequence: SequenceTuning,
    pub hud: HudTuning,
    pub obstacle_templates: Vec<ObstacleTemplate>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawner: SpawnerTuning::default(),
            obstacle: ObstacleTuning::default(),
            craft: CraftTuning::default(),
            health: HealthTuning::default(),
            impact: ImpactTuning::default(),
            sequence: SequenceTuning::default(),
            hud: HudTuning::default(),
            obstacle_templates: default_templates(),
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// These values if they pass `validate`, the defaults otherwise.
    /// A bad tuning built in code is logged and never fatal.
    pub fn validated_or_default(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(err) => {
                log::error!("{err}; falling back to default tuning");
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with.
    ///
    /// An empty template list passes: that is an asset absence, handled by
    /// the spawner going inert.
    pub fn validate(&self) -> Result<()> {
        let s = &self.spawner;
        ensure(s.spawn_interval > 0.0, "spawner.spawn_interval must be > 0")?;
        ensure(s.min_z <= s.max_z, "spawner.min_z must be <= spawner.max_z")?;
        ensure(
            s.range_x >= 0.0 && s.range_y >= 0.0,
            "spawner ranges must be >= 0",
        )?;
        ensure(
            [s.min_z, s.max_z, s.range_x, s.range_y, s.max_scale]
                .iter()
                .all(|v| v.is_finite()),
            "spawner ranges must be finite",
        )?;
        ensure(
            s.min_scale > 0.0 && s.min_scale <= s.max_scale,
            "spawner scale range must be positive and ordered",
        )?;

        let o = &self.obstacle;
        ensure(
            o.min_rotate_speed <= o.max_rotate_speed,
            "obstacle rotate speed range is inverted",
        )?;
        ensure(o.destroy_after_hit >= 0.0, "obstacle.destroy_after_hit must be >= 0")?;
        ensure(o.destroy_distance >= 0.0, "obstacle.destroy_distance must be >= 0")?;

        let c = &self.craft;
        ensure(
            c.base_forward_speed <= c.max_forward_speed,
            "craft.base_forward_speed must be <= craft.max_forward_speed",
        )?;
        ensure(
            c.speed_increase_per_unit >= 0.0,
            "craft.speed_increase_per_unit must be >= 0",
        )?;
        ensure(
            c.boundary_x >= 0.0 && c.boundary_y >= 0.0,
            "craft boundaries must be >= 0",
        )?;
        ensure(c.radius > 0.0, "craft.radius must be > 0")?;

        ensure(self.health.max_health > 0.0, "health.max_health must be > 0")?;

        let i = &self.impact;
        ensure(i.min_shake <= i.max_shake, "impact shake range is inverted")?;

        for template in &self.obstacle_templates {
            ensure(
                template.mass > 0.0 && template.radius > 0.0,
                &format!("template '{}' needs positive mass and radius", template.name),
            )?;
        }

        Ok(())
    }
}

fn ensure(ok: bool, reason: &str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(Error::InvalidTuning(reason.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "spawner": { "max_obstacles": 4 }, "health": { "max_health": 20 } }"#;
        let tuning = Tuning::from_json_str(json).unwrap();
        assert_eq!(tuning.spawner.max_obstacles, 4);
        assert_eq!(tuning.spawner.spawn_interval, 0.5);
        assert_eq!(tuning.health.max_health, 20.0);
        assert_eq!(tuning.obstacle_templates.len(), 3);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let json = r#"{ "spawner": { "min_z": 90, "max_z": 10 } }"#;
        let err = Tuning::from_json_str(json).unwrap_err();
        assert!(matches!(err, Error::InvalidTuning(_)));
    }

    #[test]
    fn test_invalid_tuning_falls_back_to_defaults() {
        let mut tuning = Tuning::default();
        tuning.craft.boundary_x = -1.0;
        assert_eq!(tuning.validated_or_default(), Tuning::default());

        let mut tuning = Tuning::default();
        tuning.spawner.max_z = f32::INFINITY;
        assert!(tuning.validate().is_err());

        let mut tuning = Tuning::default();
        tuning.spawner.max_obstacles = 4;
        assert_eq!(tuning.validated_or_default().spawner.max_obstacles, 4);
    }

    #[test]
    fn test_empty_templates_are_not_an_error() {
        let json = r#"{ "obstacle_templates": [] }"#;
        let tuning = Tuning::from_json_str(json).unwrap();
        assert!(tuning.obstacle_templates.is_empty());
    }

    #[test]
    fn test_shake_strength_clamped() {
        let impact = ImpactTuning::default();
        assert_eq!(impact.shake_strength(0.1), 0.2);
        assert!((impact.shake_strength(3.0) - 0.45).abs() < 1e-6);
        assert_eq!(impact.shake_strength(100.0), 0.6);
    }

    #[test]
    fn test_destruction_duration_prefers_effect_length() {
        let mut seq = SequenceTuning::default();
        assert_eq!(seq.destruction_duration(), 0.6);
        seq.destruction_effect_duration = Some(1.25);
        assert_eq!(seq.destruction_duration(), 1.25);
    }
}
