//! Serializable view of the world for external renderers

use glam::{Quat, Vec3};
use serde::Serialize;

use super::state::{GameState, ObstacleId, SessionPhase};

#[derive(Debug, Clone, Serialize)]
pub struct CraftView {
    pub position: Vec3,
    pub orientation: Quat,
    pub visible: bool,
    pub engine_on: bool,
    pub damage_indicator: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ObstacleView {
    pub id: ObstacleId,
    pub template: usize,
    pub position: Vec3,
    pub orientation: Quat,
    pub scale: f32,
    pub hazard: bool,
}

/// Everything a presentation layer needs to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: SessionPhase,
    pub score: u32,
    pub health_percent: u32,
    pub results_alpha: f32,
    pub craft: CraftView,
    pub obstacles: Vec<ObstacleView>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let craft = &state.craft;
        Self {
            phase: state.phase,
            score: state.score(),
            health_percent: state.health.percent(),
            results_alpha: state.results_alpha(),
            craft: CraftView {
                position: craft.position,
                orientation: craft.orientation,
                visible: craft.visible,
                engine_on: craft.engine_on,
                damage_indicator: craft.damage_indicator,
            },
            obstacles: state
                .obstacles
                .iter()
                .map(|(id, o)| ObstacleView {
                    id,
                    template: o.template,
                    position: o.position,
                    orientation: o.orientation,
                    scale: o.scale,
                    hazard: o.is_hazard(),
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
