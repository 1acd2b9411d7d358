//! Idle/demo autopilot
//!
//! Produces the two input axes from the world itself: dodge the nearest
//! hazard ahead, otherwise drift back toward the corridor centre with a
//! slow wander so demo runs don't fly a straight line.

use glam::Vec2;

use super::state::GameState;

/// How far ahead (forward units) the autopilot reacts to hazards
const LOOK_AHEAD: f32 = 25.0;
/// Extra clearance added to the combined radii when judging a threat
const CLEARANCE: f32 = 0.8;

/// Steering axes (lateral, vertical), each in [-1, 1]
pub fn steer(state: &GameState) -> (f32, f32) {
    let craft = &state.craft;
    let craft_xy = craft.position.truncate();

    // Nearest hazard ahead whose cross-section overlaps our flight path
    let threat = state
        .obstacles
        .iter()
        .filter(|(_, o)| o.is_hazard())
        .filter(|(_, o)| {
            let dz = o.position.z - craft.position.z;
            dz > 0.0 && dz < LOOK_AHEAD
        })
        .filter(|(_, o)| {
            let reach = craft.radius + o.collision_radius() + CLEARANCE;
            o.position.truncate().distance(craft_xy) < reach
        })
        .min_by(|(_, a), (_, b)| {
            a.position
                .z
                .partial_cmp(&b.position.z)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let desired = if let Some((_, obstacle)) = threat {
        let away = craft_xy - obstacle.position.truncate();
        if away.length_squared() > 1e-4 {
            away.normalize()
        } else {
            // Dead centre: break toward whichever side has more room
            -craft_xy.normalize_or(Vec2::X)
        }
    } else {
        // Wander around the centre line
        let t = state.time_ticks as f32 * 0.004;
        let wander = Vec2::new(t.sin() * 1.5, (t * 0.7).cos() * 0.8);
        (wander - craft_xy) * 0.5
    };

    (desired.x.clamp(-1.0, 1.0), desired.y.clamp(-1.0, 1.0))
}
