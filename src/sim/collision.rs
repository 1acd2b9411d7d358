//! Craft/obstacle contact detection and hit resolution
//!
//! Contacts are sphere overlaps between the craft and each hazardous
//! obstacle. A contact event fires on the tick an overlap begins; a
//! sustained overlap is one event. Each event is judged once: frontal
//! contacts damage the craft and latch the obstacle, anything else is a
//! graze with no consequence.

use glam::Vec3;

use super::arena::{Arena, SlotId};
use super::craft::Craft;
use super::obstacle::Obstacle;
use super::sampling;
use super::state::{EffectKind, GameEvent, GameState};
use super::timers::{Clock, TimerKey};
use crate::consts::FORWARD;

/// How a single contact event is judged
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitJudgement {
    /// Obstacle ahead of the craft's nose; `direction` points craft -> obstacle
    Frontal { direction: Vec3 },
    /// Contact from beside or behind
    Grazing,
    /// Obstacle already resolved
    Latched,
}

/// Result of resolving one contact event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactOutcome {
    /// Stale id, latched obstacle or inactive craft
    Ignored,
    Grazed,
    Hit { damage: f32 },
}

/// Judge a contact between the craft at `craft_pos` and `obstacle`.
///
/// The gate uses the world forward axis: the craft's tilt is cosmetic.
pub fn judge_contact(craft_pos: Vec3, obstacle: &Obstacle) -> HitJudgement {
    if obstacle.hit_latch {
        return HitJudgement::Latched;
    }
    // Coincident centres count as dead ahead
    let direction = (obstacle.position - craft_pos).normalize_or(FORWARD);
    if direction.dot(FORWARD) < 0.0 {
        HitJudgement::Grazing
    } else {
        HitJudgement::Frontal { direction }
    }
}

/// Refresh each obstacle's touching flag and return the ids whose overlap
/// with the craft began this tick, in slot order.
pub fn detect_contacts(craft: &Craft, obstacles: &mut Arena<Obstacle>) -> Vec<SlotId> {
    let mut began = Vec::new();
    for (id, obstacle) in obstacles.iter_mut() {
        if !craft.collidable || !obstacle.is_hazard() {
            obstacle.touching = false;
            continue;
        }
        let reach = craft.radius + obstacle.collision_radius();
        let overlapping = craft.position.distance_squared(obstacle.position) < reach * reach;
        if overlapping && !obstacle.touching {
            began.push(id);
        }
        obstacle.touching = overlapping;
    }
    began
}

/// Resolve one contact event between the craft and obstacle `id`.
pub fn resolve_contact(state: &mut GameState, id: SlotId) -> ContactOutcome {
    if !state.craft.is_active() || !state.health.is_alive() {
        return ContactOutcome::Ignored;
    }
    let Some(obstacle) = state.obstacles.get_mut(id) else {
        return ContactOutcome::Ignored;
    };

    let direction = match judge_contact(state.craft.position, obstacle) {
        HitJudgement::Latched => return ContactOutcome::Ignored,
        HitJudgement::Grazing => {
            state.stats.grazes += 1;
            log::debug!("Graze on obstacle {}:{}, no damage", id.index, id.generation);
            return ContactOutcome::Grazed;
        }
        HitJudgement::Frontal { direction } => direction,
    };

    obstacle.latch_hit();
    let mass = obstacle.mass;

    // Flight-away: knockback along the hit direction plus a random tumble
    let tuning = &state.tuning;
    obstacle.apply_impulse(direction * tuning.obstacle.hit_force);
    let torque = sampling::in_unit_sphere(&mut state.rng) * tuning.obstacle.torque_force;
    obstacle.apply_torque_impulse(torque);

    state.health.apply_damage(mass);
    state.events.push(state.health.changed_event());

    state.events.push(GameEvent::ShakeCamera {
        duration: tuning.impact.shake_duration,
        strength: tuning.impact.shake_strength(mass),
    });
    state.events.push(GameEvent::PlayEffect {
        effect: EffectKind::HitSpark,
        at: state.craft.position + direction * state.craft.radius,
    });

    state.craft.mark_damaged();
    state.events.push(GameEvent::DamageIndicator { on: true });

    state.timers.start(
        TimerKey::RetireObstacle(id),
        Clock::Scaled,
        tuning.obstacle.destroy_after_hit,
    );
    state.stats.hits += 1;

    ContactOutcome::Hit { damage: mass }
}
