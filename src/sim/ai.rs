//! Computer-controlled actors
//!
//! Each round every free computer actor picks a random base and walks
//! straight at it. Facing snaps to the remaining vector every tick; arrival is
//! a distance threshold, so it lands on the same tick regardless of frame rate.

use rand::Rng;

use super::geom::distance;
use super::layout::Layout;
use super::state::{Actor, AiState, GameState};
use crate::consts::{ARRIVAL_THRESHOLD_FRACTION, BASE_COUNT};

/// Give every eligible computer actor a fresh target base
pub fn assign_targets<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    for actor in state.actors.iter_mut() {
        if !actor.is_computer() || actor.is_held {
            continue;
        }
        let target = rng.random_range(1..=BASE_COUNT as u8);
        actor.target_base = Some(target);
        actor.ai = AiState::MovingToTarget;
        log::debug!("Actor {} heading for base {}", actor.id, target);
    }
}

/// Advance one actor toward its target
pub fn step(actor: &mut Actor, layout: &Layout, dt: f32) {
    if actor.ai != AiState::MovingToTarget {
        return;
    }
    let Some(base) = actor.target_base.and_then(|id| layout.base(id)) else {
        log::warn!("Actor {} has no resolvable target, going idle", actor.id);
        actor.ai = AiState::Idle;
        actor.is_moving = false;
        return;
    };

    let remaining = base.center - actor.pos;
    let dist = distance(actor.pos, base.center);
    if dist < layout.actor_size * ARRIVAL_THRESHOLD_FRACTION {
        actor.pos = base.center;
        actor.current_base = Some(base.id);
        actor.is_moving = false;
        actor.ai = AiState::Idle;
        log::debug!("Actor {} arrived at base {}", actor.id, base.id);
        return;
    }

    actor.facing = remaining.y.atan2(remaining.x);
    // Never step past the target
    let travel = (layout.move_speed * dt).min(dist);
    actor.pos += remaining / dist * travel;
    actor.is_moving = travel > 0.0;
}

/// Advance every computer actor
pub fn step_all(state: &mut GameState, layout: &Layout, dt: f32) {
    for actor in state.actors.iter_mut().filter(|a| a.is_computer()) {
        step(actor, layout, dt);
    }
}

/// Force every computer actor idle ahead of the next round's assignment
pub fn reset_all(state: &mut GameState) {
    for actor in state.actors.iter_mut().filter(|a| a.is_computer()) {
        actor.ai = AiState::Idle;
        actor.target_base = None;
        actor.is_moving = false;
    }
}
