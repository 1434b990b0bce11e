//! Jail transitions
//!
//! Both operations are guarded so applying them twice in one resolution pass
//! is harmless.

use rand::Rng;

use super::events::GameEvent;
use super::layout::Layout;
use super::state::Actor;

/// Send an actor to jail. Returns false if it was already held.
pub fn send_to_jail<R: Rng + ?Sized>(
    actor: &mut Actor,
    layout: &Layout,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> bool {
    if actor.is_held {
        return false;
    }
    actor.is_held = true;
    actor.current_base = None;
    actor.is_moving = false;
    actor.pos = layout.jail_area().random_point(rng);
    log::debug!("Actor {} jailed", actor.id);
    events.push(GameEvent::ActorJailed { actor: actor.id });
    true
}

/// Release an actor into the start zone. Returns false if it was not held.
pub fn release_from_jail<R: Rng + ?Sized>(
    actor: &mut Actor,
    layout: &Layout,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> bool {
    if !actor.is_held {
        return false;
    }
    actor.is_held = false;
    actor.pos = layout.release_area().random_point(rng);
    log::debug!("Actor {} released", actor.id);
    events.push(GameEvent::ActorReleased { actor: actor.id });
    true
}
