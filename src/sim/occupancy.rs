//! Per-tick base occupancy
//!
//! The only writer of `Actor::current_base` apart from the AI arrival snap.

use super::layout::Layout;
use super::state::{Actor, GameState};

/// First base whose footprint overlaps the actor, if any.
/// Bases never overlap each other, so order does not matter.
pub fn base_under(actor: &Actor, layout: &Layout) -> Option<u8> {
    let footprint = layout.actor_footprint(actor.pos);
    layout
        .bases
        .iter()
        .find(|base| base.footprint().overlaps(&footprint))
        .map(|base| base.id)
}

/// True if the actor is safely outside the game (start zone).
/// The jail strip inside the start zone counts too; callers skip held
/// actors before asking.
#[inline]
pub fn in_start_zone(actor: &Actor, layout: &Layout) -> bool {
    layout.start_zone.contains_point(actor.pos)
}

/// Recompute every actor's `current_base`
pub fn refresh(state: &mut GameState, layout: &Layout) {
    for actor in &mut state.actors {
        actor.current_base = if actor.is_held || in_start_zone(actor, layout) {
            None
        } else {
            base_under(actor, layout)
        };
    }
}
