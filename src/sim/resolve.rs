//! Round resolution, run once the die has stopped
//!
//! The release face empties the jail. Any other face jails everyone standing
//! on that base or on no base at all; actors still in the start zone are out
//! of play and untouched.

use rand::Rng;

use super::events::GameEvent;
use super::jail::{release_from_jail, send_to_jail};
use super::layout::Layout;
use super::occupancy::in_start_zone;
use super::state::GameState;
use crate::consts::{BASE_COUNT, RELEASE_FACE};

/// What a resolution pass changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub jailed: Vec<u32>,
    pub released: Vec<u32>,
    /// Occupied bases that survived the roll, ascending
    pub safe_bases: Vec<u8>,
}

/// Apply a final die face to every actor.
/// Expects `current_base` to have been refreshed this tick.
pub fn resolve_round<R: Rng + ?Sized>(
    state: &mut GameState,
    layout: &Layout,
    roll: u8,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> Resolution {
    let mut resolution = Resolution::default();

    if roll == RELEASE_FACE {
        for actor in state.actors.iter_mut() {
            if release_from_jail(actor, layout, rng, events) {
                resolution.released.push(actor.id);
            }
        }
        if !resolution.released.is_empty() {
            log::info!("Jailbreak! {} actors released", resolution.released.len());
            events.push(GameEvent::Jailbreak);
        }
        return resolution;
    }

    if roll == 0 || usize::from(roll) > BASE_COUNT {
        log::warn!("Ignoring out-of-range roll {}", roll);
        return resolution;
    }

    events.push(GameEvent::BaseHit { base: roll });
    for actor in state.actors.iter_mut() {
        if actor.is_held || in_start_zone(actor, layout) {
            continue;
        }
        match actor.current_base {
            Some(base) if base != roll => {
                if !resolution.safe_bases.contains(&base) {
                    resolution.safe_bases.push(base);
                }
            }
            _ => {
                if send_to_jail(actor, layout, rng, events) {
                    resolution.jailed.push(actor.id);
                }
            }
        }
    }

    resolution.safe_bases.sort_unstable();
    for &base in &resolution.safe_bases {
        events.push(GameEvent::BaseSafe { base });
    }
    log::info!(
        "Roll {}: {} jailed, safe bases {:?}",
        roll,
        resolution.jailed.len(),
        resolution.safe_bases
    );
    resolution
}
