//! Simulation tick
//!
//! One pass of the game loop. Order matters: movement first, then occupancy,
//! then timers, so resolution always reads a freshly computed `current_base`.

use glam::Vec2;

use super::layout::Layout;
use super::round::Session;
use super::state::{Controller, GamePhase, GameState};
use super::{ai, occupancy};
use crate::consts::MAX_HUMANS;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Leave the waiting screen
    pub start: bool,
    /// Movement direction per human slot (any length, zero = stand still)
    pub moves: [Vec2; MAX_HUMANS as usize],
    /// Rig the next die result (debug/testing)
    pub force_roll: Option<u8>,
}

/// True while actors may walk
#[inline]
pub fn movement_allowed(phase: GamePhase) -> bool {
    matches!(phase, GamePhase::Countdown | GamePhase::Rolling)
}

/// Move free human actors along their input direction
pub fn move_humans(state: &mut GameState, layout: &Layout, moves: &[Vec2], dt: f32) {
    let half = layout.actor_size * 0.5;
    let bounds = layout.arena.inset(half, half);
    for actor in state.actors.iter_mut() {
        let Controller::Human { slot } = actor.controller else {
            continue;
        };
        let dir = moves
            .get(usize::from(slot))
            .copied()
            .unwrap_or(Vec2::ZERO)
            .normalize_or_zero();
        if actor.is_held || dir == Vec2::ZERO {
            actor.is_moving = false;
            continue;
        }

        actor.turn_toward(dir.y.atan2(dir.x), dt, layout.rotation_speed);
        let before = actor.pos;
        let target = bounds.clamp_point(actor.pos + dir * layout.move_speed * dt);
        actor.pos = avoid_jail(layout, before, target);
        actor.is_moving = actor.pos != before;
    }
}

/// The jail is a wall for free actors: slide along it on whichever axis is
/// still open, or stay put. An actor already overlapping it may walk out.
fn avoid_jail(layout: &Layout, from: Vec2, to: Vec2) -> Vec2 {
    let blocked = |p: Vec2| layout.actor_footprint(p).overlaps(&layout.jail);
    if !blocked(to) || blocked(from) {
        return to;
    }
    [Vec2::new(to.x, from.y), Vec2::new(from.x, to.y)]
        .into_iter()
        .find(|p| !blocked(*p))
        .unwrap_or(from)
}

/// Advance the session by one fixed timestep
pub fn tick(session: &mut Session, input: &TickInput, dt: f32) {
    if let Some(face) = input.force_roll {
        session.force_next_roll(face);
    }
    if input.start {
        session.start();
    }
    if session.state.phase == GamePhase::GameOver {
        return;
    }

    session.state.time_secs += dt;

    if movement_allowed(session.state.phase) {
        move_humans(&mut session.state, &session.layout, &input.moves, dt);
        ai::step_all(&mut session.state, &session.layout, dt);
    } else {
        for actor in session.state.actors.iter_mut() {
            actor.is_moving = false;
        }
    }

    occupancy::refresh(&mut session.state, &session.layout);
    session.run_timers(dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::settings::Settings;
    use crate::sim::events::GameEvent;

    fn session() -> Session {
        Session::with_seed(Settings::default(), Layout::standard(), 12345).unwrap()
    }

    #[test]
    fn test_tick_waiting_to_countdown() {
        let mut s = session();
        tick(&mut s, &TickInput::default(), SIM_DT);
        assert_eq!(s.phase(), GamePhase::Waiting);

        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut s, &input, SIM_DT);
        assert_eq!(s.phase(), GamePhase::Countdown);
        assert_eq!(s.state().round_number(), 1);
    }

    #[test]
    fn test_humans_frozen_while_waiting() {
        let mut s = session();
        let before = s.state().actors()[0].pos;
        let input = TickInput {
            moves: [Vec2::new(0.0, -1.0), Vec2::ZERO],
            ..Default::default()
        };
        tick(&mut s, &input, SIM_DT);
        assert_eq!(s.state().actors()[0].pos, before);
    }

    #[test]
    fn test_human_walks_during_countdown() {
        let mut s = session();
        s.start();
        let before = s.state().actors()[0].pos;
        let input = TickInput {
            moves: [Vec2::new(0.0, -2.0), Vec2::ZERO],
            ..Default::default()
        };
        tick(&mut s, &input, SIM_DT);
        let actor = &s.state().actors()[0];
        let moved = before.y - actor.pos.y;
        assert!((moved - s.layout().move_speed * SIM_DT).abs() < 1e-3);
        assert!(actor.is_moving);
        // Computer actors wait for the roll
        assert!(!s.state().actors()[1].is_moving);
    }

    #[test]
    fn test_human_stays_in_arena() {
        let layout = Layout::standard();
        let mut state = GameState::new(1, 10, &layout);
        state.actors[0].pos = Vec2::new(25.0, 300.0);
        move_humans(&mut state, &layout, &[Vec2::new(-1.0, 0.0)], 1.0);
        assert_eq!(state.actors[0].pos.x, layout.actor_size * 0.5);
    }

    #[test]
    fn test_held_human_ignores_input() {
        let layout = Layout::standard();
        let mut state = GameState::new(1, 10, &layout);
        state.actors[0].is_held = true;
        let before = state.actors[0].pos;
        move_humans(&mut state, &layout, &[Vec2::new(1.0, 0.0)], 0.5);
        assert_eq!(state.actors[0].pos, before);
        assert!(!state.actors[0].is_moving);
    }

    #[test]
    fn test_determinism() {
        let mut s1 = session();
        let mut s2 = session();
        let inputs = [
            TickInput {
                start: true,
                ..Default::default()
            },
            TickInput {
                moves: [Vec2::new(0.3, -1.0), Vec2::ZERO],
                ..Default::default()
            },
            TickInput::default(),
        ];
        for _ in 0..600 {
            for input in &inputs {
                tick(&mut s1, input, SIM_DT);
                tick(&mut s2, input, SIM_DT);
            }
        }
        assert_eq!(s1.phase(), s2.phase());
        assert_eq!(s1.state().last_roll(), s2.state().last_roll());
        for (a, b) in s1.state().actors().iter().zip(s2.state().actors()) {
            assert_eq!(a.pos, b.pos);
            assert_eq!(a.is_held, b.is_held);
        }
    }

    #[test]
    fn test_shortest_flicker_finishes_after_a_long_wait() {
        let settings = Settings {
            countdown_ticks: 0,
            spin_min: 0.5,
            spin_max: 0.5,
            flicker_min_interval: SIM_DT,
            flicker_max_interval: SIM_DT,
            ..Default::default()
        };
        let mut s = Session::with_seed(settings, Layout::standard(), 9).unwrap();
        // 40 seconds on the waiting screen moves the clock well past 1.0
        for _ in 0..4800 {
            tick(&mut s, &TickInput::default(), SIM_DT);
        }
        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut s, &input, SIM_DT);
        assert_eq!(s.phase(), GamePhase::Rolling);

        // At most one flicker per tick, and the roll stops on time
        let mut ticks = 0;
        while s.phase() == GamePhase::Rolling {
            tick(&mut s, &TickInput::default(), SIM_DT);
            let flickers = s
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::DieFlicker { .. }))
                .count();
            assert!(flickers <= 1);
            ticks += 1;
            assert!(ticks < 120, "roll did not stop");
        }
        assert_eq!(s.phase(), GamePhase::Checking);
    }

    #[test]
    fn test_free_human_cannot_walk_into_jail() {
        let layout = Layout::standard();
        let mut state = GameState::new(1, 10, &layout);
        let half = layout.actor_size * 0.5;
        state.actors[0].pos = Vec2::new(layout.jail.center().x, layout.jail.min.y - half - 30.0);

        for _ in 0..120 {
            move_humans(&mut state, &layout, &[Vec2::new(0.0, 1.0)], SIM_DT);
            let footprint = layout.actor_footprint(state.actors[0].pos);
            assert!(!footprint.overlaps(&layout.jail));
        }
        assert!(!state.actors[0].is_moving);

        // Diagonal input slides along the jail roof
        let before = Vec2::new(layout.jail.center().x, layout.jail.min.y - half);
        state.actors[0].pos = before;
        move_humans(&mut state, &layout, &[Vec2::new(1.0, 1.0)], SIM_DT);
        let after = state.actors[0].pos;
        assert!(after.x > before.x);
        assert_eq!(after.y, before.y);
    }
}
