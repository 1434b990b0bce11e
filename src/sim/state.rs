//! Game state and core simulation types
//!
//! Actors and the per-session round data. Fields are written only from inside
//! the `sim` module; everything outside reads through the getters.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::layout::Layout;
use crate::consts::*;
use crate::normalize_angle;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first round
    Waiting,
    /// Counting down to the roll
    Countdown,
    /// Die is spinning, actors are moving
    Rolling,
    /// Die has stopped; jailing and round advance
    Checking,
    /// Reserved; no transition enters it
    Paused,
    /// Session ended
    GameOver,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Every actor ended up in jail
    AllHeld,
    /// The last round finished on a non-releasing roll
    RoundsComplete,
}

/// Who drives an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Controller {
    /// Human player, `slot` indexes into the tick input
    Human { slot: u8 },
    Computer,
}

/// Computer-controlled movement state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AiState {
    #[default]
    Idle,
    MovingToTarget,
}

/// A game participant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: u32,
    pub controller: Controller,
    /// Center of the actor's footprint
    pub pos: Vec2,
    /// Facing angle (radians)
    pub facing: f32,
    /// In jail
    pub is_held: bool,
    /// Base the actor overlaps, recomputed every tick
    pub current_base: Option<u8>,
    /// Translated this tick (presentation only)
    pub is_moving: bool,
    /// Always `Idle` for humans
    pub ai: AiState,
    pub target_base: Option<u8>,
}

impl Actor {
    pub fn new(id: u32, controller: Controller, pos: Vec2) -> Self {
        Self {
            id,
            controller,
            pos,
            facing: -std::f32::consts::FRAC_PI_2, // Face up the field
            is_held: false,
            current_base: None,
            is_moving: false,
            ai: AiState::Idle,
            target_base: None,
        }
    }

    #[inline]
    pub fn is_human(&self) -> bool {
        matches!(self.controller, Controller::Human { .. })
    }

    #[inline]
    pub fn is_computer(&self) -> bool {
        self.controller == Controller::Computer
    }

    /// Turn toward a target angle, limited to `max_speed` radians/s
    pub fn turn_toward(&mut self, target: f32, dt: f32, max_speed: f32) {
        let target = normalize_angle(target);
        let current = normalize_angle(self.facing);

        let mut delta = target - current;
        // Handle wraparound
        if delta > std::f32::consts::PI {
            delta -= std::f32::consts::TAU;
        } else if delta < -std::f32::consts::PI {
            delta += std::f32::consts::TAU;
        }

        let max_delta = max_speed * dt;
        self.facing = normalize_angle(current + delta.clamp(-max_delta, max_delta));
    }
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) actors: Vec<Actor>,
    /// Rounds started so far (0 before the first countdown)
    pub(crate) round_number: u32,
    pub(crate) max_rounds: u32,
    pub(crate) phase: GamePhase,
    /// Final face of the current round's roll
    pub(crate) last_roll: Option<u8>,
    /// Replaying the last round after it ended on the release face
    pub(crate) is_bonus_round: bool,
    pub(crate) game_over: Option<GameOverReason>,
    /// Simulation clock (seconds)
    pub(crate) time_secs: f32,
}

impl GameState {
    /// Create the actor slots: the first `humans` are human-controlled,
    /// the rest computer-controlled, spread across the release area
    pub fn new(humans: u8, max_rounds: u32, layout: &Layout) -> Self {
        let area = layout.release_area();
        let y = area.center().y;
        let step = area.size().x / ACTOR_SLOTS as f32;

        let actors = (0..ACTOR_SLOTS)
            .map(|i| {
                let controller = if i < usize::from(humans) {
                    Controller::Human { slot: i as u8 }
                } else {
                    Controller::Computer
                };
                let x = area.min.x + step * (i as f32 + 0.5);
                Actor::new(i as u32, controller, Vec2::new(x, y))
            })
            .collect();

        Self {
            actors,
            round_number: 0,
            max_rounds,
            phase: GamePhase::Waiting,
            last_roll: None,
            is_bonus_round: false,
            game_over: None,
            time_secs: 0.0,
        }
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn actor(&self, id: u32) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    pub(crate) fn actor_mut(&mut self, id: u32) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|a| a.id == id)
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn last_roll(&self) -> Option<u8> {
        self.last_roll
    }

    pub fn is_bonus_round(&self) -> bool {
        self.is_bonus_round
    }

    pub fn game_over(&self) -> Option<GameOverReason> {
        self.game_over
    }

    pub fn time_secs(&self) -> f32 {
        self.time_secs
    }

    /// True when every actor is in jail
    pub fn all_held(&self) -> bool {
        self.actors.iter().all(|a| a.is_held)
    }

    /// Human actors still free
    pub fn free_humans(&self) -> usize {
        self.actors
            .iter()
            .filter(|a| a.is_human() && !a.is_held)
            .count()
    }
}
