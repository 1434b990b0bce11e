//! Round controller
//!
//! Owns the session and is the only writer of `phase` and `last_roll`.
//! A round runs countdown -> rolling -> checking, then either starts the next
//! round, replays the last one as a bonus round, or ends the game.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::ai;
use super::dice::{DieRoll, RollStep};
use super::events::GameEvent;
use super::layout::Layout;
use super::resolve::resolve_round;
use super::schedule::{Scheduler, TaskHandle};
use super::state::{GameOverReason, GamePhase, GameState};
use crate::consts::{DIE_FACES, RELEASE_FACE};
use crate::error::ConfigError;
use crate::settings::Settings;

/// Timed work owned by the round controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundTask {
    /// Repeating countdown step
    CountdownTick,
    /// Next die flicker (or the final face)
    RollStep,
    /// Apply the final face
    Resolve,
    /// Decide what follows the round
    Advance,
}

/// What follows a resolved round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundDecision {
    NextRound,
    /// Replay the last round without advancing the counter
    BonusRound,
    GameOver,
}

/// How a finished session went for the humans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Rounds ran out with at least one human free
    Survived { free_humans: usize },
    /// Every human ended up in jail
    Caught,
}

/// Decide the next phase after a round resolved without emptying the field
pub fn decide_next(round: u32, max_rounds: u32, last_roll: Option<u8>) -> RoundDecision {
    if round >= max_rounds && last_roll == Some(RELEASE_FACE) {
        RoundDecision::BonusRound
    } else if round < max_rounds {
        RoundDecision::NextRound
    } else {
        RoundDecision::GameOver
    }
}

/// One game from first countdown to game over
#[derive(Debug, Clone)]
pub struct Session {
    pub(super) state: GameState,
    pub(super) layout: Layout,
    pub(super) settings: Settings,
    pub(super) rng: Pcg32,
    pub(super) scheduler: Scheduler<RoundTask>,
    pub(super) events: Vec<GameEvent>,
    die: Option<DieRoll>,
    roll_started: f64,
    countdown_left: u32,
    countdown_task: Option<TaskHandle>,
    /// Outstanding one-shot task (roll step, resolve or advance)
    pending_task: Option<TaskHandle>,
    forced_roll: Option<u8>,
}

impl Session {
    /// Build a session with OS-seeded randomness
    pub fn new(settings: Settings, layout: Layout) -> Result<Self, ConfigError> {
        Self::build(settings, layout, Pcg32::from_os_rng())
    }

    /// Build a session with a fixed seed (reproducible runs for tests)
    pub fn with_seed(settings: Settings, layout: Layout, seed: u64) -> Result<Self, ConfigError> {
        Self::build(settings, layout, Pcg32::seed_from_u64(seed))
    }

    fn build(settings: Settings, layout: Layout, rng: Pcg32) -> Result<Self, ConfigError> {
        settings.validate()?;
        layout.validate()?;
        let state = GameState::new(settings.human_players, settings.max_rounds, &layout);
        log::info!(
            "Session ready: {} human(s), {} rounds",
            settings.human_players,
            settings.max_rounds
        );
        Ok(Self {
            state,
            layout,
            settings,
            rng,
            scheduler: Scheduler::new(),
            events: Vec::new(),
            die: None,
            roll_started: 0.0,
            countdown_left: 0,
            countdown_task: None,
            pending_task: None,
            forced_roll: None,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Spin duration of the current (or last) roll
    pub fn spin_duration(&self) -> Option<f32> {
        self.die.as_ref().map(DieRoll::duration)
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Result of a finished session
    pub fn outcome(&self) -> Option<Outcome> {
        match self.state.game_over? {
            GameOverReason::AllHeld => Some(Outcome::Caught),
            GameOverReason::RoundsComplete => match self.state.free_humans() {
                0 => Some(Outcome::Caught),
                free_humans => Some(Outcome::Survived { free_humans }),
            },
        }
    }

    /// Leave the waiting phase and count down to round 1
    pub fn start(&mut self) {
        if self.state.phase != GamePhase::Waiting {
            log::debug!("Start ignored in phase {:?}", self.state.phase);
            return;
        }
        self.enter_countdown(true);
    }

    /// Rig the next final face (debug/testing)
    pub fn force_next_roll(&mut self, face: u8) {
        if (1..=DIE_FACES).contains(&face) {
            self.forced_roll = Some(face);
        } else {
            log::warn!("Ignoring forced roll {}", face);
        }
    }

    /// Teleport a free actor (debug/testing). Occupancy catches up next tick.
    pub fn place_actor(&mut self, id: u32, pos: Vec2) -> bool {
        let arena = self.layout.arena;
        match self.state.actor_mut(id) {
            Some(actor) if !actor.is_held => {
                actor.pos = arena.clamp_point(pos);
                true
            }
            _ => false,
        }
    }

    /// Cancel the countdown and any outstanding one-shot task
    fn cancel_round_tasks(&mut self) {
        if let Some(handle) = self.countdown_task.take() {
            self.scheduler.cancel(handle);
        }
        if let Some(handle) = self.pending_task.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn enter_countdown(&mut self, new_round: bool) {
        self.cancel_round_tasks();
        if new_round {
            self.state.round_number += 1;
        }
        self.state.phase = GamePhase::Countdown;
        self.state.last_roll = None;
        self.die = None;
        log::info!(
            "Round {}/{}{}",
            self.state.round_number,
            self.state.max_rounds,
            if self.state.is_bonus_round { " (bonus)" } else { "" }
        );
        self.events.push(GameEvent::RoundStarted {
            round: self.state.round_number,
            bonus: self.state.is_bonus_round,
        });

        self.countdown_left = self.settings.countdown_ticks;
        if self.countdown_left == 0 {
            self.enter_rolling();
            return;
        }
        self.events.push(GameEvent::CountdownTick {
            n: self.countdown_left,
        });
        self.countdown_task = Some(
            self.scheduler
                .schedule_repeating(self.settings.countdown_interval, RoundTask::CountdownTick),
        );
    }

    fn countdown_tick(&mut self) {
        self.countdown_left = self.countdown_left.saturating_sub(1);
        if self.countdown_left > 0 {
            self.events.push(GameEvent::CountdownTick {
                n: self.countdown_left,
            });
            return;
        }
        if let Some(handle) = self.countdown_task.take() {
            self.scheduler.cancel(handle);
        }
        self.enter_rolling();
    }

    fn enter_rolling(&mut self) {
        let duration = DieRoll::random_duration(
            &mut self.rng,
            self.settings.spin_min,
            self.settings.spin_max,
        );
        self.state.phase = GamePhase::Rolling;
        self.die = Some(DieRoll::new(
            duration,
            self.settings.flicker_min_interval,
            self.settings.flicker_max_interval,
        ));
        self.roll_started = self.scheduler.now();
        log::debug!("Rolling for {:.2}s", duration);

        ai::assign_targets(&mut self.state, &mut self.rng);
        self.roll_step();
    }

    fn roll_step(&mut self) {
        let elapsed = (self.scheduler.now() - self.roll_started) as f32;
        let Some(die) = self.die.as_mut() else {
            log::error!("Roll step with no die in phase {:?}", self.state.phase);
            return;
        };
        match die.step(elapsed, &mut self.rng) {
            RollStep::Flicker { face, next_in } => {
                self.events.push(GameEvent::DieFlicker { face });
                self.pending_task = Some(self.scheduler.schedule(next_in, RoundTask::RollStep));
            }
            RollStep::Final(face) => {
                let face = self.forced_roll.take().unwrap_or(face);
                log::info!("Die stopped on {}", face);
                self.state.last_roll = Some(face);
                self.state.phase = GamePhase::Checking;
                self.events.push(GameEvent::DieFinal { face });
                self.pending_task = Some(
                    self.scheduler
                        .schedule(self.settings.resolve_delay, RoundTask::Resolve),
                );
            }
        }
    }

    fn resolve(&mut self) {
        let Some(roll) = self.state.last_roll else {
            log::error!(
                "Resolution with no roll in round {}, restarting the round",
                self.state.round_number
            );
            ai::reset_all(&mut self.state);
            self.enter_countdown(false);
            return;
        };

        resolve_round(
            &mut self.state,
            &self.layout,
            roll,
            &mut self.rng,
            &mut self.events,
        );
        ai::reset_all(&mut self.state);

        if self.state.all_held() {
            self.end_game(GameOverReason::AllHeld);
            return;
        }
        self.pending_task = Some(
            self.scheduler
                .schedule(self.settings.settle_delay, RoundTask::Advance),
        );
    }

    fn advance(&mut self) {
        match decide_next(
            self.state.round_number,
            self.state.max_rounds,
            self.state.last_roll,
        ) {
            RoundDecision::BonusRound => {
                log::info!("Release face on the last round, bonus round!");
                self.state.is_bonus_round = true;
                self.enter_countdown(false);
            }
            RoundDecision::NextRound => self.enter_countdown(true),
            RoundDecision::GameOver => self.end_game(GameOverReason::RoundsComplete),
        }
    }

    fn end_game(&mut self, reason: GameOverReason) {
        self.cancel_round_tasks();
        self.scheduler.clear();
        ai::reset_all(&mut self.state);
        self.state.phase = GamePhase::GameOver;
        self.state.game_over = Some(reason);
        log::info!(
            "Game over after round {}: {:?}",
            self.state.round_number,
            reason
        );
        self.events.push(GameEvent::GameOver { reason });
    }

    fn dispatch(&mut self, handle: TaskHandle, task: RoundTask) {
        if self.pending_task == Some(handle) {
            self.pending_task = None;
        }
        match task {
            RoundTask::CountdownTick => self.countdown_tick(),
            RoundTask::RollStep => self.roll_step(),
            RoundTask::Resolve => self.resolve(),
            RoundTask::Advance => self.advance(),
        }
    }

    /// Advance the round clock and run whatever came due
    pub(super) fn run_timers(&mut self, dt: f32) {
        self.scheduler.advance_clock(dt);
        while let Some((handle, task)) = self.scheduler.pop_due() {
            if self.state.phase == GamePhase::GameOver {
                break;
            }
            self.dispatch(handle, task);
        }
    }

    /// Run resolution right now, bypassing the delay (recovery path tests)
    #[cfg(test)]
    pub(super) fn resolve_now(&mut self) {
        self.resolve();
    }
}
