//! Game simulation module
//!
//! All gameplay logic lives here:
//! - Tick-driven, single-threaded
//! - Timed waits go through the scheduler, never block
//! - No rendering or platform dependencies

pub mod ai;
pub mod dice;
pub mod events;
pub mod geom;
pub mod jail;
pub mod layout;
pub mod occupancy;
pub mod resolve;
pub mod round;
pub mod schedule;
pub mod state;
pub mod tick;

pub use dice::{DieRoll, RollStep};
pub use events::GameEvent;
pub use geom::{Aabb, distance};
pub use layout::{Base, Layout, Zone};
pub use resolve::{Resolution, resolve_round};
pub use round::{Outcome, RoundDecision, Session, decide_next};
pub use schedule::{Scheduler, TaskHandle};
pub use state::{Actor, AiState, Controller, GameOverReason, GamePhase, GameState};
pub use tick::{TickInput, tick};
