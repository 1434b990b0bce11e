//! Discrete events handed to the presentation layer

use serde::{Deserialize, Serialize};

use super::state::GameOverReason;

/// Something the presentation layer may want to animate or play a sound for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// A countdown began (`bonus` when replaying the last round)
    RoundStarted { round: u32, bonus: bool },
    /// Countdown step, counting down to 1
    CountdownTick { n: u32 },
    /// Intermediate face while the die spins
    DieFlicker { face: u8 },
    /// The die stopped
    DieFinal { face: u8 },
    ActorJailed { actor: u32 },
    ActorReleased { actor: u32 },
    /// Someone stood on this base and survived the roll
    BaseSafe { base: u8 },
    /// The rolled base
    BaseHit { base: u8 },
    /// The release face freed at least one actor
    Jailbreak,
    GameOver { reason: GameOverReason },
}
