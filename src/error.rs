//! Configuration faults
//!
//! Raised while building a session. A session never starts on a partial or
//! inconsistent layout.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised when layout or settings invariants are violated.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("layout defines {found} bases, expected {expected}")]
    BaseCount { expected: usize, found: usize },
    #[error("base at index {index} has id {id}, expected {expected}")]
    BaseId { index: usize, id: u8, expected: u8 },
    #[error("bases {a} and {b} overlap")]
    BasesOverlap { a: u8, b: u8 },
    #[error("base {id} lies outside the arena")]
    BaseOutsideArena { id: u8 },
    #[error("base {id} overlaps the start zone")]
    BaseInStartZone { id: u8 },
    #[error("{zone} zone is empty")]
    EmptyZone { zone: &'static str },
    #[error("{zone} zone lies outside the arena")]
    ZoneOutsideArena { zone: &'static str },
    #[error("{zone} zone cannot fit an actor of size {actor_size:.1}")]
    ZoneTooSmall { zone: &'static str, actor_size: f32 },
    #[error("{field} must be positive (got {value:.2})")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} must be at least {min:.4}s (got {value})")]
    BelowMinimum {
        field: &'static str,
        min: f32,
        value: f32,
    },
    #[error("{field} range invalid (min {min:.2} > max {max:.2})")]
    InvertedRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
    #[error("human players must be between 1 and {max} (got {value})")]
    HumanPlayers { max: u8, value: u8 },
    #[error("max rounds must be at least 1")]
    NoRounds,
    #[error("failed to read settings from {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings")]
    Parse(#[from] serde_json::Error),
}
