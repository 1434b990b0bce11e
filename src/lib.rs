//! Corners - a round-based arena game
//!
//! Core modules:
//! - `sim`: Round/session state machine, die roll, occupancy, jail and AI logic
//! - `settings`: Tunable session configuration
//! - `error`: Configuration faults raised at session creation
//! - `web`: wasm32 binding for a JS presentation layer

pub mod error;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::ConfigError;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Total actor slots in a session (humans + computer)
    pub const ACTOR_SLOTS: usize = 5;
    /// Maximum human-controlled actors
    pub const MAX_HUMANS: u8 = 2;
    /// Number of bases on the field
    pub const BASE_COUNT: usize = 5;

    /// Die faces are 1..=DIE_FACES
    pub const DIE_FACES: u8 = 6;
    /// Rolling this face releases everyone in jail
    pub const RELEASE_FACE: u8 = DIE_FACES;

    /// Canvas dimensions of the standard layout
    pub const ARENA_WIDTH: f32 = 1280.0;
    pub const ARENA_HEIGHT: f32 = 720.0;

    /// Actor footprint (square side)
    pub const ACTOR_SIZE: f32 = 40.0;
    /// Actor walking speed (pixels/s)
    pub const MOVE_SPEED: f32 = 240.0;
    /// Human turn rate (radians/s)
    pub const ROTATION_SPEED: f32 = 10.0;
    /// AI arrives when closer than this fraction of the actor size
    pub const ARRIVAL_THRESHOLD_FRACTION: f32 = 0.1;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
