//! Neo Flappy - a neon side-scrolling flap-and-dodge arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, scoring)
//! - `renderer`: Draw-command generation and the Canvas 2D backend
//! - `game`: Loop controller owning the state and the best-score side effect
//! - `platform`: Input mapping and viewport sizing
//! - `persistence`: Key/value storage and the persisted best score
//! - `tuning`: Data-driven game balance

pub mod game;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use game::{Flow, Game};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Downward acceleration (px/frame²)
    pub const GRAVITY: f32 = 0.45;
    /// Velocity set by a flap (px/frame, negative = up)
    pub const FLAP_IMPULSE: f32 = -7.5;

    /// Craft defaults
    pub const CRAFT_RADIUS: f32 = 16.0;
    /// Craft x as a fraction of viewport width
    pub const CRAFT_X_FRACTION: f32 = 0.28;
    /// Forward reference used to derive the visual tilt
    pub const TILT_REFERENCE: f32 = 8.0;
    pub const TILT_DAMPING: f32 = 0.6;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 70.0;
    pub const OBSTACLE_SPEED: f32 = 2.4;
    /// Frames between spawns
    pub const SPAWN_INTERVAL: u64 = 95;
    /// Spawn x offset past the right edge
    pub const SPAWN_OFFSET: f32 = 40.0;
    /// Obstacles are dropped once `x + width` is left of `-DESPAWN_MARGIN`
    pub const DESPAWN_MARGIN: f32 = 10.0;

    /// Gap sizing
    pub const GAP_BASE: f32 = 160.0;
    pub const GAP_SWING: f32 = 40.0;
    pub const GAP_FREQUENCY: f32 = 0.02;
    pub const MIN_GAP: f32 = 110.0;
    /// Minimum visible height of the top and bottom segments
    pub const SEGMENT_MARGIN: f32 = 40.0;

    /// Particle bursts
    pub const BURST_SIZE: usize = 8;
    pub const PARTICLE_SPEED: f32 = 2.2;
    pub const PARTICLE_DAMPING: f32 = 0.98;
    pub const PARTICLE_MIN_LIFE: f32 = 20.0;
    pub const PARTICLE_LIFE_SPREAD: f32 = 20.0;

    /// Device pixel ratio is clamped to this range
    pub const MIN_PIXEL_RATIO: f32 = 1.0;
    pub const MAX_PIXEL_RATIO: f32 = 2.0;
}
