//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod particles;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Collision, check_collision};
pub use particles::{BurstKind, Particle};
pub use spawn::{gap_size, spawn_obstacle};
pub use state::{Craft, GameState, Obstacle, RunStatus, Segment};
pub use tick::{TickEvents, TickInput, tick};
