//! 2D rendering
//!
//! The scene builder turns a `GameState` into a list of draw commands; the
//! canvas backend (wasm only) replays them.

pub mod commands;
pub mod layout;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasPainter;
pub use commands::{DrawCommand, Paint, Rgba};
pub use layout::{Button, Rect, button_at, buttons};
pub use scene::render;
