//! Platform glue shared by the web host and native runner
//!
//! - Input: keyboard codes and pointer positions to game actions
//! - Viewport: CSS size and device pixel ratio to backing-store size

pub mod input;
pub mod viewport;

pub use input::{Action, action_for_key, action_for_pointer};
pub use viewport::Viewport;
