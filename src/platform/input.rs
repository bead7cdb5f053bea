//! Input mapping

use glam::Vec2;

use crate::renderer::layout::{Button, button_at};
use crate::sim::RunStatus;

/// A player intent, independent of the device that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Flap,
    TogglePause,
    Resume,
    Restart,
    Exit,
}

/// Map a `KeyboardEvent.code` to an action
pub fn action_for_key(code: &str) -> Option<Action> {
    match code {
        "Space" | "ArrowUp" => Some(Action::Flap),
        "Escape" => Some(Action::TogglePause),
        _ => None,
    }
}

/// Map a pointer press at `point` (CSS pixels, canvas-relative) to an action.
///
/// Overlay buttons take precedence. On the game over screen a press outside
/// the buttons restarts, like a flap would; on the pause screen it does nothing.
pub fn action_for_pointer(status: RunStatus, arena: Vec2, point: Vec2) -> Option<Action> {
    match (status, button_at(status, arena, point)) {
        (_, Some(Button::Exit)) => Some(Action::Exit),
        (_, Some(Button::TryAgain)) => Some(Action::Restart),
        (_, Some(Button::Resume)) => Some(Action::Resume),
        (RunStatus::Running, None) => Some(Action::Flap),
        (RunStatus::GameOver, None) => Some(Action::Restart),
        (RunStatus::Paused, None) => None,
    }
}
