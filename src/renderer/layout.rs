//! Overlay button layout
//!
//! The same rectangles are drawn by the scene builder and hit-tested by the
//! pointer handler, so what the player sees is exactly what they can tap.

use glam::Vec2;

use crate::sim::RunStatus;

/// Axis-aligned rectangle in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Whole surface of the given size
    pub fn covering(size: Vec2) -> Self {
        Self::new(0.0, 0.0, size.x, size.y)
    }

    /// Strict containment: points on the border are outside
    pub fn contains(&self, p: Vec2) -> bool {
        p.x > self.x && p.x < self.x + self.w && p.y > self.y && p.y < self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.w, self.y + self.h)
    }

    /// Shrink by `d` on every side
    pub fn inset(&self, d: f32) -> Self {
        Self::new(self.x + d, self.y + d, self.w - 2.0 * d, self.h - 2.0 * d)
    }
}

/// On-canvas overlay buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    TryAgain,
    Resume,
    Exit,
}

impl Button {
    pub fn label(&self) -> &'static str {
        match self {
            Button::TryAgain => "Try Again (Space)",
            Button::Resume => "Resume",
            Button::Exit => "Exit",
        }
    }
}

/// Buttons visible for the given status, in draw order
pub fn buttons(status: RunStatus, arena: Vec2) -> Vec<(Button, Rect)> {
    let (cx, cy) = (arena.x / 2.0, arena.y / 2.0);
    match status {
        RunStatus::Running => Vec::new(),
        RunStatus::GameOver => vec![
            (Button::TryAgain, Rect::new(cx - 140.0, cy + 10.0, 280.0, 44.0)),
            (Button::Exit, Rect::new(cx - 70.0, cy + 64.0, 140.0, 40.0)),
        ],
        RunStatus::Paused => vec![
            (Button::Resume, Rect::new(cx - 70.0, cy - 4.0, 140.0, 40.0)),
            (Button::Exit, Rect::new(cx - 70.0, cy + 48.0, 140.0, 40.0)),
        ],
    }
}

/// Button under `point`, if any
pub fn button_at(status: RunStatus, arena: Vec2, point: Vec2) -> Option<Button> {
    buttons(status, arena)
        .into_iter()
        .find(|(_, rect)| rect.contains(point))
        .map(|(button, _)| button)
}
