//! Draw commands for the 2D surface
//!
//! The scene builder emits these; a backend replays them. Coordinates are CSS
//! pixels, the backend owns device-pixel-ratio scaling.

use glam::Vec2;

use super::layout::Rect;

/// Straight (non-premultiplied) color with an alpha in 0..=1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// CSS color string, e.g. `rgba(59,130,246,0.85)`
    pub fn css(&self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

/// A color stop along a gradient (offset in 0..=1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Rgba,
}

impl GradientStop {
    pub const fn new(offset: f32, color: Rgba) -> Self {
        Self { offset, color }
    }
}

/// How a shape is filled
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Linear {
        from: Vec2,
        to: Vec2,
        stops: Vec<GradientStop>,
    },
    Radial {
        center: Vec2,
        inner_radius: f32,
        outer_radius: f32,
        stops: Vec<GradientStop>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// Font weight and pixel size; the family is fixed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub weight: u16,
    pub size: f32,
}

impl Font {
    pub const fn new(weight: u16, size: f32) -> Self {
        Self { weight, size }
    }

    pub fn css(&self) -> String {
        format!("{} {}px Inter, system-ui, sans-serif", self.weight, self.size)
    }
}

/// One drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        paint: Paint,
    },
    StrokeRect {
        rect: Rect,
        color: Rgba,
        width: f32,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        paint: Paint,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Rgba,
        width: f32,
    },
    /// Evenly spaced vertical and horizontal lines covering `size`
    Grid {
        size: Vec2,
        step: f32,
        color: Rgba,
        width: f32,
    },
    Text {
        text: String,
        pos: Vec2,
        font: Font,
        align: TextAlign,
        color: Rgba,
    },
    /// Push the current transform
    Save,
    Translate(Vec2),
    Rotate(f32),
    /// Pop back to the last saved transform
    Restore,
}

/// Colors for game elements
pub mod colors {
    use super::Rgba;

    pub const BACKGROUND: Rgba = Rgba::opaque(5, 5, 7);
    pub const GRID: Rgba = Rgba::new(99, 102, 241, 0.1);
    pub const HORIZON: Rgba = Rgba::new(59, 130, 246, 0.12);
    pub const HORIZON_FADE: Rgba = Rgba::new(59, 130, 246, 0.0);

    pub const OBSTACLE_EDGE: Rgba = Rgba::new(59, 130, 246, 0.25);
    pub const OBSTACLE_CORE: Rgba = Rgba::new(147, 51, 234, 0.5);
    pub const NEON_OUTLINE: Rgba = Rgba::new(168, 85, 247, 0.9);

    pub const CRAFT_GLOW: Rgba = Rgba::new(139, 92, 246, 0.9);
    pub const CRAFT_GLOW_FADE: Rgba = Rgba::new(59, 130, 246, 0.05);
    pub const CRAFT_CORE: Rgba = Rgba::opaque(229, 231, 235);
    pub const CRAFT_VISOR: Rgba = Rgba::new(99, 102, 241, 0.9);

    pub const PARTICLE_FLAP: Rgba = Rgba::new(59, 130, 246, 0.85);
    pub const PARTICLE_SCORE: Rgba = Rgba::new(168, 85, 247, 0.9);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);

    pub const HUD_SCORE: Rgba = Rgba::new(226, 232, 240, 0.9);
    pub const HUD_MUTED: Rgba = Rgba::new(148, 163, 184, 0.9);
    pub const HUD_HINT: Rgba = Rgba::new(148, 163, 184, 0.7);

    pub const OVERLAY_GAME_OVER: Rgba = Rgba::new(2, 6, 23, 0.8);
    pub const OVERLAY_PAUSED: Rgba = Rgba::new(2, 6, 23, 0.7);
    pub const BUTTON_START: Rgba = Rgba::new(59, 130, 246, 0.25);
    pub const BUTTON_END: Rgba = Rgba::new(147, 51, 234, 0.25);
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);
}
