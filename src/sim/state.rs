//! Game state and core simulation types
//!
//! Everything a run mutates lives in [`GameState`], owned by the loop controller.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Collision;
use super::particles::Particle;
use crate::consts::{TILT_DAMPING, TILT_REFERENCE};
use crate::tuning::Tuning;

/// Current status of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Active gameplay
    Running,
    /// Simulation frozen, overlay shown
    Paused,
    /// Run ended by a collision
    GameOver,
}

/// Visual tilt derived from vertical velocity (cosmetic only)
#[inline]
pub fn tilt_for(vel_y: f32) -> f32 {
    vel_y.atan2(TILT_REFERENCE) * TILT_DAMPING
}

/// The player-controlled craft
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Craft {
    /// Center position (x stays fixed during a run)
    pub pos: Vec2,
    /// Vertical velocity, positive = down
    pub vel_y: f32,
    /// Visual rotation in radians
    pub rotation: f32,
    /// Collision radius
    pub radius: f32,
}

impl Craft {
    /// Craft at its spawn point for the given arena
    pub fn spawn(arena: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(arena.x * tuning.craft_x_fraction, arena.y * 0.5),
            vel_y: 0.0,
            rotation: 0.0,
            radius: tuning.craft_radius,
        }
    }

    /// Semi-implicit Euler step: velocity first, then position
    pub fn step(&mut self, gravity: f32) {
        self.vel_y += gravity;
        self.pos.y += self.vel_y;
        self.rotation = tilt_for(self.vel_y);
    }

    /// Flap overrides the velocity, it never accumulates
    pub fn flap(&mut self, impulse: f32) {
        self.vel_y = impulse;
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }
}

/// One vertical slab of an obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub y: f32,
    pub height: f32,
}

impl Segment {
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// A scrolling obstacle: a top and a bottom segment around a gap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub top: Segment,
    pub bottom: Segment,
    /// Already credited to the score
    pub passed: bool,
}

impl Obstacle {
    /// Trailing (right) edge
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Height of the opening between the segments
    pub fn gap(&self) -> f32 {
        self.bottom.y - self.top.bottom()
    }
}

/// Complete per-session game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub tuning: Tuning,
    /// Viewport size in CSS pixels
    pub arena: Vec2,
    pub craft: Craft,
    /// Unordered; removal does not preserve order
    pub obstacles: Vec<Obstacle>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Frames of active simulation since the run started
    pub frame: u64,
    pub score: u32,
    /// Best score, shown in the HUD
    pub best: u32,
    pub status: RunStatus,
    /// What ended the last run
    pub collision: Option<Collision>,
    rng: Pcg32,
}

impl GameState {
    /// Create a running game for the given arena
    pub fn new(seed: u64, arena: Vec2, tuning: Tuning, best: u32) -> Self {
        Self {
            seed,
            craft: Craft::spawn(arena, &tuning),
            tuning,
            arena,
            obstacles: Vec::new(),
            particles: Vec::new(),
            frame: 0,
            score: 0,
            best,
            status: RunStatus::Running,
            collision: None,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Reset everything a run owns; best score and RNG carry over
    pub fn restart(&mut self) {
        self.craft = Craft::spawn(self.arena, &self.tuning);
        self.obstacles.clear();
        self.particles.clear();
        self.frame = 0;
        self.score = 0;
        self.collision = None;
        self.status = RunStatus::Running;
    }

    /// Adopt a new viewport size. In-flight entities keep their positions.
    pub fn resize(&mut self, arena: Vec2) {
        self.arena = arena;
    }

    pub(crate) fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Split borrow for systems that mutate particles while drawing randomness
    pub(crate) fn particles_and_rng(&mut self) -> (&mut Vec<Particle>, &mut Pcg32) {
        (&mut self.particles, &mut self.rng)
    }
}
