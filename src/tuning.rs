//! Data-driven game balance
//!
//! Every gameplay constant lives here so a run can be re-tuned from JSON
//! without touching the simulation. Missing fields fall back to [`crate::consts`].

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay tuning values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    pub flap_impulse: f32,
    pub craft_radius: f32,
    pub craft_x_fraction: f32,

    pub obstacle_width: f32,
    pub obstacle_speed: f32,
    pub spawn_interval: u64,
    pub spawn_offset: f32,
    pub despawn_margin: f32,

    pub gap_base: f32,
    pub gap_swing: f32,
    pub gap_frequency: f32,
    pub min_gap: f32,
    pub segment_margin: f32,

    pub burst_size: usize,
    pub particle_speed: f32,
    pub particle_damping: f32,
    pub particle_min_life: f32,
    pub particle_life_spread: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            flap_impulse: FLAP_IMPULSE,
            craft_radius: CRAFT_RADIUS,
            craft_x_fraction: CRAFT_X_FRACTION,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_speed: OBSTACLE_SPEED,
            spawn_interval: SPAWN_INTERVAL,
            spawn_offset: SPAWN_OFFSET,
            despawn_margin: DESPAWN_MARGIN,

            gap_base: GAP_BASE,
            gap_swing: GAP_SWING,
            gap_frequency: GAP_FREQUENCY,
            min_gap: MIN_GAP,
            segment_margin: SEGMENT_MARGIN,

            burst_size: BURST_SIZE,
            particle_speed: PARTICLE_SPEED,
            particle_damping: PARTICLE_DAMPING,
            particle_min_life: PARTICLE_MIN_LIFE,
            particle_life_spread: PARTICLE_LIFE_SPREAD,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json).context("tuning is not valid JSON")?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would make the game unplayable or the math degenerate
    pub fn validate(&self) -> Result<()> {
        ensure!(self.gravity > 0.0, "gravity must be positive, got {}", self.gravity);
        ensure!(
            self.flap_impulse < 0.0,
            "flap_impulse must point upward (negative), got {}",
            self.flap_impulse
        );
        ensure!(self.craft_radius > 0.0, "craft_radius must be positive");
        ensure!(
            (0.0..1.0).contains(&self.craft_x_fraction),
            "craft_x_fraction must be in [0, 1), got {}",
            self.craft_x_fraction
        );
        ensure!(self.obstacle_width > 0.0, "obstacle_width must be positive");
        ensure!(self.obstacle_speed > 0.0, "obstacle_speed must be positive");
        ensure!(self.spawn_interval > 0, "spawn_interval must be at least one frame");
        ensure!(self.min_gap > 0.0, "min_gap must be positive");
        ensure!(
            self.min_gap > self.craft_radius * 2.0,
            "min_gap {} cannot fit a craft of radius {}",
            self.min_gap,
            self.craft_radius
        );
        ensure!(self.segment_margin >= 0.0, "segment_margin must not be negative");
        ensure!(
            self.particle_damping > 0.0 && self.particle_damping < 1.0,
            "particle_damping must be in (0, 1), got {}",
            self.particle_damping
        );
        Ok(())
    }

    /// Smallest gap the spawner can ever produce
    pub fn smallest_gap(&self) -> f32 {
        (self.gap_base - self.gap_swing.abs()).max(self.min_gap)
    }
}
