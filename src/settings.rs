//! Display settings and preferences
//!
//! Read once at startup from the key/value store, as JSON next to the best score.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_PIXEL_RATIO, MIN_PIXEL_RATIO};
use crate::persistence::KeyValueStore;

/// Display preferences. None of these touch the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Particle bursts on flap and score
    pub particles: bool,
    /// Background grid lines
    pub background_grid: bool,
    /// Reduced motion (no craft tilt)
    pub reduced_motion: bool,
    /// Upper bound for the device pixel ratio used for the backing store
    pub max_pixel_ratio: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            particles: true,
            background_grid: true,
            reduced_motion: false,
            max_pixel_ratio: MAX_PIXEL_RATIO,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "neo-flappy-settings";

    /// Effective pixel ratio cap, never outside [1, 2]
    pub fn pixel_ratio_cap(&self) -> f32 {
        if self.max_pixel_ratio.is_finite() {
            self.max_pixel_ratio.clamp(MIN_PIXEL_RATIO, MAX_PIXEL_RATIO)
        } else {
            MAX_PIXEL_RATIO
        }
    }

    /// Whether the craft should tilt with its velocity
    pub fn tilt_enabled(&self) -> bool {
        !self.reduced_motion
    }

    /// Load settings, falling back to defaults when missing or corrupt
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from storage");
                    settings
                }
                Err(e) => {
                    log::warn!("Stored settings are corrupt, using defaults: {e}");
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Settings unreadable, using defaults: {e:#}");
                Self::default()
            }
        }
    }
}
