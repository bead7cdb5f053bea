//! Persisted best score
//!
//! Read once at startup, written at the end of every run. Storage errors are
//! logged and swallowed: an unreadable value counts as 0, an unwritable one
//! leaves the in-memory best in charge for the rest of the session.

use super::store::KeyValueStore;

/// Storage key for the best score
pub const BEST_SCORE_KEY: &str = "neo-best";

/// Parse a stored best score. Accepts integers and integral-looking floats
/// (`"12"`, `"12.0"`); anything else is `None`.
pub fn parse_best(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<u32>() {
        return Some(n);
    }
    let f = raw.parse::<f64>().ok()?;
    if f.is_finite() && f >= 0.0 && f <= u32::MAX as f64 {
        Some(f.floor() as u32)
    } else {
        None
    }
}

/// Best score across runs and sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BestScore {
    value: u32,
    /// Whether the last write reached storage
    persisted: bool,
}

impl BestScore {
    /// Read the stored best, defaulting to 0 when absent, corrupt or unreadable
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let value = match store.get(BEST_SCORE_KEY) {
            Ok(Some(raw)) => parse_best(&raw).unwrap_or_else(|| {
                log::warn!("Ignoring unparseable best score {:?}", raw);
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                log::warn!("Best score unreadable, starting from 0: {e:#}");
                0
            }
        };
        log::info!("Best score: {}", value);
        Self {
            value,
            persisted: true,
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    /// Fold a finished run into the best and write it out. Returns the new best.
    pub fn record(&mut self, score: u32, store: &mut dyn KeyValueStore) -> u32 {
        self.value = self.value.max(score);
        match store.set(BEST_SCORE_KEY, &self.value.to_string()) {
            Ok(()) => self.persisted = true,
            Err(e) => {
                self.persisted = false;
                log::warn!("Best score {} not saved this session: {e:#}", self.value);
            }
        }
        self.value
    }
}
