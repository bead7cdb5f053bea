//! Persistence behind a small key/value contract
//!
//! Features:
//! - In-memory store for tests and the native runner
//! - LocalStorage store on the web
//! - Best-score tracker that never lets a storage failure reach the game

pub mod best_score;
pub mod store;

pub use best_score::{BEST_SCORE_KEY, BestScore, parse_best};
#[cfg(target_arch = "wasm32")]
pub use store::LocalStore;
pub use store::{KeyValueStore, MemoryStore};
