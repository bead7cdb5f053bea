//! Neo Flappy entry point
//!
//! The browser build is driven by the host page through `mount`. Natively this
//! runs a headless session with a simple autopilot and logs the outcome.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use anyhow::{Context, Result};
    use glam::Vec2;

    use neo_flappy::persistence::{BEST_SCORE_KEY, MemoryStore};
    use neo_flappy::platform::Action;
    use neo_flappy::sim::{GameState, RunStatus};
    use neo_flappy::{Game, Tuning};

    const RUNS: u32 = 3;
    const MAX_FRAMES_PER_RUN: u64 = 20_000;

    fn load_tuning() -> Result<Tuning> {
        let Ok(path) = std::env::var("NEO_FLAPPY_TUNING") else {
            return Ok(Tuning::default());
        };
        let json = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
        Tuning::from_json(&json).with_context(|| format!("loading tuning from {path}"))
    }

    /// Flap when sinking below the middle of the next gap
    fn autopilot(state: &GameState) -> bool {
        let craft = &state.craft;
        let target = state
            .obstacles
            .iter()
            .find(|o| o.right() > craft.left())
            .map(|o| o.top.bottom() + o.gap() / 2.0)
            .unwrap_or(state.arena.y / 2.0);
        craft.vel_y > 0.0 && craft.pos.y > target + 12.0
    }

    pub fn run() {
        env_logger::init();

        let tuning = load_tuning().unwrap_or_else(|e| {
            log::warn!("Invalid tuning, using defaults: {e:#}");
            Tuning::default()
        });
        log::info!("Smallest gap {:.0}px", tuning.smallest_gap());
        let seed = std::env::args()
            .nth(1)
            .and_then(|s| s.parse().ok())
            .unwrap_or(1);

        let store = MemoryStore::new();
        let mut game = Game::new(seed, Vec2::new(480.0, 720.0), tuning, Box::new(store.clone()));

        for run in 1..=RUNS {
            let mut frames = 0;
            while game.state().status == RunStatus::Running && frames < MAX_FRAMES_PER_RUN {
                if autopilot(game.state()) {
                    game.handle(Action::Flap);
                }
                game.frame();
                frames += 1;
            }
            let state = game.state();
            match state.collision {
                Some(collision) => log::info!(
                    "Run {run}: score {} after {frames} frames ({collision:?})",
                    state.score
                ),
                None => {
                    log::info!("Run {run}: still alive after {frames} frames, score {}", state.score);
                    break;
                }
            }
            if run < RUNS {
                game.handle(Action::Flap);
                game.frame();
            }
        }

        log::info!(
            "Session best {} ({} best-score writes)",
            game.best(),
            store.writes_to(BEST_SCORE_KEY).len()
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {}
