//! Loop controller
//!
//! Owns the game state, queues input between frames, runs one tick per frame
//! and takes care of the single side effect of a run: writing the best score
//! when it ends. The host only has to call [`Game::frame`] while
//! [`FrameOutput::keep_running`] is set and paint the returned commands.

use glam::Vec2;

use crate::persistence::{BestScore, KeyValueStore};
use crate::platform::{Action, action_for_pointer};
use crate::renderer::{DrawCommand, render};
use crate::settings::Settings;
use crate::sim::{GameState, RunStatus, TickEvents, TickInput, tick};
use crate::tuning::Tuning;

/// What the host should do after delivering input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Nothing to schedule
    Idle,
    /// The loop was suspended and now has a frame to run
    Wake,
    /// The player chose Exit; tear down and notify the host
    Exit,
}

/// Result of one animation frame
#[derive(Debug, Clone)]
pub struct FrameOutput {
    pub commands: Vec<DrawCommand>,
    pub events: TickEvents,
    /// Schedule another frame. False once paused or game over.
    pub keep_running: bool,
}

pub struct Game {
    state: GameState,
    best: BestScore,
    settings: Settings,
    store: Box<dyn KeyValueStore>,
    pending: TickInput,
    suspended: bool,
    exited: bool,
}

impl Game {
    /// Start a running game. Reads the best score and display settings once.
    pub fn new(seed: u64, arena: Vec2, tuning: Tuning, store: Box<dyn KeyValueStore>) -> Self {
        let best = BestScore::load(store.as_ref());
        let settings = Settings::load(store.as_ref());
        log::info!("Run started (seed {seed}, arena {}x{})", arena.x, arena.y);
        Self {
            state: GameState::new(seed, arena, tuning, best.value()),
            best,
            settings,
            store,
            pending: TickInput::default(),
            suspended: false,
            exited: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn best(&self) -> u32 {
        self.best.value()
    }

    /// No frame is scheduled: the game sits on an overlay waiting for input
    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub fn has_exited(&self) -> bool {
        self.exited
    }

    /// Queue an action for the next frame
    pub fn handle(&mut self, action: Action) -> Flow {
        if self.exited {
            return Flow::Idle;
        }
        let status = self.state.status;
        match action {
            Action::Exit => {
                log::info!("Exit (score {}, best {})", self.state.score, self.best.value());
                self.exited = true;
                self.suspended = true;
                return Flow::Exit;
            }
            Action::Flap if status == RunStatus::Paused => return Flow::Idle,
            Action::Flap => self.pending.flap = true,
            Action::TogglePause if status != RunStatus::GameOver => {
                self.pending.toggle_pause = true
            }
            Action::Resume if status == RunStatus::Paused => self.pending.resume = true,
            Action::Restart if status == RunStatus::GameOver => self.pending.restart = true,
            Action::TogglePause | Action::Resume | Action::Restart => return Flow::Idle,
        }
        if self.suspended {
            self.suspended = false;
            Flow::Wake
        } else {
            Flow::Idle
        }
    }

    /// Pointer press at `point` in CSS pixels relative to the canvas
    pub fn pointer(&mut self, point: Vec2) -> Flow {
        match action_for_pointer(self.state.status, self.state.arena, point) {
            Some(action) => self.handle(action),
            None => Flow::Idle,
        }
    }

    /// Run one tick and build the frame to paint
    pub fn frame(&mut self) -> FrameOutput {
        let input = std::mem::take(&mut self.pending);
        let events = tick(&mut self.state, &input);

        if events.restarted {
            log::info!("Run started (best {})", self.best.value());
        }
        if let Some(collision) = events.collision {
            let best = self.best.record(self.state.score, self.store.as_mut());
            self.state.best = best;
            log::info!(
                "Game over: {:?} at frame {}, score {}, best {}{}",
                collision,
                self.state.frame,
                self.state.score,
                best,
                if self.best.is_persisted() { "" } else { " (not saved)" }
            );
        }
        if events.paused {
            log::debug!("Paused at frame {}", self.state.frame);
        }

        self.suspended = self.state.status != RunStatus::Running;
        FrameOutput {
            commands: render(&self.state, &self.settings),
            events,
            keep_running: !self.suspended,
        }
    }

    /// Repaint without advancing, e.g. after a resize while suspended
    pub fn redraw(&self) -> Vec<DrawCommand> {
        render(&self.state, &self.settings)
    }

    /// Adopt a new viewport size in CSS pixels
    pub fn resize(&mut self, arena: Vec2) {
        log::debug!("Resize to {}x{}", arena.x, arena.y);
        self.state.resize(arena);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{BEST_SCORE_KEY, MemoryStore};
    use crate::sim::Collision;

    fn arena() -> Vec2 {
        Vec2::new(800.0, 600.0)
    }

    fn game_with(store: &MemoryStore) -> Game {
        Game::new(42, arena(), Tuning::default(), Box::new(store.clone()))
    }

    /// Run frames until the current run ends
    fn run_to_game_over(game: &mut Game) -> FrameOutput {
        for _ in 0..10_000 {
            let out = game.frame();
            if out.events.collision.is_some() {
                return out;
            }
        }
        panic!("run never ended");
    }

    #[test]
    fn test_idle_run_hits_floor_and_writes_once() {
        let store = MemoryStore::new();
        let mut game = game_with(&store);

        let out = run_to_game_over(&mut game);
        assert_eq!(out.events.collision, Some(Collision::Floor));
        assert!(!out.keep_running);
        assert!(game.is_suspended());
        assert_eq!(game.state().status, RunStatus::GameOver);

        // Further frames on the game over screen write nothing
        for _ in 0..50 {
            game.frame();
        }
        assert_eq!(store.writes_to(BEST_SCORE_KEY), vec!["0"]);
    }

    #[test]
    fn test_best_is_max_across_runs() {
        let store = MemoryStore::with_value(BEST_SCORE_KEY, "5");
        let mut game = game_with(&store);
        assert_eq!(game.best(), 5);

        game.state.score = 7;
        run_to_game_over(&mut game);
        assert_eq!(game.best(), 7);
        assert_eq!(game.state().best, 7);

        assert_eq!(game.handle(Action::Flap), Flow::Wake);
        let out = game.frame();
        assert!(out.events.restarted);
        assert!(out.keep_running);
        assert_eq!(game.state().score, 0);

        run_to_game_over(&mut game);
        assert_eq!(game.best(), 7);
        assert_eq!(store.writes_to(BEST_SCORE_KEY), vec!["7", "7"]);
    }

    #[test]
    fn test_pause_suspends_and_escape_wakes() {
        let store = MemoryStore::new();
        let mut game = game_with(&store);
        game.frame();

        assert_eq!(game.handle(Action::TogglePause), Flow::Idle);
        let out = game.frame();
        assert!(out.events.paused);
        assert!(!out.keep_running);

        let frozen = game.state().clone();
        assert_eq!(game.handle(Action::Flap), Flow::Idle);
        assert_eq!(game.handle(Action::TogglePause), Flow::Wake);
        // Already woken, a second input does not schedule twice
        assert_eq!(game.handle(Action::TogglePause), Flow::Idle);

        let out = game.frame();
        assert!(out.events.resumed);
        assert!(!out.events.flapped);
        assert!(out.keep_running);
        assert_eq!(game.state().frame, frozen.frame + 1);
    }

    #[test]
    fn test_pointer_buttons() {
        let store = MemoryStore::new();
        let mut game = game_with(&store);
        game.handle(Action::TogglePause);
        game.frame();

        // Resume button
        assert_eq!(game.pointer(Vec2::new(400.0, 310.0)), Flow::Wake);
        assert!(game.frame().events.resumed);

        run_to_game_over(&mut game);
        // Try Again button
        assert_eq!(game.pointer(Vec2::new(400.0, 330.0)), Flow::Wake);
        assert!(game.frame().events.restarted);
    }

    #[test]
    fn test_exit_fires_once() {
        let store = MemoryStore::new();
        let mut game = game_with(&store);
        run_to_game_over(&mut game);

        assert_eq!(game.pointer(Vec2::new(400.0, 380.0)), Flow::Exit);
        assert!(game.has_exited());
        assert_eq!(game.handle(Action::Exit), Flow::Idle);
        assert_eq!(game.handle(Action::Flap), Flow::Idle);
        assert_eq!(game.state().status, RunStatus::GameOver);
    }

    #[test]
    fn test_resume_and_restart_ignored_while_running() {
        let store = MemoryStore::new();
        let mut game = game_with(&store);
        assert_eq!(game.handle(Action::Resume), Flow::Idle);
        assert_eq!(game.handle(Action::Restart), Flow::Idle);
        let out = game.frame();
        assert!(!out.events.resumed);
        assert!(!out.events.restarted);
    }

    #[test]
    fn test_unwritable_storage_keeps_session_best() {
        let store = MemoryStore::new();
        store.set_fail_writes(true);
        let mut game = game_with(&store);
        game.state.score = 3;
        run_to_game_over(&mut game);
        assert_eq!(game.best(), 3);
        assert!(store.writes().is_empty());
    }

    #[test]
    fn test_stored_settings_loaded() {
        let store = MemoryStore::with_value(Settings::STORAGE_KEY, r#"{"particles":false}"#);
        let game = game_with(&store);
        assert!(!game.settings().particles);
    }

    #[test]
    fn test_escape_ignored_on_game_over() {
        let store = MemoryStore::new();
        let mut game = game_with(&store);
        run_to_game_over(&mut game);
        assert_eq!(game.handle(Action::TogglePause), Flow::Idle);
        assert!(game.is_suspended());
        // The overlay still accepts a restart afterwards
        assert_eq!(game.handle(Action::Flap), Flow::Wake);
        assert!(game.frame().events.restarted);
    }

    #[test]
    fn test_point_on_fatal_frame_reaches_best() {
        use crate::sim::{Obstacle, Segment};

        let store = MemoryStore::new();
        let mut game = game_with(&store);
        let craft_x = game.state.craft.pos.x;
        game.state.obstacles.push(Obstacle {
            x: craft_x - 68.6,
            width: 70.0,
            top: Segment { y: 0.0, height: 150.0 },
            bottom: Segment { y: 310.0, height: 290.0 },
            passed: false,
        });
        let out = game.frame();
        assert_eq!(out.events.collision, Some(Collision::ObstacleBottom));
        assert_eq!(game.best(), 1);
        assert_eq!(store.writes_to(BEST_SCORE_KEY), vec!["1"]);
    }

    #[test]
    fn test_resize_keeps_running() {
        let store = MemoryStore::new();
        let mut game = game_with(&store);
        game.resize(Vec2::new(400.0, 300.0));
        assert_eq!(game.state().arena, Vec2::new(400.0, 300.0));
        assert!(!game.redraw().is_empty());
    }
}
