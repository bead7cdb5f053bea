//! Per-frame simulation tick
//!
//! Order within a running frame: input, frame counter and spawn, physics,
//! move/despawn, scoring, collision, particles. Paused and game-over frames
//! only look at input.

use glam::Vec2;

use super::collision::{Collision, check_collision};
use super::particles::{BurstKind, emit_burst, update_particles};
use super::spawn::{should_spawn, spawn_obstacle};
use super::state::{GameState, RunStatus};

/// Input commands gathered since the previous tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Flap (Space / ArrowUp / tap). Restarts after game over.
    pub flap: bool,
    /// Pause toggle (Escape)
    pub toggle_pause: bool,
    /// Resume button
    pub resume: bool,
    /// Try Again button
    pub restart: bool,
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    pub flapped: bool,
    pub spawned: bool,
    /// Obstacles credited this tick
    pub scored: u32,
    /// Set on the tick the run ended
    pub collision: Option<Collision>,
    pub paused: bool,
    pub resumed: bool,
    pub restarted: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> TickEvents {
    let mut events = TickEvents::default();

    match state.status {
        RunStatus::Running => {
            if input.toggle_pause {
                state.status = RunStatus::Paused;
                events.paused = true;
                return events;
            }
        }
        RunStatus::Paused => {
            if input.toggle_pause || input.resume {
                state.status = RunStatus::Running;
                events.resumed = true;
            }
            // Flaps queued while paused are dropped, resuming runs this frame
            if !events.resumed {
                return events;
            }
        }
        RunStatus::GameOver => {
            if input.restart || input.flap {
                state.restart();
                events.restarted = true;
            }
            return events;
        }
    }

    if input.flap && !events.resumed {
        let impulse = state.tuning.flap_impulse;
        state.craft.flap(impulse);
        let origin = state.craft.pos - Vec2::new(10.0, 0.0);
        burst(state, origin, BurstKind::Flap);
        events.flapped = true;
    }

    state.frame += 1;

    if should_spawn(state.frame, state.tuning.spawn_interval) {
        let tuning = state.tuning;
        let obstacle = spawn_obstacle(state.frame, state.arena, &tuning, state.rng_mut());
        log::debug!(
            "spawned obstacle at frame {} with gap {:.1}",
            state.frame,
            obstacle.gap()
        );
        state.obstacles.push(obstacle);
        events.spawned = true;
    }

    let gravity = state.tuning.gravity;
    state.craft.step(gravity);

    let speed = state.tuning.obstacle_speed;
    let despawn_x = -state.tuning.despawn_margin;
    for obstacle in &mut state.obstacles {
        obstacle.x -= speed;
    }
    state.obstacles.retain(|o| o.right() >= despawn_x);

    let craft_x = state.craft.pos.x;
    for obstacle in &mut state.obstacles {
        if !obstacle.passed && obstacle.right() < craft_x {
            obstacle.passed = true;
            events.scored += 1;
        }
    }
    if events.scored > 0 {
        state.score += events.scored;
        let origin = state.craft.pos + Vec2::new(8.0, 0.0);
        for _ in 0..events.scored {
            burst(state, origin, BurstKind::Score);
        }
    }

    // A point credited on the fatal frame still counts toward the best
    if let Some(collision) = check_collision(&state.craft, &state.obstacles, state.arena) {
        state.status = RunStatus::GameOver;
        state.collision = Some(collision);
        events.collision = Some(collision);
    }

    let damping = state.tuning.particle_damping;
    update_particles(&mut state.particles, damping);

    events
}

fn burst(state: &mut GameState, origin: Vec2, kind: BurstKind) {
    let tuning = state.tuning;
    let (particles, rng) = state.particles_and_rng();
    emit_burst(particles, origin, kind, &tuning, rng);
}
