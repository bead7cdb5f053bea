//! Scene building: game state in, draw commands out
//!
//! Pure function of the state and display settings; it never mutates either.

use glam::Vec2;

use super::commands::{DrawCommand, Font, GradientStop, Paint, Rgba, TextAlign, colors};
use super::layout::{Button, Rect, buttons};
use crate::settings::Settings;
use crate::sim::{BurstKind, Craft, GameState, Obstacle, Particle, RunStatus};

/// Background grid spacing
const GRID_STEP: f32 = 28.0;
/// Radius of a particle's glow
const PARTICLE_GLOW_RADIUS: f32 = 10.0;
/// Radius of the halo around the craft
const CRAFT_HALO_RADIUS: f32 = 20.0;

/// Build the full frame for the current state
pub fn render(state: &GameState, settings: &Settings) -> Vec<DrawCommand> {
    let mut frame = Vec::with_capacity(32 + state.obstacles.len() * 4 + state.particles.len());

    background(&mut frame, state.arena, settings);
    for obstacle in &state.obstacles {
        glow_obstacle(&mut frame, obstacle);
    }
    if settings.particles {
        for particle in &state.particles {
            frame.push(particle_glow(particle));
        }
    }
    craft(&mut frame, &state.craft, settings.tilt_enabled());
    hud(&mut frame, state);

    match state.status {
        RunStatus::Running => {}
        RunStatus::Paused => paused_overlay(&mut frame, state),
        RunStatus::GameOver => game_over_overlay(&mut frame, state),
    }

    frame
}

/// Particle color by burst kind
pub fn particle_color(kind: BurstKind) -> Rgba {
    match kind {
        BurstKind::Flap => colors::PARTICLE_FLAP,
        BurstKind::Score => colors::PARTICLE_SCORE,
    }
}

fn background(frame: &mut Vec<DrawCommand>, arena: Vec2, settings: &Settings) {
    frame.push(DrawCommand::FillRect {
        rect: Rect::covering(arena),
        paint: Paint::Solid(colors::BACKGROUND),
    });
    if settings.background_grid {
        frame.push(DrawCommand::Grid {
            size: arena,
            step: GRID_STEP,
            color: colors::GRID,
            width: 1.0,
        });
    }
    // Horizon glow
    let center = Vec2::new(arena.x / 2.0, arena.y * 0.8);
    frame.push(DrawCommand::FillCircle {
        center,
        radius: arena.y,
        paint: Paint::Radial {
            center,
            inner_radius: 10.0,
            outer_radius: arena.y,
            stops: vec![
                GradientStop::new(0.0, colors::HORIZON),
                GradientStop::new(1.0, colors::HORIZON_FADE),
            ],
        },
    });
}

fn glow_slab(frame: &mut Vec<DrawCommand>, rect: Rect) {
    if rect.w <= 0.0 || rect.h <= 0.0 {
        return;
    }
    frame.push(DrawCommand::FillRect {
        rect,
        paint: Paint::Linear {
            from: rect.min(),
            to: rect.max(),
            stops: vec![
                GradientStop::new(0.0, colors::OBSTACLE_EDGE),
                GradientStop::new(0.5, colors::OBSTACLE_CORE),
                GradientStop::new(1.0, colors::OBSTACLE_EDGE),
            ],
        },
    });
    frame.push(DrawCommand::StrokeRect {
        rect: rect.inset(1.0),
        color: colors::NEON_OUTLINE,
        width: 2.0,
    });
}

fn glow_obstacle(frame: &mut Vec<DrawCommand>, obstacle: &Obstacle) {
    let top = Rect::new(obstacle.x, obstacle.top.y, obstacle.width, obstacle.top.height);
    let bottom = Rect::new(
        obstacle.x,
        obstacle.bottom.y,
        obstacle.width,
        obstacle.bottom.height,
    );
    glow_slab(frame, top);
    glow_slab(frame, bottom);
}

fn particle_glow(particle: &Particle) -> DrawCommand {
    DrawCommand::FillCircle {
        center: particle.pos,
        radius: PARTICLE_GLOW_RADIUS,
        paint: Paint::Radial {
            center: particle.pos,
            inner_radius: 0.0,
            outer_radius: PARTICLE_GLOW_RADIUS,
            stops: vec![
                GradientStop::new(0.0, particle_color(particle.kind)),
                GradientStop::new(1.0, colors::TRANSPARENT),
            ],
        },
    }
}

fn craft(frame: &mut Vec<DrawCommand>, craft: &Craft, tilt: bool) {
    frame.push(DrawCommand::Save);
    frame.push(DrawCommand::Translate(craft.pos));
    if tilt {
        frame.push(DrawCommand::Rotate(craft.rotation));
    }

    // Outer glow
    frame.push(DrawCommand::FillCircle {
        center: Vec2::ZERO,
        radius: CRAFT_HALO_RADIUS,
        paint: Paint::Radial {
            center: Vec2::ZERO,
            inner_radius: 2.0,
            outer_radius: CRAFT_HALO_RADIUS,
            stops: vec![
                GradientStop::new(0.0, colors::CRAFT_GLOW),
                GradientStop::new(1.0, colors::CRAFT_GLOW_FADE),
            ],
        },
    });
    // Core
    frame.push(DrawCommand::FillCircle {
        center: Vec2::ZERO,
        radius: craft.radius,
        paint: Paint::Solid(colors::CRAFT_CORE),
    });
    // Visor
    frame.push(DrawCommand::Line {
        from: Vec2::new(-10.0, -2.0),
        to: Vec2::new(10.0, 2.0),
        color: colors::CRAFT_VISOR,
        width: 3.0,
    });

    frame.push(DrawCommand::Restore);
}

fn text(frame: &mut Vec<DrawCommand>, s: String, pos: Vec2, font: Font, align: TextAlign, color: Rgba) {
    frame.push(DrawCommand::Text {
        text: s,
        pos,
        font,
        align,
        color,
    });
}

fn hud(frame: &mut Vec<DrawCommand>, state: &GameState) {
    let (w, h) = (state.arena.x, state.arena.y);
    let small = Font::new(600, 12.0);

    text(
        frame,
        state.score.to_string(),
        Vec2::new(w / 2.0, 54.0),
        Font::new(700, 28.0),
        TextAlign::Center,
        colors::HUD_SCORE,
    );
    text(
        frame,
        format!("Best: {}", state.best),
        Vec2::new(16.0, 22.0),
        small,
        TextAlign::Left,
        colors::HUD_MUTED,
    );
    text(
        frame,
        "Neo Flappy".to_string(),
        Vec2::new(w - 16.0, 22.0),
        small,
        TextAlign::Right,
        colors::HUD_MUTED,
    );

    let hint = Font::new(500, 12.0);
    text(
        frame,
        "Tap / Space to flap".to_string(),
        Vec2::new(16.0, h - 14.0),
        hint,
        TextAlign::Left,
        colors::HUD_HINT,
    );
    text(
        frame,
        "Esc to pause".to_string(),
        Vec2::new(w - 16.0, h - 14.0),
        hint,
        TextAlign::Right,
        colors::HUD_HINT,
    );
}

fn button(frame: &mut Vec<DrawCommand>, button: Button, rect: Rect) {
    frame.push(DrawCommand::FillRect {
        rect,
        paint: Paint::Linear {
            from: rect.min(),
            to: rect.max(),
            stops: vec![
                GradientStop::new(0.0, colors::BUTTON_START),
                GradientStop::new(1.0, colors::BUTTON_END),
            ],
        },
    });
    frame.push(DrawCommand::StrokeRect {
        rect: rect.inset(1.0),
        color: colors::NEON_OUTLINE,
        width: 2.0,
    });
    text(
        frame,
        button.label().to_string(),
        rect.center() + Vec2::new(0.0, 6.0),
        Font::new(700, 16.0),
        TextAlign::Center,
        colors::WHITE,
    );
}

fn overlay_buttons(frame: &mut Vec<DrawCommand>, state: &GameState) {
    for (b, rect) in buttons(state.status, state.arena) {
        button(frame, b, rect);
    }
}

fn paused_overlay(frame: &mut Vec<DrawCommand>, state: &GameState) {
    let (w, h) = (state.arena.x, state.arena.y);
    frame.push(DrawCommand::FillRect {
        rect: Rect::covering(state.arena),
        paint: Paint::Solid(colors::OVERLAY_PAUSED),
    });
    text(
        frame,
        "Paused".to_string(),
        Vec2::new(w / 2.0, h / 2.0 - 40.0),
        Font::new(800, 24.0),
        TextAlign::Center,
        colors::WHITE,
    );
    overlay_buttons(frame, state);
}

fn game_over_overlay(frame: &mut Vec<DrawCommand>, state: &GameState) {
    let (w, h) = (state.arena.x, state.arena.y);
    frame.push(DrawCommand::FillRect {
        rect: Rect::covering(state.arena),
        paint: Paint::Solid(colors::OVERLAY_GAME_OVER),
    });
    text(
        frame,
        "Game Over".to_string(),
        Vec2::new(w / 2.0, h / 2.0 - 60.0),
        Font::new(800, 34.0),
        TextAlign::Center,
        colors::WHITE,
    );
    text(
        frame,
        format!(
            "Score: {}  \u{2022}  Best: {}",
            state.score,
            state.best.max(state.score)
        ),
        Vec2::new(w / 2.0, h / 2.0 - 20.0),
        Font::new(600, 18.0),
        TextAlign::Center,
        colors::WHITE,
    );
    overlay_buttons(frame, state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::particles::emit_burst;
    use crate::sim::{Segment, TickInput, tick};
    use crate::tuning::Tuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn new_state() -> GameState {
        GameState::new(1, Vec2::new(800.0, 600.0), Tuning::default(), 4)
    }

    fn texts(frame: &[DrawCommand]) -> Vec<&str> {
        frame
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn filled_rects(frame: &[DrawCommand]) -> Vec<Rect> {
        frame
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_running_frame_has_hud_and_no_overlay() {
        let state = new_state();
        let frame = render(&state, &Settings::default());
        let labels = texts(&frame);
        assert!(labels.contains(&"0"));
        assert!(labels.contains(&"Best: 4"));
        assert!(!labels.contains(&"Game Over"));
        assert!(!labels.contains(&"Paused"));
        assert_eq!(frame[0], DrawCommand::FillRect {
            rect: Rect::new(0.0, 0.0, 800.0, 600.0),
            paint: Paint::Solid(colors::BACKGROUND),
        });
    }

    #[test]
    fn test_craft_drawn_in_local_space() {
        let mut state = new_state();
        state.craft.rotation = 0.3;
        let frame = render(&state, &Settings::default());
        let save = frame.iter().position(|c| *c == DrawCommand::Save).unwrap();
        assert_eq!(frame[save + 1], DrawCommand::Translate(state.craft.pos));
        assert_eq!(frame[save + 2], DrawCommand::Rotate(0.3));
        assert!(frame.contains(&DrawCommand::Restore));
    }

    #[test]
    fn test_reduced_motion_skips_rotation() {
        let mut state = new_state();
        state.craft.rotation = 0.3;
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let frame = render(&state, &settings);
        assert!(!frame.iter().any(|c| matches!(c, DrawCommand::Rotate(_))));
    }

    #[test]
    fn test_obstacle_draws_two_slabs() {
        let mut state = new_state();
        state.obstacles.push(Obstacle {
            x: 300.0,
            width: 70.0,
            top: Segment { y: 0.0, height: 150.0 },
            bottom: Segment { y: 310.0, height: 290.0 },
            passed: false,
        });
        let rects = filled_rects(&render(&state, &Settings::default()));
        assert!(rects.contains(&Rect::new(300.0, 0.0, 70.0, 150.0)));
        assert!(rects.contains(&Rect::new(300.0, 310.0, 70.0, 290.0)));
    }

    #[test]
    fn test_particles_follow_setting() {
        let mut state = new_state();
        let mut rng = Pcg32::seed_from_u64(2);
        let tuning = state.tuning;
        emit_burst(&mut state.particles, Vec2::new(50.0, 50.0), BurstKind::Score, &tuning, &mut rng);

        let count_glows = |frame: &[DrawCommand]| {
            frame
                .iter()
                .filter(|c| {
                    matches!(c, DrawCommand::FillCircle { radius, .. } if *radius == PARTICLE_GLOW_RADIUS)
                })
                .count()
        };
        assert_eq!(count_glows(&render(&state, &Settings::default())), 8);
        let off = Settings {
            particles: false,
            ..Default::default()
        };
        assert_eq!(count_glows(&render(&state, &off)), 0);
    }

    #[test]
    fn test_game_over_buttons_match_hit_rects() {
        let mut state = new_state();
        while tick(&mut state, &TickInput::default()).collision.is_none() {}
        let frame = render(&state, &Settings::default());
        let labels = texts(&frame);
        assert!(labels.contains(&"Game Over"));
        assert!(labels.contains(&"Score: 0  \u{2022}  Best: 4"));
        assert!(labels.contains(&"Try Again (Space)"));
        assert!(labels.contains(&"Exit"));

        let rects = filled_rects(&frame);
        for (_, rect) in buttons(RunStatus::GameOver, state.arena) {
            assert!(rects.contains(&rect));
        }
    }

    #[test]
    fn test_paused_overlay() {
        let mut state = new_state();
        state.status = RunStatus::Paused;
        let frame = render(&state, &Settings::default());
        let labels = texts(&frame);
        assert!(labels.contains(&"Paused"));
        assert!(labels.contains(&"Resume"));
        assert!(labels.contains(&"Exit"));
        assert!(!labels.contains(&"Game Over"));
    }

    #[test]
    fn test_render_is_repeatable() {
        let mut state = new_state();
        for _ in 0..120 {
            tick(&mut state, &TickInput::default());
        }
        let settings = Settings::default();
        assert_eq!(render(&state, &settings), render(&state, &settings));
    }
}
