//! Obstacle spawning
//!
//! Gap size follows a slow sine around the base value and never drops below
//! the tuning's minimum. Gap placement is drawn from the caller's RNG so a
//! seeded run always produces the same obstacles.

use glam::Vec2;
use rand::Rng;

use super::state::{Obstacle, Segment};
use crate::tuning::Tuning;

/// Whether an obstacle is due on this frame
#[inline]
pub fn should_spawn(frame: u64, interval: u64) -> bool {
    interval > 0 && frame > 0 && frame % interval == 0
}

/// Gap height for an obstacle spawned on `frame`
pub fn gap_size(frame: u64, tuning: &Tuning) -> f32 {
    let swing = (frame as f32 * tuning.gap_frequency).sin() * tuning.gap_swing;
    (tuning.gap_base + swing).max(tuning.min_gap)
}

/// Build a new obstacle just past the right edge of the arena
pub fn spawn_obstacle<R: Rng>(frame: u64, arena: Vec2, tuning: &Tuning, rng: &mut R) -> Obstacle {
    let gap = gap_size(frame, tuning);
    let margin = tuning.segment_margin;
    let free = (arena.y - gap - margin * 2.0).max(0.0);
    let top_height = margin + rng.random::<f32>() * free;
    let bottom_y = top_height + gap;

    Obstacle {
        x: arena.x + tuning.spawn_offset,
        width: tuning.obstacle_width,
        top: Segment {
            y: 0.0,
            height: top_height,
        },
        bottom: Segment {
            y: bottom_y,
            height: (arena.y - bottom_y).max(0.0),
        },
        passed: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_cadence() {
        assert!(!should_spawn(0, 95));
        assert!(!should_spawn(94, 95));
        assert!(should_spawn(95, 95));
        assert!(!should_spawn(96, 95));
        assert!(should_spawn(190, 95));
    }

    #[test]
    fn test_gap_at_frame_zero_is_base() {
        assert_eq!(gap_size(0, &Tuning::default()), 160.0);
    }

    #[test]
    fn test_obstacle_starts_past_right_edge() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let o = spawn_obstacle(95, Vec2::new(800.0, 600.0), &tuning, &mut rng);
        assert_eq!(o.x, 840.0);
        assert_eq!(o.width, 70.0);
        assert!(!o.passed);
        assert_eq!(o.top.y, 0.0);
        assert!((o.bottom.bottom() - 600.0).abs() < 1e-3);
    }

    #[test]
    fn test_same_seed_same_obstacles() {
        let tuning = Tuning::default();
        let arena = Vec2::new(800.0, 600.0);
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        for frame in [95, 190, 285] {
            assert_eq!(
                spawn_obstacle(frame, arena, &tuning, &mut a),
                spawn_obstacle(frame, arena, &tuning, &mut b)
            );
        }
    }

    #[test]
    fn test_tiny_arena_does_not_go_negative() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let o = spawn_obstacle(95, Vec2::new(100.0, 120.0), &tuning, &mut rng);
        assert_eq!(o.top.height, 40.0);
        assert!(o.bottom.height >= 0.0);
        assert!(o.gap() >= tuning.min_gap);
    }

    proptest! {
        #[test]
        fn prop_gap_never_below_minimum(frame in 0u64..1_000_000, swing in 0.0f32..200.0) {
            let tuning = Tuning { gap_swing: swing, ..Default::default() };
            prop_assert!(gap_size(frame, &tuning) >= tuning.min_gap);
        }

        #[test]
        fn prop_segments_stay_partially_visible(
            seed in any::<u64>(),
            frame in 1u64..100_000,
            height in 320.0f32..1400.0,
        ) {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let o = spawn_obstacle(frame, Vec2::new(900.0, height), &tuning, &mut rng);
            prop_assert!(o.top.height >= tuning.segment_margin);
            prop_assert!(o.bottom.height >= tuning.segment_margin - 1e-3);
            prop_assert!((o.gap() - gap_size(frame, &tuning)).abs() < 1e-3);
        }
    }
}
