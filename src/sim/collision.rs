//! Collision detection for the craft
//!
//! The craft is a circle, tested by its axis-aligned extent against the
//! viewport bounds and each obstacle's segments. Touching an edge exactly is
//! not a hit; overlapping it by any amount is.

use glam::Vec2;

use super::state::{Craft, Obstacle};

/// What the craft ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Above the top of the viewport
    Ceiling,
    /// Below the bottom of the viewport
    Floor,
    /// Into an obstacle's top segment
    ObstacleTop,
    /// Into an obstacle's bottom segment
    ObstacleBottom,
}

/// Check the craft against the viewport's top and bottom
pub fn bounds_collision(craft: &Craft, arena: Vec2) -> Option<Collision> {
    if craft.top() < 0.0 {
        Some(Collision::Ceiling)
    } else if craft.bottom() > arena.y {
        Some(Collision::Floor)
    } else {
        None
    }
}

/// Check the craft against a single obstacle
pub fn obstacle_collision(craft: &Craft, obstacle: &Obstacle) -> Option<Collision> {
    let in_x = craft.right() > obstacle.x && craft.left() < obstacle.right();
    if !in_x {
        return None;
    }
    if craft.top() < obstacle.top.bottom() {
        Some(Collision::ObstacleTop)
    } else if craft.bottom() > obstacle.bottom.y {
        Some(Collision::ObstacleBottom)
    } else {
        None
    }
}

/// First collision for this frame, bounds before obstacles
pub fn check_collision(craft: &Craft, obstacles: &[Obstacle], arena: Vec2) -> Option<Collision> {
    bounds_collision(craft, arena)
        .or_else(|| obstacles.iter().find_map(|o| obstacle_collision(craft, o)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Segment;

    const ARENA: Vec2 = Vec2::new(800.0, 600.0);

    fn craft_at(x: f32, y: f32) -> Craft {
        Craft {
            pos: Vec2::new(x, y),
            vel_y: 0.0,
            rotation: 0.0,
            radius: 16.0,
        }
    }

    fn obstacle(x: f32) -> Obstacle {
        // Gap spans 200..360
        Obstacle {
            x,
            width: 70.0,
            top: Segment { y: 0.0, height: 200.0 },
            bottom: Segment { y: 360.0, height: 240.0 },
            passed: false,
        }
    }

    #[test]
    fn test_tangent_to_floor_is_not_collision() {
        let craft = craft_at(200.0, 600.0 - 16.0);
        assert_eq!(bounds_collision(&craft, ARENA), None);
    }

    #[test]
    fn test_past_floor_is_collision() {
        let craft = craft_at(200.0, 600.0 - 16.0 + 0.001);
        assert_eq!(bounds_collision(&craft, ARENA), Some(Collision::Floor));
    }

    #[test]
    fn test_tangent_to_ceiling_is_not_collision() {
        let craft = craft_at(200.0, 16.0);
        assert_eq!(bounds_collision(&craft, ARENA), None);
    }

    #[test]
    fn test_past_ceiling_is_collision() {
        let craft = craft_at(200.0, 16.0 - 0.001);
        assert_eq!(bounds_collision(&craft, ARENA), Some(Collision::Ceiling));
    }

    #[test]
    fn test_inside_gap_is_safe() {
        let craft = craft_at(230.0, 280.0);
        assert_eq!(obstacle_collision(&craft, &obstacle(200.0)), None);
    }

    #[test]
    fn test_hits_top_segment() {
        let craft = craft_at(230.0, 210.0);
        assert_eq!(
            obstacle_collision(&craft, &obstacle(200.0)),
            Some(Collision::ObstacleTop)
        );
    }

    #[test]
    fn test_hits_bottom_segment() {
        let craft = craft_at(230.0, 350.0);
        assert_eq!(
            obstacle_collision(&craft, &obstacle(200.0)),
            Some(Collision::ObstacleBottom)
        );
    }

    #[test]
    fn test_touching_leading_edge_is_not_collision() {
        // craft.right() == obstacle.x
        let craft = craft_at(184.0, 100.0);
        assert_eq!(obstacle_collision(&craft, &obstacle(200.0)), None);
        let craft = craft_at(184.01, 100.0);
        assert_eq!(
            obstacle_collision(&craft, &obstacle(200.0)),
            Some(Collision::ObstacleTop)
        );
    }

    #[test]
    fn test_touching_trailing_edge_is_not_collision() {
        // craft.left() == obstacle.right()
        let craft = craft_at(286.0, 100.0);
        assert_eq!(obstacle_collision(&craft, &obstacle(200.0)), None);
    }

    #[test]
    fn test_tangent_to_gap_edges_is_safe() {
        let o = obstacle(200.0);
        assert_eq!(obstacle_collision(&craft_at(230.0, 216.0), &o), None);
        assert_eq!(obstacle_collision(&craft_at(230.0, 344.0), &o), None);
    }

    #[test]
    fn test_bounds_checked_before_obstacles() {
        let craft = craft_at(230.0, 5.0);
        let hit = check_collision(&craft, &[obstacle(200.0)], ARENA);
        assert_eq!(hit, Some(Collision::Ceiling));
    }

    #[test]
    fn test_no_obstacles_no_collision() {
        let craft = craft_at(230.0, 300.0);
        assert_eq!(check_collision(&craft, &[], ARENA), None);
    }
}
