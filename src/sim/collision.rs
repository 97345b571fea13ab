//! Hit-box collision detection
//!
//! World space is y-up with the bottom of the play area at 0. Both the
//! player and obstacles stand on `ground_y`; hit-boxes are shrunk inward
//! from the visual boxes so grazing contacts don't end a run.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;
use super::player::PlayerBody;
use crate::tuning::Tuning;

/// Axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box from bottom-left corner and size
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    /// Shrink by `margin` on every side, per axis
    pub fn inset(&self, margin: Vec2) -> Self {
        Self {
            min: self.min + margin,
            max: self.max - margin,
        }
    }

    /// Strict overlap on both axes; touching edges do not count
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.max.x > other.min.x
            && self.min.x < other.max.x
            && self.max.y > other.min.y
            && self.min.y < other.max.y
    }
}

/// Player hit-box at its current height
pub fn player_hitbox(player: &PlayerBody, tuning: &Tuning) -> Aabb {
    Aabb::from_origin_size(
        Vec2::new(tuning.player_x, tuning.ground_y + player.offset),
        Vec2::new(tuning.player_width, tuning.player_height),
    )
    .inset(Vec2::splat(tuning.player_inset))
}

/// Obstacle hit-box, shrunk by a fraction of its own size
pub fn obstacle_hitbox(obstacle: &Obstacle, tuning: &Tuning) -> Aabb {
    let size = Vec2::new(obstacle.width, obstacle.height);
    Aabb::from_origin_size(Vec2::new(obstacle.x, tuning.ground_y), size)
        .inset(size * tuning.obstacle_inset_fraction)
}

/// First obstacle whose hit-box overlaps the player's, if any
pub fn find_hit<'a>(
    player: &PlayerBody,
    obstacles: &'a [Obstacle],
    tuning: &Tuning,
) -> Option<&'a Obstacle> {
    let hitbox = player_hitbox(player, tuning);
    obstacles
        .iter()
        .find(|o| hitbox.intersects(&obstacle_hitbox(o, tuning)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacle_at(x: f32) -> Obstacle {
        let t = Tuning::default();
        Obstacle::new(1, x, t.obstacle_width, t.obstacle_height)
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Aabb::new(Vec2::ZERO, Vec2::splat(10.0));
        let b = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(20.0, 10.0));
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = Aabb::new(Vec2::ZERO, Vec2::splat(10.0));
        let b = Aabb::new(Vec2::splat(5.0), Vec2::splat(15.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_player_hitbox_inset() {
        let t = Tuning::default();
        let hb = player_hitbox(&PlayerBody::default(), &t);
        assert_eq!(hb.min, Vec2::new(74.0, 80.0));
        assert_eq!(hb.max, Vec2::new(154.0, 160.0));
    }

    #[test]
    fn test_obstacle_hitbox_inset() {
        let t = Tuning::default();
        let hb = obstacle_hitbox(&obstacle_at(100.0), &t);
        assert!((hb.min.x - 110.5).abs() < 1e-4);
        assert!((hb.max.x - 159.5).abs() < 1e-4);
        assert!((hb.min.y - 82.0).abs() < 1e-4);
        assert!((hb.max.y - 138.0).abs() < 1e-4);
    }

    #[test]
    fn test_grounded_player_hits_overlapping_obstacle() {
        let t = Tuning::default();
        let obstacles = [obstacle_at(100.0)];
        assert!(find_hit(&PlayerBody::default(), &obstacles, &t).is_some());
    }

    #[test]
    fn test_visual_overlap_inside_inset_margin_is_safe() {
        let t = Tuning::default();
        // Visual boxes overlap by 5 units, hit-boxes don't
        let obstacles = [obstacle_at(t.player_x + t.player_width - 5.0)];
        assert!(find_hit(&PlayerBody::default(), &obstacles, &t).is_none());
    }

    #[test]
    fn test_high_player_clears_obstacle() {
        let t = Tuning::default();
        let player = PlayerBody {
            offset: 100.0,
            velocity: 0.0,
            grounded: false,
        };
        let obstacles = [obstacle_at(100.0)];
        assert!(find_hit(&player, &obstacles, &t).is_none());
    }

    #[test]
    fn test_first_hit_is_reported() {
        let t = Tuning::default();
        let obstacles = [
            obstacle_at(600.0),
            Obstacle::new(2, 90.0, 70.0, 80.0),
            Obstacle::new(3, 110.0, 70.0, 80.0),
        ];
        let hit = find_hit(&PlayerBody::default(), &obstacles, &t);
        assert_eq!(hit.map(|o| o.id), Some(2));
    }
}
