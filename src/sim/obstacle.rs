//! Obstacle spawning, motion and despawn

use serde::{Deserialize, Serialize};

use super::rng::SpawnRng;
use crate::tuning::Tuning;

/// A single obstacle scrolling toward the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Obstacle {
    pub fn new(id: u32, x: f32, width: f32, height: f32) -> Self {
        Self {
            id,
            x,
            width,
            height,
        }
    }

    /// Right edge
    pub fn trailing_edge(&self) -> f32 {
        self.x + self.width
    }
}

/// Speed-dependent spawn interval multiplier
///
/// Shrinks linearly as speed grows past its base value and never leaves
/// `[spawn_scale_min, spawn_scale_max]`.
pub fn spawn_scale(speed: f32, tuning: &Tuning) -> f32 {
    (1.0 - (speed - tuning.base_speed) / tuning.spawn_ramp)
        .clamp(tuning.spawn_scale_min, tuning.spawn_scale_max)
}

/// Draw the gap until the next spawn
pub fn draw_interval(rng: &mut impl SpawnRng, speed: f32, tuning: &Tuning) -> f32 {
    rng.range(tuning.spawn_min, tuning.spawn_max) * spawn_scale(speed, tuning)
}

/// Live obstacles plus the spawn timer
///
/// `obstacles` is in spawn order, which is also left-to-right order since
/// everything scrolls at the same speed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleField {
    pub obstacles: Vec<Obstacle>,
    pub spawn_elapsed: f32,
    pub next_interval: f32,
    next_id: u32,
}

impl ObstacleField {
    pub fn new(rng: &mut impl SpawnRng, tuning: &Tuning) -> Self {
        Self {
            obstacles: Vec::new(),
            spawn_elapsed: 0.0,
            next_interval: draw_interval(rng, tuning.base_speed, tuning),
            next_id: 1,
        }
    }

    /// Drop every obstacle and restart the spawn timer
    ///
    /// Ids keep counting so an id is never reused within a session.
    pub fn reset(&mut self, rng: &mut impl SpawnRng, tuning: &Tuning) {
        self.obstacles.clear();
        self.spawn_elapsed = 0.0;
        self.next_interval = draw_interval(rng, tuning.base_speed, tuning);
    }

    /// Advance the spawn timer; spawns at most one obstacle per call
    pub fn tick_spawn(
        &mut self,
        dt: f32,
        speed: f32,
        rng: &mut impl SpawnRng,
        tuning: &Tuning,
    ) -> Option<u32> {
        self.spawn_elapsed += dt;
        if self.spawn_elapsed < self.next_interval {
            return None;
        }
        self.spawn_elapsed = 0.0;
        self.next_interval = draw_interval(rng, speed, tuning);
        Some(self.spawn(tuning))
    }

    /// Place a new obstacle just past the right edge
    pub fn spawn(&mut self, tuning: &Tuning) -> u32 {
        self.spawn_at(tuning.spawn_x(), tuning)
    }

    /// Place a new standard obstacle at `x`
    pub fn spawn_at(&mut self, x: f32, tuning: &Tuning) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle::new(
            id,
            x,
            tuning.obstacle_width,
            tuning.obstacle_height,
        ));
        log::debug!("Spawned obstacle {} at x={:.1}", id, x);
        id
    }

    /// Scroll every obstacle left
    pub fn advance(&mut self, speed: f32, dt: f32) {
        let dx = speed * dt;
        for obstacle in &mut self.obstacles {
            obstacle.x -= dx;
        }
    }

    /// Remove obstacles whose trailing edge passed `threshold`
    pub fn despawn(&mut self, threshold: f32) -> usize {
        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.trailing_edge() >= threshold);
        let removed = before - self.obstacles.len();
        if removed > 0 {
            log::debug!("Despawned {} obstacle(s)", removed);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::SequenceRng;

    #[test]
    fn test_spawn_scale_bounds() {
        let t = Tuning::default();
        assert_eq!(spawn_scale(t.base_speed, &t), 1.0);
        assert!((spawn_scale(t.base_speed + 450.0, &t) - 0.5).abs() < 1e-6);
        assert!((spawn_scale(t.base_speed + 225.0, &t) - 0.75).abs() < 1e-6);
        assert_eq!(spawn_scale(t.base_speed + 5000.0, &t), 0.5);
    }

    #[test]
    fn test_draw_interval_uses_rng() {
        let t = Tuning::default();
        let mut rng = SequenceRng::new([0.0, 0.5]);
        assert!((draw_interval(&mut rng, t.base_speed, &t) - 0.9).abs() < 1e-6);
        assert!((draw_interval(&mut rng, t.base_speed, &t) - 1.35).abs() < 1e-6);
    }

    #[test]
    fn test_spawn_after_interval() {
        let t = Tuning::default();
        let mut rng = SequenceRng::constant(0.0);
        let mut field = ObstacleField::new(&mut rng, &t);
        assert!((field.next_interval - 0.9).abs() < 1e-6);

        let mut spawned = None;
        let mut steps = 0;
        while spawned.is_none() {
            spawned = field.tick_spawn(0.016, t.base_speed, &mut rng, &t);
            steps += 1;
        }
        // 0.9 / 0.016 = 56.25
        assert_eq!(steps, 57);
        assert_eq!(spawned, Some(1));
        assert_eq!(field.spawn_elapsed, 0.0);
        assert_eq!(field.obstacles[0].x, t.spawn_x());
    }

    #[test]
    fn test_ids_unique_across_reset() {
        let t = Tuning::default();
        let mut rng = SequenceRng::constant(0.3);
        let mut field = ObstacleField::new(&mut rng, &t);
        let a = field.spawn(&t);
        field.reset(&mut rng, &t);
        assert!(field.is_empty());
        let b = field.spawn(&t);
        assert_ne!(a, b);
    }

    #[test]
    fn test_advance_and_despawn() {
        let t = Tuning::default();
        let mut rng = SequenceRng::constant(0.3);
        let mut field = ObstacleField::new(&mut rng, &t);
        field.spawn_at(-5.0, &t);
        field.spawn_at(200.0, &t);

        field.advance(100.0, 0.5);
        assert_eq!(field.obstacles[0].x, -55.0);
        assert_eq!(field.despawn(t.despawn_x), 0);

        field.advance(100.0, 0.5);
        // -105 + 70 = -35, still on the threshold side
        assert_eq!(field.despawn(t.despawn_x), 0);
        field.advance(100.0, 0.5);
        // -155 + 70 = -85 < -80
        assert_eq!(field.despawn(t.despawn_x), 1);
        assert_eq!(field.len(), 1);
        assert_eq!(field.obstacles[0].id, 2);
    }
}
