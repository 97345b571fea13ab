//! Speed ramp and score accumulation

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Accumulators run in f64 so long runs don't drift from the tuned curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreKeeper {
    /// Current scroll speed (units/s)
    pub speed: f64,
    /// Fractional score; reported floored
    pub score: f64,
}

impl ScoreKeeper {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            speed: f64::from(tuning.base_speed),
            score: 0.0,
        }
    }

    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Self::new(tuning);
    }

    /// Ramp speed, then bank score at the new speed
    ///
    /// The ramp is scaled by the reference frame rate so the curve matches
    /// the 60 fps tuning at any frame rate. Points per second are the
    /// rounded `speed * score_rate`.
    pub fn update(&mut self, dt: f32, tuning: &Tuning) {
        let dt = f64::from(dt);
        self.speed += f64::from(tuning.speed_increase) * dt * f64::from(tuning.reference_fps);
        self.score += dt * (self.speed * f64::from(tuning.score_rate)).round();
    }

    /// Score as shown to the player
    pub fn display_score(&self) -> u64 {
        self.score.max(0.0).floor() as u64
    }
}
