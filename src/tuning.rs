//! Data-driven game balance
//!
//! Every gameplay constant lives here as a field so a run can be
//! configured without recompiling. Defaults match `crate::consts`.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Reasons a tuning table is rejected
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TuningError {
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} must be finite (got {value})")]
    NotFinite { field: &'static str, value: f32 },

    #[error("spawn range is invalid: min {min}, max {max}")]
    SpawnRange { min: f32, max: f32 },

    #[error("spawn multiplier clamp is invalid: [{min}, {max}]")]
    SpawnScale { min: f32, max: f32 },

    #[error("obstacle inset fraction must be in [0, 0.5) (got {0})")]
    ObstacleInset(f32),

    #[error("player inset {inset} leaves no hit-box for a {width}x{height} player")]
    PlayerInset { inset: f32, width: f32, height: f32 },

    #[error("milestone interval must be at least 1")]
    MilestoneInterval,
}

/// Gameplay tuning table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub max_dt: f32,
    pub reference_fps: f32,

    pub ground_y: f32,
    pub play_width: f32,

    pub gravity: f32,
    pub jump_velocity: f32,
    pub milestone_jumps: u32,

    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub player_inset: f32,

    pub obstacle_width: f32,
    pub obstacle_height: f32,
    pub obstacle_inset_fraction: f32,
    pub spawn_margin: f32,
    pub despawn_x: f32,

    pub base_speed: f32,
    pub speed_increase: f32,
    pub score_rate: f32,

    pub spawn_min: f32,
    pub spawn_max: f32,
    pub spawn_ramp: f32,
    pub spawn_scale_min: f32,
    pub spawn_scale_max: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_dt: MAX_DT,
            reference_fps: REFERENCE_FPS,

            ground_y: GROUND_Y,
            play_width: PLAY_WIDTH,

            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            milestone_jumps: MILESTONE_JUMPS,

            player_x: PLAYER_X,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_inset: PLAYER_INSET,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            obstacle_inset_fraction: OBSTACLE_INSET_FRACTION,
            spawn_margin: SPAWN_MARGIN,
            despawn_x: DESPAWN_X,

            base_speed: BASE_SPEED,
            speed_increase: SPEED_INCREASE,
            score_rate: SCORE_RATE,

            spawn_min: SPAWN_MIN,
            spawn_max: SPAWN_MAX,
            spawn_ramp: SPAWN_RAMP,
            spawn_scale_min: SPAWN_SCALE_MIN,
            spawn_scale_max: SPAWN_SCALE_MAX,
        }
    }
}

impl Tuning {
    /// Check that every value keeps the simulation inside its invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("max_dt", self.max_dt),
            ("play_width", self.play_width),
            ("reference_fps", self.reference_fps),
            ("gravity", self.gravity),
            ("jump_velocity", self.jump_velocity),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
            ("base_speed", self.base_speed),
            ("spawn_ramp", self.spawn_ramp),
        ];
        for (field, value) in positive {
            // `!(v > 0)` also rejects NaN
            if !(value > 0.0 && value.is_finite()) {
                return Err(TuningError::NotPositive { field, value });
            }
        }

        // Speed and score never decrease during a run
        let non_negative = [
            ("speed_increase", self.speed_increase),
            ("score_rate", self.score_rate),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(TuningError::Negative { field, value });
            }
        }

        let finite = [
            ("ground_y", self.ground_y),
            ("player_x", self.player_x),
            ("spawn_margin", self.spawn_margin),
            ("despawn_x", self.despawn_x),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(TuningError::NotFinite { field, value });
            }
        }

        if !(self.spawn_min >= 0.0
            && self.spawn_min <= self.spawn_max
            && self.spawn_max.is_finite())
        {
            return Err(TuningError::SpawnRange {
                min: self.spawn_min,
                max: self.spawn_max,
            });
        }
        if !(self.spawn_scale_min > 0.0 && self.spawn_scale_min <= self.spawn_scale_max) {
            return Err(TuningError::SpawnScale {
                min: self.spawn_scale_min,
                max: self.spawn_scale_max,
            });
        }
        if !(0.0..0.5).contains(&self.obstacle_inset_fraction) {
            return Err(TuningError::ObstacleInset(self.obstacle_inset_fraction));
        }
        let half = self.player_width.min(self.player_height) / 2.0;
        if !(self.player_inset >= 0.0 && self.player_inset < half) {
            return Err(TuningError::PlayerInset {
                inset: self.player_inset,
                width: self.player_width,
                height: self.player_height,
            });
        }
        if self.milestone_jumps == 0 {
            return Err(TuningError::MilestoneInterval);
        }
        Ok(())
    }

    /// X coordinate where new obstacles appear
    pub fn spawn_x(&self) -> f32 {
        self.play_width + self.spawn_margin
    }

    /// Peak jump height above the ground
    pub fn jump_apex(&self) -> f32 {
        self.jump_velocity * self.jump_velocity / (2.0 * self.gravity)
    }
}
