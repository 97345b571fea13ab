//! Player vertical physics

use serde::{Deserialize, Serialize};

/// Vertical kinematic state of the runner
///
/// `grounded` holds exactly when both offset and velocity are zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerBody {
    /// Height above the ground plane (never negative)
    pub offset: f32,
    /// Vertical velocity, positive is up
    pub velocity: f32,
    pub grounded: bool,
}

impl Default for PlayerBody {
    fn default() -> Self {
        Self {
            offset: 0.0,
            velocity: 0.0,
            grounded: true,
        }
    }
}

impl PlayerBody {
    /// Semi-implicit Euler step; landing snaps to the ground
    pub fn integrate(&mut self, gravity: f32, dt: f32) {
        self.velocity -= gravity * dt;
        self.offset += self.velocity * dt;
        if self.offset <= 0.0 {
            self.offset = 0.0;
            self.velocity = 0.0;
            self.grounded = true;
        } else {
            self.grounded = false;
        }
    }

    /// Launch upward if standing; returns whether the jump happened
    pub fn try_jump(&mut self, jump_velocity: f32) -> bool {
        if !self.grounded {
            return false;
        }
        self.velocity = jump_velocity;
        self.grounded = false;
        true
    }
}
