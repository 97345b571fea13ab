//! Gallop - an endless-runner jumping game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, run state)
//! - `audio`: Cue dispatch to a sound collaborator
//! - `render`: Observer interface and a plain-text renderer
//! - `settings`: Runtime configuration file
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use audio::{AudioError, CueEmitter, CueSink, LogSink};
pub use render::{FrameObserver, TextRenderer};
pub use settings::{Settings, SettingsError};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
///
/// Empirically tuned against a 60 fps browser loop. `Tuning::default()`
/// mirrors these exactly.
pub mod consts {
    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_DT: f32 = 0.032;
    /// Frame rate the per-frame speed ramp was tuned at
    pub const REFERENCE_FPS: f32 = 60.0;

    /// Height of the ground plane above the bottom of the play area
    pub const GROUND_Y: f32 = 70.0;
    /// Play area width; obstacles spawn just past its right edge
    pub const PLAY_WIDTH: f32 = 800.0;

    /// Downward acceleration (units/s²)
    pub const GRAVITY: f32 = 2200.0;
    /// Upward velocity applied by a jump (units/s)
    pub const JUMP_VELOCITY: f32 = 760.0;
    /// Every Nth accepted jump fires the milestone cue
    pub const MILESTONE_JUMPS: u32 = 5;

    /// Player box
    pub const PLAYER_X: f32 = 64.0;
    pub const PLAYER_WIDTH: f32 = 100.0;
    pub const PLAYER_HEIGHT: f32 = 100.0;
    /// Player hit-box shrink on every side
    pub const PLAYER_INSET: f32 = 10.0;

    /// Obstacle box
    pub const OBSTACLE_WIDTH: f32 = 70.0;
    pub const OBSTACLE_HEIGHT: f32 = 80.0;
    /// Obstacle hit-box shrink per axis, as a fraction of its own size
    pub const OBSTACLE_INSET_FRACTION: f32 = 0.15;
    /// Distance past the right edge where obstacles appear
    pub const SPAWN_MARGIN: f32 = 20.0;
    /// Obstacles are dropped once `x + width` falls below this
    pub const DESPAWN_X: f32 = -80.0;

    /// Scroll speed at run start (units/s)
    pub const BASE_SPEED: f32 = 360.0;
    /// Speed gained per reference frame
    pub const SPEED_INCREASE: f32 = 0.05;
    /// Score gained per second per unit of speed (rounded)
    pub const SCORE_RATE: f32 = 0.3;

    /// Nominal spawn interval range (seconds)
    pub const SPAWN_MIN: f32 = 0.9;
    pub const SPAWN_MAX: f32 = 1.8;
    /// Speed gain over which the spawn interval halves
    pub const SPAWN_RAMP: f32 = 900.0;
    /// Bounds of the speed-dependent spawn multiplier
    pub const SPAWN_SCALE_MIN: f32 = 0.5;
    pub const SPAWN_SCALE_MAX: f32 = 1.0;
}
