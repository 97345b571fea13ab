//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through a clamped `dt`
//! - Injected RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod clock;
pub mod collision;
pub mod obstacle;
pub mod player;
pub mod rng;
pub mod score;
pub mod state;
pub mod tick;

pub use clock::{Stepper, clamp_dt};
pub use collision::{Aabb, find_hit, obstacle_hitbox, player_hitbox};
pub use obstacle::{Obstacle, ObstacleField, draw_interval, spawn_scale};
pub use player::PlayerBody;
pub use rng::{SequenceRng, SpawnRng, seeded};
pub use score::ScoreKeeper;
pub use state::{Command, Cue, Overlay, RunSession, RunState, Snapshot};
pub use tick::{FrameOutcome, tick};
