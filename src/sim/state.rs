//! Run session and core simulation types
//!
//! A `RunSession` owns everything a run mutates. Nothing outside it holds
//! references to the player or obstacles; observers read a `Snapshot`.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::Stepper;
use super::obstacle::{Obstacle, ObstacleField};
use super::player::PlayerBody;
use super::rng::{SpawnRng, seeded};
use super::score::ScoreKeeper;
use crate::tuning::Tuning;

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// Waiting for a start command, everything at defaults
    Idle,
    /// Frame loop active
    Running,
    /// Collision ended the run; entities frozen where they were
    GameOver,
}

/// Normalized input commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Jump,
    StartOrRestart,
}

/// Events surfaced to the audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    /// Start background loops
    RunStarted,
    /// Stop background loops
    RunEnded { final_score: u64 },
    /// Every Nth accepted jump
    MilestoneJump { jump_count: u32 },
}

/// Overlay shown over the play area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Overlay {
    PressToStart,
    GameOver { score: u64 },
}

impl Overlay {
    pub fn title(&self) -> &'static str {
        match self {
            Overlay::PressToStart => "Press Space to Jump",
            Overlay::GameOver { .. } => "Game Over",
        }
    }

    pub fn body(&self) -> String {
        match self {
            Overlay::PressToStart => "Avoid the jumps. Every 5 jumps: neigh!".to_string(),
            Overlay::GameOver { score } => format!("Score: {}", score),
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            Overlay::PressToStart => "Press Enter or click to start",
            Overlay::GameOver { .. } => "Press Enter or click to restart",
        }
    }
}

/// Read-only view of a session for renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: RunState,
    pub player_x: f32,
    pub player_offset: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub ground_y: f32,
    pub play_width: f32,
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
    pub speed: f32,
    pub jump_count: u32,
    pub overlay: Option<Overlay>,
}

/// Complete state of one game instance
#[derive(Debug, Clone)]
pub struct RunSession<R = Pcg32> {
    /// Written only by the state machine
    pub(crate) state: RunState,
    pub tuning: Tuning,
    pub player: PlayerBody,
    pub field: ObstacleField,
    pub scorer: ScoreKeeper,
    /// Accepted jumps this run
    pub jump_count: u32,
    /// Frames simulated this run
    pub frame_count: u64,
    pub stepper: Stepper,
    /// Pending cues in emission order
    pub(crate) cues: Vec<Cue>,
    pub(crate) rng: R,
}

impl RunSession<Pcg32> {
    /// Idle session with a seeded PCG spawn generator
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self::with_rng(tuning, seeded(seed))
    }
}

impl<R: SpawnRng> RunSession<R> {
    /// Idle session drawing spawn intervals from `rng`
    pub fn with_rng(tuning: Tuning, mut rng: R) -> Self {
        let field = ObstacleField::new(&mut rng, &tuning);
        Self {
            state: RunState::Idle,
            player: PlayerBody::default(),
            field,
            scorer: ScoreKeeper::new(&tuning),
            jump_count: 0,
            frame_count: 0,
            stepper: Stepper::new(tuning.max_dt),
            cues: Vec::new(),
            rng,
            tuning,
        }
    }

    /// Put every entity back to its run-start value
    pub(crate) fn reset_entities(&mut self) {
        self.player = PlayerBody::default();
        self.field.reset(&mut self.rng, &self.tuning);
        self.scorer.reset(&self.tuning);
        self.jump_count = 0;
        self.frame_count = 0;
        self.stepper.arm();
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn score(&self) -> u64 {
        self.scorer.display_score()
    }

    pub fn speed(&self) -> f32 {
        self.scorer.speed as f32
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.field.obstacles
    }

    /// Take every cue emitted since the last drain
    pub fn drain_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    pub fn pending_cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn overlay(&self) -> Option<Overlay> {
        match self.state {
            RunState::Idle => Some(Overlay::PressToStart),
            RunState::Running => None,
            RunState::GameOver => Some(Overlay::GameOver {
                score: self.score(),
            }),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            player_x: self.tuning.player_x,
            player_offset: self.player.offset,
            player_width: self.tuning.player_width,
            player_height: self.tuning.player_height,
            ground_y: self.tuning.ground_y,
            play_width: self.tuning.play_width,
            obstacles: self.field.obstacles.clone(),
            score: self.score(),
            speed: self.scorer.speed as f32,
            jump_count: self.jump_count,
            overlay: self.overlay(),
        }
    }
}
