//! Cue dispatch to the sound collaborator
//!
//! The simulation queues `Cue`s; a `CueEmitter` hands them to a `CueSink`.
//! Playback is fire-and-forget: a failing sink is logged and skipped, and
//! never reaches back into the simulation.

use crate::sim::Cue;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Neigh on milestone jumps
    Neigh,
    /// Gallop loop
    Gallop,
    /// Background music loop
    Music,
}

/// Playback failure reported by a sink
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AudioError {
    #[error("playback rejected for {0:?}")]
    Rejected(SoundEffect),

    #[error("audio device unavailable: {0}")]
    Unavailable(String),
}

/// Receiver of audio cues
pub trait CueSink {
    /// Start the background loops
    fn on_run_start(&mut self) -> Result<(), AudioError>;
    /// Stop the background loops
    fn on_run_end(&mut self, final_score: u64) -> Result<(), AudioError>;
    /// Play the milestone effect
    fn on_milestone_jump(&mut self) -> Result<(), AudioError>;
}

/// Sink that only logs what it would play
#[derive(Debug, Default)]
pub struct LogSink;

impl CueSink for LogSink {
    fn on_run_start(&mut self) -> Result<(), AudioError> {
        log::info!("Starting {:?} and {:?} loops", SoundEffect::Gallop, SoundEffect::Music);
        Ok(())
    }

    fn on_run_end(&mut self, final_score: u64) -> Result<(), AudioError> {
        log::info!("Stopping loops - final score {}", final_score);
        Ok(())
    }

    fn on_milestone_jump(&mut self) -> Result<(), AudioError> {
        log::info!("Playing {:?}", SoundEffect::Neigh);
        Ok(())
    }
}

/// Forwards cues to a sink, swallowing sink failures
pub struct CueEmitter<S: CueSink> {
    sink: S,
    muted: bool,
    failures: u64,
}

impl<S: CueSink> CueEmitter<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            muted: false,
            failures: 0,
        }
    }

    /// Mute/unmute all cues
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Number of cues the sink rejected so far
    pub fn failures(&self) -> u64 {
        self.failures
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Deliver one cue
    pub fn emit(&mut self, cue: Cue) {
        if self.muted {
            return;
        }
        let result = match cue {
            Cue::RunStarted => self.sink.on_run_start(),
            Cue::RunEnded { final_score } => self.sink.on_run_end(final_score),
            Cue::MilestoneJump { .. } => self.sink.on_milestone_jump(),
        };
        if let Err(e) = result {
            self.failures += 1;
            log::warn!("Cue {:?} dropped: {}", cue, e);
        }
    }

    /// Deliver cues in order
    pub fn dispatch(&mut self, cues: impl IntoIterator<Item = Cue>) {
        for cue in cues {
            self.emit(cue);
        }
    }
}
