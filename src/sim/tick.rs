//! Run state machine and per-frame update
//!
//! Commands only mutate state; the frame pass is the only place time
//! advances. Order within a frame: speed/score, player, spawn, scroll and
//! despawn, collision.

use super::clock::clamp_dt;
use super::collision::find_hit;
use super::rng::SpawnRng;
use super::state::{Command, Cue, RunSession, RunState};

/// What a single update pass did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Not running; nothing was touched
    Skipped,
    /// Simulation advanced, run continues
    Advanced,
    /// A collision ended the run this frame
    Collided { obstacle_id: u32 },
}

/// Advance a running session by `dt` seconds
pub fn tick<R: SpawnRng>(session: &mut RunSession<R>, dt: f32) -> FrameOutcome {
    if session.state != RunState::Running {
        return FrameOutcome::Skipped;
    }

    let dt = clamp_dt(dt, session.tuning.max_dt);
    if dt == 0.0 {
        return FrameOutcome::Advanced;
    }
    session.frame_count += 1;

    let tuning = &session.tuning;
    session.scorer.update(dt, tuning);
    let speed = session.scorer.speed as f32;

    session.player.integrate(tuning.gravity, dt);

    session
        .field
        .tick_spawn(dt, speed, &mut session.rng, tuning);
    session.field.advance(speed, dt);
    session.field.despawn(tuning.despawn_x);

    if let Some(hit) = find_hit(&session.player, &session.field.obstacles, tuning) {
        let obstacle_id = hit.id;
        end_run(session);
        return FrameOutcome::Collided { obstacle_id };
    }

    FrameOutcome::Advanced
}

fn end_run<R: SpawnRng>(session: &mut RunSession<R>) {
    session.state = RunState::GameOver;
    session.stepper.arm();
    let final_score = session.score();
    session.cues.push(Cue::RunEnded { final_score });
    log::info!(
        "Run ended: score {} after {} jumps at speed {:.1}",
        final_score,
        session.jump_count,
        session.scorer.speed
    );
}

impl<R: SpawnRng> RunSession<R> {
    /// Frame callback carrying an absolute timestamp in milliseconds
    ///
    /// The stepper is only consulted while running, so a stopped run never
    /// accumulates time.
    pub fn frame(&mut self, now_ms: f64) -> FrameOutcome {
        if self.state != RunState::Running {
            return FrameOutcome::Skipped;
        }
        let dt = self.stepper.step(now_ms);
        tick(self, dt)
    }

    /// Advance by an explicit delta in seconds
    pub fn advance(&mut self, dt: f32) -> FrameOutcome {
        tick(self, dt)
    }

    /// Apply an input command; returns whether it was accepted
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Jump => self.jump(),
            Command::StartOrRestart => self.start_or_restart(),
        }
    }

    /// Jump if running and standing on the ground
    pub fn jump(&mut self) -> bool {
        if self.state != RunState::Running {
            return false;
        }
        if !self.player.try_jump(self.tuning.jump_velocity) {
            return false;
        }
        self.jump_count += 1;
        // A zero interval disables milestones
        if self.jump_count.checked_rem(self.tuning.milestone_jumps) == Some(0) {
            log::debug!("Milestone jump #{}", self.jump_count);
            self.cues.push(Cue::MilestoneJump {
                jump_count: self.jump_count,
            });
        }
        true
    }

    /// Reset everything and begin a fresh run from Idle or GameOver
    pub fn start_or_restart(&mut self) -> bool {
        if self.state == RunState::Running {
            return false;
        }
        self.reset_entities();
        self.state = RunState::Running;
        self.cues.push(Cue::RunStarted);
        log::info!("Run started");
        true
    }

    /// Return to the title screen from GameOver
    pub fn reset(&mut self) -> bool {
        if self.state == RunState::Running {
            return false;
        }
        self.reset_entities();
        self.state = RunState::Idle;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::SequenceRng;
    use crate::tuning::Tuning;

    fn session() -> RunSession<SequenceRng> {
        RunSession::with_rng(Tuning::default(), SequenceRng::constant(0.5))
    }

    /// Session whose first spawn is far away
    fn quiet_session() -> RunSession<SequenceRng> {
        let tuning = Tuning {
            spawn_min: 100.0,
            spawn_max: 100.0,
            ..Default::default()
        };
        RunSession::with_rng(tuning, SequenceRng::constant(0.0))
    }

    fn land<R: SpawnRng>(s: &mut RunSession<R>) {
        for _ in 0..200 {
            s.advance(0.016);
            if s.player.grounded {
                return;
            }
        }
        panic!("player never landed");
    }

    #[test]
    fn test_idle_ignores_jump_and_frames() {
        let mut s = session();
        assert!(!s.jump());
        assert_eq!(s.advance(0.016), FrameOutcome::Skipped);
        assert_eq!(s.frame(16.0), FrameOutcome::Skipped);
        assert_eq!(s.jump_count, 0);
        assert!(s.drain_cues().is_empty());
    }

    #[test]
    fn test_start_emits_cue_and_runs() {
        let mut s = session();
        assert!(s.apply(Command::StartOrRestart));
        assert_eq!(s.state(), RunState::Running);
        assert_eq!(s.drain_cues(), vec![Cue::RunStarted]);
        assert_eq!(s.overlay(), None);
        // Already running
        assert!(!s.start_or_restart());
    }

    #[test]
    fn test_first_frame_has_zero_dt() {
        let mut s = quiet_session();
        s.start_or_restart();
        s.frame(50_000.0);
        assert_eq!(s.frame_count, 0);
        assert_eq!(s.speed(), s.tuning.base_speed);
        s.frame(50_016.0);
        assert_eq!(s.frame_count, 1);
        assert!(s.speed() > s.tuning.base_speed);
    }

    #[test]
    fn test_jump_survives_zero_dt_frame() {
        let mut s = quiet_session();
        s.start_or_restart();
        assert!(s.jump());
        s.advance(0.0);
        s.advance(0.016);
        assert!(s.player.offset > 0.0);
    }

    #[test]
    fn test_jump_rejected_midair() {
        let mut s = quiet_session();
        s.start_or_restart();
        assert!(s.jump());
        s.advance(0.016);
        assert!(!s.jump());
        assert_eq!(s.jump_count, 1);
    }

    #[test]
    fn test_milestone_on_fifth_jump() {
        let mut s = quiet_session();
        s.start_or_restart();
        s.drain_cues();
        for i in 1..=5 {
            assert!(s.jump());
            if i < 5 {
                assert!(s.pending_cues().is_empty(), "cue fired early on jump {i}");
            }
            land(&mut s);
        }
        assert_eq!(s.drain_cues(), vec![Cue::MilestoneJump { jump_count: 5 }]);
    }

    #[test]
    fn test_zero_milestone_interval_never_fires() {
        let tuning = Tuning {
            milestone_jumps: 0,
            spawn_min: 100.0,
            spawn_max: 100.0,
            ..Default::default()
        };
        let mut s = RunSession::with_rng(tuning, SequenceRng::constant(0.0));
        s.start_or_restart();
        s.drain_cues();
        for _ in 0..5 {
            assert!(s.jump());
            land(&mut s);
        }
        assert_eq!(s.jump_count, 5);
        assert!(s.drain_cues().is_empty());
    }

    #[test]
    fn test_collision_ends_run_and_freezes() {
        let mut s = quiet_session();
        s.start_or_restart();
        s.drain_cues();
        let x = s.tuning.player_x;
        let id = s.field.spawn_at(x + 10.0, &s.tuning.clone());

        assert_eq!(s.advance(0.016), FrameOutcome::Collided { obstacle_id: id });
        assert_eq!(s.state(), RunState::GameOver);
        let score = s.score();
        assert_eq!(s.drain_cues(), vec![Cue::RunEnded { final_score: score }]);
        assert_eq!(s.overlay(), Some(crate::sim::Overlay::GameOver { score }));

        let frozen = s.snapshot();
        assert_eq!(s.advance(0.016), FrameOutcome::Skipped);
        assert_eq!(s.frame(1_000.0), FrameOutcome::Skipped);
        assert!(!s.jump());
        assert_eq!(s.snapshot(), frozen);
    }

    #[test]
    fn test_restart_from_game_over() {
        let mut s = quiet_session();
        s.start_or_restart();
        for _ in 0..30 {
            s.advance(0.016);
        }
        let x = s.tuning.player_x;
        s.field.spawn_at(x, &s.tuning.clone());
        s.advance(0.016);
        assert_eq!(s.state(), RunState::GameOver);

        assert!(s.start_or_restart());
        assert_eq!(s.state(), RunState::Running);
        assert_eq!(s.score(), 0);
        assert_eq!(s.speed(), s.tuning.base_speed);
        assert!(s.obstacles().is_empty());
        assert_eq!(s.jump_count, 0);
    }

    #[test]
    fn test_reset_to_idle() {
        let mut s = quiet_session();
        s.start_or_restart();
        assert!(!s.reset(), "cannot leave a running run through reset");
        let x = s.tuning.player_x;
        s.field.spawn_at(x, &s.tuning.clone());
        s.advance(0.016);
        assert!(s.reset());
        assert_eq!(s.state(), RunState::Idle);
        assert!(s.obstacles().is_empty());
    }

    #[test]
    fn test_spawned_obstacle_moves_in_same_frame() {
        let tuning = Tuning {
            spawn_min: 0.01,
            spawn_max: 0.01,
            ..Default::default()
        };
        let mut s = RunSession::with_rng(tuning, SequenceRng::constant(0.0));
        s.start_or_restart();
        s.advance(0.016);
        assert_eq!(s.obstacles().len(), 1);
        assert!(s.obstacles()[0].x < s.tuning.spawn_x());
    }
}
