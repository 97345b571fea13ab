//! Gallop entry point
//!
//! Headless native driver: runs a session on a simulated 60 Hz frame
//! clock with an autopilot pressing jump, and prints frames to stdout.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, bail};

use gallop::sim::{Command, FrameOutcome, RunSession, RunState};
use gallop::{CueEmitter, FrameObserver, LogSink, Settings, TextRenderer};

/// Simulated display refresh interval (ms)
const FRAME_MS: f64 = 1000.0 / 60.0;

struct Args {
    seed: Option<u64>,
    seconds: f64,
    config: Option<String>,
    autopilot: bool,
    json: bool,
    every: u64,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            seed: None,
            seconds: 30.0,
            config: None,
            autopilot: true,
            json: false,
            every: 30,
        }
    }
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--seed" => {
                let v = iter.next().context("--seed needs a value")?;
                args.seed = Some(v.parse().with_context(|| format!("bad seed: {v}"))?);
            }
            "--seconds" => {
                let v = iter.next().context("--seconds needs a value")?;
                args.seconds = v.parse().with_context(|| format!("bad duration: {v}"))?;
            }
            "--config" => {
                args.config = Some(iter.next().context("--config needs a path")?);
            }
            "--every" => {
                let v = iter.next().context("--every needs a value")?;
                args.every = v.parse::<u64>().with_context(|| format!("bad frame count: {v}"))?.max(1);
            }
            "--no-autopilot" => args.autopilot = false,
            "--json" => args.json = true,
            "-h" | "--help" => {
                println!(
                    "usage: gallop [--seed N] [--seconds S] [--config PATH] [--no-autopilot] [--json] [--every N]"
                );
                std::process::exit(0);
            }
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(args)
}

/// Jump when the nearest obstacle ahead is about to reach the player
fn autopilot_wants_jump(session: &RunSession) -> bool {
    if !session.player.grounded {
        return false;
    }
    let t = &session.tuning;
    let player_front = t.player_x + t.player_width;
    // Lead distance grows with speed so the apex lines up with the obstacle
    let lead = session.speed() * 0.1;
    session
        .obstacles()
        .iter()
        .filter(|o| o.x + o.width > t.player_x)
        .any(|o| o.x - player_front < lead)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;
    let settings = match &args.config {
        Some(path) => Settings::load(path).with_context(|| format!("loading {path}"))?,
        None => Settings::default(),
    };
    let seed = args.seed.or(settings.seed).unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    log::info!("Gallop (native) starting with seed {}", seed);

    let mut session = RunSession::new(settings.tuning.clone(), seed);
    let mut emitter = CueEmitter::new(LogSink);
    emitter.set_muted(settings.muted);
    let mut renderer = TextRenderer::default();

    session.apply(Command::StartOrRestart);
    emitter.dispatch(session.drain_cues());

    let total_frames = (args.seconds * 1000.0 / FRAME_MS).ceil() as u64;
    let mut now = 0.0;
    for frame in 0..total_frames {
        if args.autopilot && autopilot_wants_jump(&session) {
            session.apply(Command::Jump);
        }

        let outcome = session.frame(now);
        emitter.dispatch(session.drain_cues());
        now += FRAME_MS;

        let collided = matches!(outcome, FrameOutcome::Collided { .. });
        if frame % args.every == 0 || collided {
            let snap = session.snapshot();
            if args.json {
                println!("{}", serde_json::to_string(&snap)?);
            } else {
                renderer.observe(&snap);
                println!("{}\n", renderer.last_frame);
            }
        }
        if session.state() != RunState::Running {
            break;
        }
    }

    match session.state() {
        RunState::GameOver => println!("Game over, score {}", session.score()),
        _ => println!("Survived {:.0}s, score {}", args.seconds, session.score()),
    }
    Ok(())
}
