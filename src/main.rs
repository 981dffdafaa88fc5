//! Flappy Sim entry point
//!
//! Headless driver: runs the fixed-tick loop with the autopilot at the
//! controls and logs what happens. Drawing is left to an external renderer
//! consuming the per-tick snapshots.
//!
//! Usage: `flappy-sim [CONFIG.json] [--ticks N] [--headless]` (see `--help`)

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use flappy_sim::platform::{Clock, FrameLimiter, SystemClock, TickClock};
use flappy_sim::sim::{RenderSnapshot, Simulation, TickInput, Transition};
use flappy_sim::{ConfigError, WorldConfig};

/// One minute at the default tick rate
const DEFAULT_TICKS: u64 = 3600;

#[derive(Parser, Debug)]
#[command(name = "flappy-sim")]
#[command(about = "Run the obstacle-avoidance simulation with the autopilot at the controls")]
struct Args {
    /// World configuration (JSON); built-in defaults when omitted
    config: Option<PathBuf>,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = DEFAULT_TICKS)]
    ticks: u64,

    /// Run on the deterministic tick clock as fast as possible
    #[arg(long)]
    headless: bool,
}

/// Logs the transitions each frame reports
struct Reporter {
    runs: u32,
}

impl Reporter {
    fn new() -> Self {
        Self { runs: 0 }
    }

    fn observe(&mut self, snap: &RenderSnapshot) {
        for transition in &snap.transitions {
            match transition {
                Transition::Started => {
                    self.runs += 1;
                    log::info!("Run {} started (tick {})", self.runs, snap.tick);
                }
                Transition::Ended(cause) => log::info!(
                    "Run {} over at tick {}: {:?}, score {}",
                    self.runs,
                    snap.tick,
                    cause,
                    snap.score
                ),
                Transition::Restarted => log::debug!("Back to idle (tick {})", snap.tick),
            }
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<WorldConfig, ConfigError> {
    match path {
        Some(path) => WorldConfig::load(path),
        None => {
            let config = WorldConfig::default();
            config.validate()?;
            Ok(config)
        }
    }
}

/// Run as fast as possible on the deterministic clock
fn run_headless(sim: &mut Simulation, ticks: u64, input: &TickInput) -> RenderSnapshot {
    let mut clock = TickClock::new(sim.config().tick_rate_hz);
    let mut reporter = Reporter::new();
    let mut snap = sim.snapshot();
    for _ in 0..ticks {
        clock.advance();
        snap = sim.tick(input, clock.now_ms());
        reporter.observe(&snap);
    }
    log::debug!(
        "Headless run covered {} ticks ({} ms of game time)",
        clock.ticks(),
        clock.now_ms()
    );
    snap
}

/// Run in real time, paced by the frame limiter
fn run_realtime(sim: &mut Simulation, ticks: u64, input: &TickInput) -> RenderSnapshot {
    let rate = sim.config().tick_rate_hz;
    let mut clock = SystemClock::new();
    let mut limiter = FrameLimiter::new(rate);
    log::info!("Pacing to {:?} per frame", limiter.frame_budget());
    let mut reporter = Reporter::new();
    let mut snap = sim.snapshot();
    for i in 0..ticks {
        snap = sim.tick(input, clock.now_ms());
        reporter.observe(&snap);
        if i > 0 && i % rate as u64 == 0 {
            log::debug!("{} fps, score {}", limiter.fps(), snap.score);
        }
        limiter.wait();
    }
    snap
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Flappy Sim starting...");

    let args = Args::parse();

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut sim = match Simulation::new(config) {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("Cannot start simulation: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let snap = if args.headless {
        run_headless(&mut sim, args.ticks, &input)
    } else {
        run_realtime(&mut sim, args.ticks, &input)
    };

    log::info!(
        "Finished after {} ticks: state {:?}, score {}, best {}",
        snap.tick,
        sim.state(),
        snap.score,
        snap.best.max(snap.score)
    );
    ExitCode::SUCCESS
}
