//! Sim loop thread: runs the engine at the host tick rate and emits reports.
//!
//! The engine is initialized on the caller's thread so scene problems
//! surface as errors, then moved into the loop thread together with the
//! stage. Commands arrive over an `mpsc` channel and every frame report
//! goes back over another.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::info;

use skylink_core::config::AirfieldConfig;
use skylink_core::constants::TICK_RATE;
use skylink_core::state::FrameReport;
use skylink_scene::Stage;
use skylink_sim::AirfieldEngine;

use crate::error::AppResult;
use crate::state::LoopCommand;

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Channels and thread handle of a running sim loop.
pub struct SimLoop {
    pub commands: mpsc::Sender<LoopCommand>,
    pub reports: mpsc::Receiver<FrameReport>,
    pub handle: JoinHandle<()>,
}

/// Initialize an engine against `stage` and run it on a new thread.
pub fn spawn_sim_loop(stage: Stage, config: AirfieldConfig) -> AppResult<SimLoop> {
    spawn_sim_loop_with(stage, config, TICK_DURATION)
}

/// `spawn_sim_loop` with a custom tick duration.
pub fn spawn_sim_loop_with(
    mut stage: Stage,
    config: AirfieldConfig,
    tick_duration: Duration,
) -> AppResult<SimLoop> {
    let mut engine = AirfieldEngine::new(config)?;
    engine.init(&mut stage)?;

    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();
    let (report_tx, report_rx) = mpsc::channel::<FrameReport>();

    let handle = std::thread::Builder::new()
        .name("skylink-sim-loop".into())
        .spawn(move || run_sim_loop(engine, stage, cmd_rx, report_tx, tick_duration))?;

    Ok(SimLoop {
        commands: cmd_tx,
        reports: report_rx,
        handle,
    })
}

/// The loop. Runs until `Shutdown`, or until either channel disconnects.
fn run_sim_loop(
    mut engine: AirfieldEngine,
    mut stage: Stage,
    cmd_rx: mpsc::Receiver<LoopCommand>,
    report_tx: mpsc::Sender<FrameReport>,
    tick_duration: Duration,
) {
    let mut next_tick_time = Instant::now();

    'run: loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(LoopCommand::Command(cmd)) => engine.queue_command(cmd),
                Ok(LoopCommand::Shutdown) => break 'run,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => break 'run,
            }
        }

        // 2. Advance one tick
        let report = engine.tick(&mut stage);

        // 3. Hand the report over; nobody listening means we are done
        if report_tx.send(report).is_err() {
            break;
        }

        // 4. Sleep until the next tick
        next_tick_time += tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > tick_duration * 2 {
            // Too far behind, reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }

    engine.shutdown();
    info!("sim loop stopped at tick {}", engine.time().tick);
}
