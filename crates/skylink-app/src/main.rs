use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use skylink_app::cli::Args;
use skylink_app::config::{load_config, load_stage};
use skylink_app::report::{format_status_table, summarize};
use skylink_app::sim_loop::spawn_sim_loop;
use skylink_app::state::LoopCommand;
use skylink_app::AppError;
use skylink_core::commands::Command;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref()).context("failed to load config")?;
    let stage = load_stage(args.scene.as_deref(), args.seed).context("failed to load scene")?;

    let sim = spawn_sim_loop(stage, config).context("failed to start simulation")?;
    if args.rf {
        sim.commands.send(Command::EnableRf.into())?;
    }

    let mut last = None;
    for tick in 0..args.ticks {
        if let Some(progress) = args.sweep_progress(tick) {
            sim.commands.send(Command::SetProgress { progress }.into())?;
        }
        let report = sim.reports.recv().map_err(|_| AppError::LoopStopped)?;
        summarize(&report, args.status_interval);
        last = Some(report);
    }

    sim.commands.send(LoopCommand::Shutdown)?;
    if sim.handle.join().is_err() {
        warn!("sim loop thread panicked");
    }

    match last {
        Some(report) => info!(
            "finished at tick {} (progress {:.3})\n{}",
            report.time.tick,
            report.progress,
            format_status_table(&report.status)
        ),
        None => info!("no ticks run"),
    }
    Ok(())
}
