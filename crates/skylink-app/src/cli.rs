use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "skylink")]
#[command(about = "Headless airfield RF and antenna zone simulation")]
#[command(version)]
pub struct Args {
    /// Scene description (JSON). Defaults to the seeded demo airfield.
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Seed for the demo airfield.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Simulation config (RON). Defaults to the stock airfield setup.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of ticks to run.
    #[arg(long, default_value_t = 600)]
    pub ticks: u64,

    /// Enable RF visualization at start.
    #[arg(long)]
    pub rf: bool,

    /// Sweep path progress from 0 to 1 over the run.
    #[arg(long)]
    pub sweep: bool,

    /// Log the antenna status table every this many ticks (0 = only at the end).
    #[arg(long, default_value_t = 60)]
    pub status_interval: u64,
}

impl Args {
    /// Progress requested for a tick of a sweep run.
    pub fn sweep_progress(&self, tick: u64) -> Option<f64> {
        if !self.sweep {
            return None;
        }
        if self.ticks <= 1 {
            return Some(1.0);
        }
        Some(tick as f64 / (self.ticks - 1) as f64)
    }
}
