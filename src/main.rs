//! One-shot bed inspection from the shell.
//!
//! `platecheck <config.toml>` loads the config, runs a single inspection
//! against the configured camera and model, and prints the verdict. Motion
//! and cancellation are console stubs, so this doubles as a dry-run harness
//! for camera and model setup.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use platecheck::{
    BedCheckCommand, HomedAxes, InspectionConfig, MotionControl, Outcome, PrinterHost,
};

struct ConsoleHost;

impl PrinterHost for ConsoleHost {
    fn respond_info(&self, message: &str) {
        println!("{message}");
    }

    fn cancel_print(&self) {
        warn!("No print host attached; cancellation request not delivered");
    }
}

/// Stand-in motion host: reports XY as homed and logs moves without issuing
/// them.
struct StationaryMotion;

impl MotionControl for StationaryMotion {
    fn homed_axes(&self) -> HomedAxes {
        HomedAxes { x: true, y: true }
    }

    fn home_xy(&self) {
        info!("Skipping XY homing (no motion host attached)");
    }

    fn move_to(&self, x: i32, y: i32) {
        info!("Skipping move to X{x} Y{y} (no motion host attached)");
    }
}

fn init_tracing(debug: bool) {
    let default_filter = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();
}

fn run() -> Result<Outcome> {
    let mut args = env::args_os().skip(1);
    let (Some(path), None) = (args.next(), args.next()) else {
        bail!("usage: platecheck <config.toml>");
    };

    let path = PathBuf::from(path);
    let config = InspectionConfig::load(&path)
        .with_context(|| format!("could not load config from {}", path.display()))?;
    init_tracing(config.debug);

    let command = BedCheckCommand::new(config);
    Ok(command.execute(&ConsoleHost, &StationaryMotion))
}

fn main() -> ExitCode {
    match run() {
        Ok(Outcome::Continue) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("platecheck: {e:#}");
            ExitCode::FAILURE
        }
    }
}
