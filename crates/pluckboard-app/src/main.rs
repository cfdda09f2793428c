//! Main application entry point.

use clap::Parser;
use kurbo::Size;
use pluckboard_app::{AppError, Script, run_script};
use pluckboard_core::config::CanvasConfig;
use std::path::PathBuf;

/// Replay a gesture script on the canvas and report the rendered frame.
#[derive(Debug, Parser)]
#[command(name = "pluckboard", version)]
struct Cli {
    /// JSON array of pointer events and toolbar actions.
    script: PathBuf,
    /// Canvas configuration (JSON).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1080.0)]
    width: f64,
    /// Viewport height in pixels.
    #[arg(long, default_value_t = 1920.0)]
    height: f64,
}

fn main() {
    env_logger::init();
    log::info!("Starting Pluckboard");

    if let Err(err) = run(Cli::parse()) {
        log::error!("{err}");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = match &cli.config {
        Some(path) => CanvasConfig::load(path)?,
        None => CanvasConfig::default(),
    };
    let script = Script::load(&cli.script)?;
    log::info!("Replaying {} steps from {}", script.steps.len(), cli.script.display());

    let summary = run_script(&script, &config, Size::new(cli.width, cli.height));
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
