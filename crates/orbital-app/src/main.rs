//! Orbital scene host.
//!
//! Loads `config.ron`, applies CLI overrides and runs a scripted scroll and
//! pointer session through the scene engine, logging frame summaries and
//! optionally recording every frame as JSON lines.
//!
//! Run with: `cargo run -p orbital-app -- --record frames.jsonl`

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use orbital_app::{
    AppError, ConfigWatch, FrameSink, JsonLinesSink, PlatformDirs, TraceSink, run_scripted,
};
use orbital_config::{CliArgs, Config};
use tracing::{error, info};

/// CLI arguments for the host binary.
#[derive(Parser, Debug)]
#[command(name = "orbital", about = "Scroll- and cursor-driven planet scene")]
struct AppArgs {
    #[command(flatten)]
    cli: CliArgs,

    /// Write every frame as a JSON line to this file.
    #[arg(long)]
    record: Option<PathBuf>,
}

/// Config as loaded from disk, and with CLI overrides applied.
struct LoadedConfig {
    dirs: PlatformDirs,
    on_disk: Config,
    effective: Config,
}

fn load_config(args: &AppArgs) -> Result<LoadedConfig, AppError> {
    let dirs = match &args.cli.config {
        Some(dir) => PlatformDirs::from_config_dir(dir),
        None => PlatformDirs::resolve()?,
    };
    dirs.create_dirs()?;

    let on_disk = Config::load_or_create(&dirs.config_dir)?;
    let mut effective = on_disk.clone();
    effective.apply_cli_overrides(&args.cli);
    Ok(LoadedConfig {
        dirs,
        on_disk,
        effective,
    })
}

fn run(args: &AppArgs, loaded: &LoadedConfig) -> Result<(), AppError> {
    let config = &loaded.effective;
    let mut sinks: Vec<Box<dyn FrameSink>> =
        vec![Box::new(TraceSink::new(config.debug.log_every_frames))];
    if let Some(path) = &args.record {
        let file = File::create(path)?;
        sinks.push(Box::new(JsonLinesSink::new(BufWriter::new(file))));
        info!("Recording frames to {}", path.display());
    }

    // Check config.ron for edits about once a second.
    let mut watch = ConfigWatch::new(
        loaded.dirs.config_dir.clone(),
        loaded.on_disk.clone(),
        args.cli.clone(),
        config.session.fps,
    );
    let summary = run_scripted(config, &mut sinks, Some(&mut watch))?;
    info!(
        "Session done: {} frames, {:.2}s, {} mode changes",
        summary.frames, summary.elapsed, summary.mode_changes
    );
    if let Some(last) = summary.last {
        info!(
            "Final state: {:?}/{:?}, satellite at ({:.2}, {:.2}, {:.2})",
            last.phase,
            last.mode,
            last.satellite.smoothed_position.x,
            last.satellite.smoothed_position.y,
            last.satellite.smoothed_position.z,
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = AppArgs::parse();

    let loaded = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("orbital: {e}");
            return ExitCode::FAILURE;
        }
    };

    let config = &loaded.effective;
    orbital_log::init_logging(
        Some(&loaded.dirs.log_dir),
        cfg!(debug_assertions),
        Some(config),
    );

    info!("Orbital scene host");
    info!(
        "Viewport: {}x{} | fov {:.0} deg | cursor {}",
        config.viewport.width_px,
        config.viewport.height_px,
        config.viewport.fov_y_degrees,
        if config.scene.cursor_interactive { "interactive" } else { "off" }
    );

    match run(&args, &loaded) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
