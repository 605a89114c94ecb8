//! Command-line argument parsing for the orbital scene host.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, CursorPath};

/// Orbital scene command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "orbital", about = "Scroll- and cursor-driven planet scene")]
pub struct CliArgs {
    /// Viewport width in pixels.
    #[arg(long)]
    pub width: Option<u32>,

    /// Viewport height in pixels.
    #[arg(long)]
    pub height: Option<u32>,

    /// Frames per second for the scripted session.
    #[arg(long)]
    pub fps: Option<u32>,

    /// Session length in seconds.
    #[arg(long)]
    pub duration: Option<f64>,

    /// Keep the pointer still instead of tracing a path.
    #[arg(long)]
    pub static_cursor: bool,

    /// Pace frames against the wall clock.
    #[arg(long)]
    pub realtime: bool,

    /// Disable cursor interaction: the satellite drifts instead of following.
    #[arg(long)]
    pub orbit_only: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.viewport.width_px = w;
        }
        if let Some(h) = args.height {
            self.viewport.height_px = h;
        }
        if let Some(fps) = args.fps {
            self.session.fps = fps;
        }
        if let Some(duration) = args.duration {
            self.session.duration_secs = duration;
        }
        if args.static_cursor {
            self.session.cursor_path = CursorPath::Still;
        }
        if args.realtime {
            self.session.realtime = true;
        }
        if args.orbit_only {
            self.scene.cursor_interactive = false;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
