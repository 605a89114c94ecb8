//! Hot reload of `config.ron` while a session runs.

use std::path::PathBuf;

use orbital_config::{CliArgs, Config};
use tracing::{info, warn};

/// Polls the config directory and yields the new effective config when the
/// file on disk changes. CLI overrides are re-applied on top of every reload.
pub struct ConfigWatch {
    dir: PathBuf,
    on_disk: Config,
    overrides: CliArgs,
    every_frames: u64,
}

impl ConfigWatch {
    /// `on_disk` is the config as loaded, before CLI overrides. The file is
    /// checked once every `every_frames` frames (at least every frame).
    pub fn new(dir: PathBuf, on_disk: Config, overrides: CliArgs, every_frames: u32) -> Self {
        Self {
            dir,
            on_disk,
            overrides,
            every_frames: u64::from(every_frames.max(1)),
        }
    }

    /// Checks the file if frame `index` is due. An unreadable or invalid
    /// file keeps the running config and logs a warning.
    pub fn poll(&mut self, index: u64) -> Option<Config> {
        if index == 0 || index % self.every_frames != 0 {
            return None;
        }
        match self.on_disk.reload(&self.dir) {
            Ok(Some(fresh)) => {
                self.on_disk = fresh.clone();
                let mut effective = fresh;
                effective.apply_cli_overrides(&self.overrides);
                info!("Applying reloaded config from {}", self.dir.display());
                Some(effective)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Ignoring config change: {e}");
                None
            }
        }
    }
}
