//! Platform directory resolution.
//!
//! The host keeps its `config.ron` and log files under the OS configuration
//! directory (XDG on Linux, Known Folders on Windows, Library on macOS).

use std::path::{Path, PathBuf};

use crate::error::AppError;

const APP_NAME: &str = "orbital";

/// OS-specific directory paths for the orbital host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDirs {
    /// User configuration: `config.ron`.
    pub config_dir: PathBuf,
    /// Log files.
    pub log_dir: PathBuf,
}

impl PlatformDirs {
    /// Resolve platform-specific directories without creating them on disk.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NoConfigDir`] if the OS does not expose a
    /// configuration directory.
    pub fn resolve() -> Result<Self, AppError> {
        let config_base = dirs::config_dir().ok_or(AppError::NoConfigDir)?;
        Ok(Self::resolve_with_root(&config_base))
    }

    /// Resolve directories rooted under a custom base path.
    pub fn resolve_with_root(root: &Path) -> Self {
        let app_dir = root.join(APP_NAME);
        Self {
            config_dir: app_dir.join("config"),
            log_dir: app_dir.join("logs"),
        }
    }

    /// Use an explicit config directory; logs go to its `logs` subdirectory.
    pub fn from_config_dir(config_dir: &Path) -> Self {
        Self {
            config_dir: config_dir.to_path_buf(),
            log_dir: config_dir.join("logs"),
        }
    }

    /// Create all directories on disk.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Io`] if any directory cannot be created.
    pub fn create_dirs(&self) -> Result<(), AppError> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}
