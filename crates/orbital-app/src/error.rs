//! Host application errors.

use std::io;

use orbital_config::ConfigError;
use orbital_scene::SceneConfigError;

/// Errors that can stop the host.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The OS did not provide a configuration directory.
    #[error("could not determine OS configuration directory")]
    NoConfigDir,

    /// Directory creation or frame output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Loading or saving `config.ron` failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The scene settings were rejected.
    #[error("invalid scene settings: {0}")]
    Scene(#[from] SceneConfigError),

    /// A frame could not be encoded.
    #[error("failed to encode frame: {0}")]
    Encode(#[from] serde_json::Error),
}
