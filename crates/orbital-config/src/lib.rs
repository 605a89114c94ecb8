//! Configuration for the orbital scene host.
//!
//! Settings persist to disk as `config.ron`, accept CLI overrides via clap,
//! and support hot-reload detection. Unknown or missing fields fall back to
//! defaults so older and newer files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, CursorPath, DebugConfig, SessionConfig, ViewportConfig};
pub use error::ConfigError;
