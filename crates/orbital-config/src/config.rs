//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use orbital_scene::EngineConfig;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level host configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Viewport and camera settings.
    pub viewport: ViewportConfig,
    /// Scene engine tunables.
    pub scene: EngineConfig,
    /// Scripted session settings.
    pub session: SessionConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Viewport and camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewportConfig {
    /// Viewport width in logical pixels.
    pub width_px: u32,
    /// Viewport height in logical pixels.
    pub height_px: u32,
    /// Vertical field of view of the scene camera, in degrees.
    pub fov_y_degrees: f64,
    /// Distance from the camera to the focal plane.
    pub camera_distance: f64,
}

/// Pointer movement used by the scripted session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CursorPath {
    /// Pointer never moves; the cursor stays centred.
    Still,
    /// Pointer traces a slow Lissajous figure across the viewport.
    Lissajous,
}

/// Scripted session configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// Frames per second the session is stepped at.
    pub fps: u32,
    /// Session length in seconds; scroll sweeps top to bottom over it.
    pub duration_secs: f64,
    /// Pointer movement.
    pub cursor_path: CursorPath,
    /// Pace frames against the wall clock instead of stepping as fast as possible.
    pub realtime: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Emit a frame summary every this many frames (0 disables).
    pub log_every_frames: u32,
}

// --- Default implementations ---

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width_px: 1280,
            height_px: 720,
            fov_y_degrees: 45.0,
            camera_distance: 6.0,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            duration_secs: 20.0,
            cursor_path: CursorPath::Lissajous,
            realtime: false,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_every_frames: 30,
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = ron::from_str(contents).map_err(ConfigError::ParseError)?;
        config.scene.validate()?;
        Ok(config)
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config = Self::parse(&contents)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(false)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config = Self::parse(&contents)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(4))
                .unwrap();
        assert!(ron_str.contains("width_px: 1280"));
        assert!(ron_str.contains("cursor_interactive: true"));
        assert!(ron_str.contains("step_fraction: 0.15"));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(viewport: (width_px: 800), debug: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.viewport.width_px, 800);
        assert_eq!(config.viewport.height_px, 720);
        assert_eq!(config.scene, EngineConfig::default());
        assert_eq!(config.session, SessionConfig::default());
    }

    #[test]
    fn test_partial_scene_override() {
        let ron_str = "(scene: (cursor_interactive: false, orbit: (radius: 4.0)))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert!(!config.scene.cursor_interactive);
        assert_eq!(config.scene.orbit.radius, 4.0);
        assert_eq!(config.scene.orbit.angular_speed, 0.4);
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.viewport.width_px = 1920;
        config.session.cursor_path = CursorPath::Still;
        config.scene.follow.reach = 0.6;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_invalid_scene_is_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.ron"),
            "(scene: (phases: (hero_end: 0.5, transition_end: 0.2)))",
        )
        .unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::InvalidScene(_))));
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.scene.orbit.smoothing = 0.1;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().scene.orbit.smoothing, 0.1);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result = Config::parse("{{not valid}}");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
