//! Startup configuration.
//!
//! Every field has a default, so an empty or partial TOML file is valid:
//!
//! ```toml
//! view = "multi_ray"
//!
//! [window]
//! title = "Ray Cast"
//! width = 1024
//! height = 768
//!
//! [raycast]
//! max_ray_length = 700.0
//!
//! [display]
//! ray_count = 360
//! show_fps = true
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::animator::ViewMode;
use crate::error::ConfigError;
use crate::raycast::DEFAULT_MAX_RAY_LENGTH;
use crate::settings::DisplaySettings;

/// Environment variable holding the path of the config file.
pub const CONFIG_ENV_VAR: &str = "RAYCAST_FOV_CONFIG";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Ray Cast".to_string(),
            width: 1024,
            height: 768,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RaycastConfig {
    pub max_ray_length: f64,
}

impl Default for RaycastConfig {
    fn default() -> Self {
        Self {
            max_ray_length: DEFAULT_MAX_RAY_LENGTH,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub raycast: RaycastConfig,
    pub display: DisplaySettings,
    pub view: ViewMode,
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Loads the file named by [`CONFIG_ENV_VAR`]. Falls back to defaults when the
    /// variable is unset or the file cannot be used.
    pub fn from_env() -> Self {
        let Ok(path) = std::env::var(CONFIG_ENV_VAR) else {
            log::info!("{CONFIG_ENV_VAR} not set, using default configuration");
            return Self::default();
        };
        match Self::load(Path::new(&path)) {
            Ok(config) => {
                log::info!("loaded configuration from {path}");
                config
            }
            Err(e) => {
                log::warn!("ignoring configuration {path}: {e}");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let length = self.raycast.max_ray_length;
        if !length.is_finite() || length <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "raycast.max_ray_length must be finite and positive, got {length}"
            )));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        Ok(())
    }
}
