use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/media-carousel/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("media-carousel").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - Otherwise parses and validates it.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Config::default());
        }

        Self::load_from(&path)
    }

    /// Loads and validates configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Autoplay interval is non-zero
    /// - Container id, height and fallback image are non-empty
    /// - Root margins are finite and non-negative
    /// - Threshold lies within `0.0..=1.0`
    pub fn validate(&self) -> Result<(), ConfigError> {
        let carousel = &self.carousel;
        if carousel.autoplay_interval_ms == 0 {
            return Err(invalid("carousel.autoplay_interval_ms must be greater than 0"));
        }
        if carousel.container_id.trim().is_empty() {
            return Err(invalid("carousel.container_id must not be empty"));
        }
        if carousel.height.trim().is_empty() {
            return Err(invalid("carousel.height must not be empty"));
        }

        let lazy = &self.lazy_load;
        for (name, value) in [
            ("lazy_load.root_margin_px", lazy.root_margin_px),
            (
                "lazy_load.root_margin_horizontal_px",
                lazy.root_margin_horizontal_px,
            ),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::ValidationError {
                    message: format!("{} must be a non-negative number, got {}", name, value),
                });
            }
        }
        if !(0.0..=1.0).contains(&lazy.threshold) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "lazy_load.threshold must be between 0 and 1, got {}",
                    lazy.threshold
                ),
            });
        }
        if lazy.fallback_src.trim().is_empty() {
            return Err(invalid("lazy_load.fallback_src must not be empty"));
        }

        Ok(())
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::ValidationError {
        message: message.to_string(),
    }
}
