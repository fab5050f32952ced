//! Configuration management for SmartHome
//!
//! Supports JSON and TOML file formats. The default location is
//! `<platform config dir>/smarthome/config.toml`.
//!
//! Configuration is organized into sections:
//! - Demo wiring (sensor IDs, thermostat reading, exit behavior)
//! - Console output (timestamp pattern)
//! - Logging (default level)

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};

/// Directory name under the platform config dir
pub const APP_DIR_NAME: &str = "smarthome";

/// File name of the default config
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Demonstration sequence settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoSettings {
    /// ID given to the motion sensor.
    #[serde(default = "default_motion_sensor_id")]
    pub motion_sensor_id: i32,
    /// ID given to the door sensor.
    #[serde(default = "default_door_sensor_id")]
    pub door_sensor_id: i32,
    /// ID given to the thermostat.
    #[serde(default = "default_thermostat_id")]
    pub thermostat_id: i32,
    /// Reading the thermostat reports, in degrees Celsius.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Consume one line of stdin before exiting.
    #[serde(default = "default_wait_for_enter")]
    pub wait_for_enter: bool,
}

fn default_motion_sensor_id() -> i32 {
    1
}

fn default_door_sensor_id() -> i32 {
    2
}

fn default_thermostat_id() -> i32 {
    3
}

fn default_temperature() -> f64 {
    25.5
}

fn default_wait_for_enter() -> bool {
    true
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            motion_sensor_id: default_motion_sensor_id(),
            door_sensor_id: default_door_sensor_id(),
            thermostat_id: default_thermostat_id(),
            temperature: default_temperature(),
            wait_for_enter: default_wait_for_enter(),
        }
    }
}

/// Console output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// strftime pattern for event timestamps.
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

fn default_timestamp_format() -> String {
    "%Y-%m-%d %H:%M:%S".to_string()
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            timestamp_format: default_timestamp_format(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default level when `RUST_LOG` does not say otherwise.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LoggingSettings {
    /// Parsed log level
    pub fn level(&self) -> ConfigResult<tracing::Level> {
        self.level
            .parse::<tracing::Level>()
            .map_err(|_| ConfigError::InvalidSetting {
                key: "logging.level".to_string(),
                reason: format!("unknown level '{}'", self.level),
            })
    }
}

/// Where a loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Read from this file.
    File(PathBuf),
    /// Built-in defaults; no file exists at the default path.
    NoFile(PathBuf),
    /// Built-in defaults because the default path could not be resolved.
    Fallback {
        /// Why the default path was unavailable.
        reason: String,
    },
}

impl ConfigSource {
    /// Whether defaults were used because something went wrong
    pub fn is_fallback(&self) -> bool {
        matches!(self, ConfigSource::Fallback { .. })
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "configuration from {}", path.display()),
            ConfigSource::NoFile(path) => {
                write!(f, "built-in defaults (no file at {})", path.display())
            }
            ConfigSource::Fallback { reason } => write!(f, "built-in defaults ({})", reason),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Demo wiring
    #[serde(default)]
    pub demo: DemoSettings,
    /// Console output
    #[serde(default)]
    pub output: OutputSettings,
    /// Logging
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(SettingsError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path, else the default path if present, else defaults
    ///
    /// Also returns where the configuration came from, so the caller can
    /// report it once logging is up.
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<(Self, ConfigSource)> {
        Self::load_with_default_path(path, Self::default_path())
    }

    fn load_with_default_path(
        path: Option<&Path>,
        default_path: SettingsResult<PathBuf>,
    ) -> SettingsResult<(Self, ConfigSource)> {
        if let Some(path) = path {
            let config = Self::load_from_file(path)?;
            return Ok((config, ConfigSource::File(path.to_path_buf())));
        }

        match default_path {
            Ok(default) if default.is_file() => {
                let config = Self::load_from_file(&default)?;
                Ok((config, ConfigSource::File(default)))
            }
            Ok(default) => Ok((Self::default(), ConfigSource::NoFile(default))),
            Err(e) => Ok((
                Self::default(),
                ConfigSource::Fallback {
                    reason: e.to_string(),
                },
            )),
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.demo.temperature.is_finite() {
            return Err(ConfigError::ValueOutOfRange {
                key: "demo.temperature".to_string(),
                value: self.demo.temperature.to_string(),
            });
        }

        let pattern = &self.output.timestamp_format;
        if pattern.is_empty() {
            return Err(ConfigError::InvalidSetting {
                key: "output.timestamp_format".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::InvalidSetting {
                key: "output.timestamp_format".to_string(),
                reason: format!("'{}' is not a valid strftime pattern", pattern),
            });
        }

        self.logging.level()?;

        Ok(())
    }
}
