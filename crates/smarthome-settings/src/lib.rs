//! SmartHome Settings Crate
//!
//! Handles configuration files: loading, validation, and persistence.

pub mod config;
pub mod error;

pub use config::{Config, ConfigSource, DemoSettings, LoggingSettings, OutputSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
