//! # SmartHome
//!
//! A small smart home sensor hub built on synchronous publish/subscribe:
//! - Motion, door, and temperature channels on a central [`EventHub`]
//! - Sensor facades that publish into the hub
//! - Console handlers that print one line per event
//!
//! ## Architecture
//!
//! 1. **smarthome-core** - Event hub, event records, sensor facades
//! 2. **smarthome-settings** - Configuration files and validation
//! 3. **smarthome** - Console handlers, demo driver, and the binary

pub mod console;
pub mod demo;

pub use smarthome_core::{
    DoorEvent, DoorSensor, EventHub, EventKind, HubError, HubEvent, MotionEvent, MotionSensor,
    SensorId, SubscriptionId, TemperatureEvent, Thermostat,
};

pub use smarthome_settings::{Config, ConfigSource, DemoSettings, LoggingSettings, OutputSettings};

pub use console::register_console_handlers;
pub use demo::{run_demo, should_wait_for_enter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("SMARTHOME_BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, so stdout carries only event lines
/// - RUST_LOG environment variable support
/// - `default_level` applied when RUST_LOG does not override it
pub fn init_logging(default_level: tracing::Level) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
