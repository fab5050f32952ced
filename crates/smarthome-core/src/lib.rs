//! # SmartHome Core
//!
//! Core types for the SmartHome event system.
//! Provides the event hub, the per-channel event records, and the sensor
//! facades that publish into the hub.

pub mod error;
pub mod event_bus;
pub mod sensors;

pub use error::{HandlerError, HandlerResult, HubError, Result};

pub use event_bus::{
    format_timestamp, Channel, DoorEvent, EventHub, EventKind, HubEvent, MotionEvent, SensorId,
    SubscriptionId, TemperatureEvent, DEFAULT_TIMESTAMP_FORMAT,
};

pub use sensors::{DoorSensor, MotionSensor, Thermostat};
