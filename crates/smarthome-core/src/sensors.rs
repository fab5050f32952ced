//! Sensor facades
//!
//! Each facade carries a sensor identity and forwards its single trigger to
//! the matching [`EventHub`] operation. The facades share no behavior beyond
//! that, so they are independent types.

use crate::error::Result;
use crate::event_bus::{EventHub, SensorId};

/// Motion detector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionSensor {
    sensor_id: SensorId,
}

impl MotionSensor {
    /// Create a motion sensor; the ID is not validated.
    pub fn new(sensor_id: SensorId) -> Self {
        Self { sensor_id }
    }

    /// Sensor identity
    pub fn sensor_id(&self) -> SensorId {
        self.sensor_id
    }

    /// Report motion to the hub
    ///
    /// Returns the number of handlers that received the event.
    pub fn detect_motion(&self, hub: &EventHub) -> Result<usize> {
        hub.simulate_motion(self.sensor_id)
    }
}

/// Door contact sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorSensor {
    sensor_id: SensorId,
}

impl DoorSensor {
    /// Create a door sensor; the ID is not validated.
    pub fn new(sensor_id: SensorId) -> Self {
        Self { sensor_id }
    }

    /// Sensor identity
    pub fn sensor_id(&self) -> SensorId {
        self.sensor_id
    }

    /// Report a door opening to the hub
    pub fn open_door(&self, hub: &EventHub) -> Result<usize> {
        hub.simulate_door_open(self.sensor_id)
    }
}

/// Thermostat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thermostat {
    sensor_id: SensorId,
}

impl Thermostat {
    /// Create a thermostat; the ID is not validated.
    pub fn new(sensor_id: SensorId) -> Self {
        Self { sensor_id }
    }

    /// Sensor identity
    pub fn sensor_id(&self) -> SensorId {
        self.sensor_id
    }

    /// Report a reading in degrees Celsius to the hub
    pub fn change_temperature(&self, hub: &EventHub, temperature: f64) -> Result<usize> {
        hub.simulate_temperature_change(self.sensor_id, temperature)
    }
}
