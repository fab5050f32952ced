//! Event type definitions for the event hub.
//!
//! One record type per channel. Records are built fresh for each dispatch,
//! never mutated, and designed to be cloneable and serializable for logging.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use super::hub::{Channel, EventHub};

/// Numeric sensor identity. Negative and duplicate IDs are accepted.
pub type SensorId = i32;

/// Timestamp pattern used when no other format is configured
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Named event channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Motion detected.
    Motion,
    /// Door opened.
    Door,
    /// Temperature changed.
    Temperature,
}

impl EventKind {
    /// All channels, in declaration order
    pub const ALL: [EventKind; 3] = [EventKind::Motion, EventKind::Door, EventKind::Temperature];
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::Motion => write!(f, "motion"),
            EventKind::Door => write!(f, "door"),
            EventKind::Temperature => write!(f, "temperature"),
        }
    }
}

/// An event record that travels over one hub channel.
///
/// The implementing type *is* the channel selector: subscribing or
/// publishing with `MotionEvent` always targets the motion channel.
pub trait HubEvent: Clone + Send + Sync + 'static {
    /// Channel this record belongs to.
    const KIND: EventKind;

    /// Sensor that produced the event
    fn sensor_id(&self) -> SensorId;

    /// When the event was dispatched
    fn timestamp(&self) -> DateTime<Local>;

    /// One-line human readable description using the given strftime pattern.
    fn describe(&self, timestamp_format: &str) -> String;

    /// Select this record's channel on a hub.
    fn channel(hub: &EventHub) -> &Channel<Self>;
}

/// Render a timestamp, falling back to RFC 3339 when the pattern is invalid.
pub fn format_timestamp(timestamp: &DateTime<Local>, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", timestamp.format(pattern)).is_err() {
        return timestamp.to_rfc3339();
    }
    out
}

/// Motion sensor triggered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionEvent {
    /// Sensor that detected the motion.
    pub sensor_id: SensorId,
    /// Dispatch time.
    pub timestamp: DateTime<Local>,
}

impl MotionEvent {
    /// Build a record stamped with the current local time
    pub fn now(sensor_id: SensorId) -> Self {
        Self {
            sensor_id,
            timestamp: Local::now(),
        }
    }
}

impl HubEvent for MotionEvent {
    const KIND: EventKind = EventKind::Motion;

    fn sensor_id(&self) -> SensorId {
        self.sensor_id
    }

    fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    fn describe(&self, timestamp_format: &str) -> String {
        format!(
            "Motion detected by sensor {} at {}",
            self.sensor_id,
            format_timestamp(&self.timestamp, timestamp_format)
        )
    }

    fn channel(hub: &EventHub) -> &Channel<Self> {
        hub.motion_channel()
    }
}

/// Door sensor reported an opening
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoorEvent {
    /// Sensor on the door that opened.
    pub sensor_id: SensorId,
    /// Dispatch time.
    pub timestamp: DateTime<Local>,
}

impl DoorEvent {
    /// Build a record stamped with the current local time
    pub fn now(sensor_id: SensorId) -> Self {
        Self {
            sensor_id,
            timestamp: Local::now(),
        }
    }
}

impl HubEvent for DoorEvent {
    const KIND: EventKind = EventKind::Door;

    fn sensor_id(&self) -> SensorId {
        self.sensor_id
    }

    fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    fn describe(&self, timestamp_format: &str) -> String {
        format!(
            "Door opened by sensor {} at {}",
            self.sensor_id,
            format_timestamp(&self.timestamp, timestamp_format)
        )
    }

    fn channel(hub: &EventHub) -> &Channel<Self> {
        hub.door_channel()
    }
}

/// Thermostat reported a new reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureEvent {
    /// Thermostat that took the reading.
    pub sensor_id: SensorId,
    /// Dispatch time.
    pub timestamp: DateTime<Local>,
    /// Reading in degrees Celsius.
    pub temperature: f64,
}

impl TemperatureEvent {
    /// Build a record stamped with the current local time
    pub fn now(sensor_id: SensorId, temperature: f64) -> Self {
        Self {
            sensor_id,
            timestamp: Local::now(),
            temperature,
        }
    }
}

impl HubEvent for TemperatureEvent {
    const KIND: EventKind = EventKind::Temperature;

    fn sensor_id(&self) -> SensorId {
        self.sensor_id
    }

    fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    fn describe(&self, timestamp_format: &str) -> String {
        format!(
            "Temperature changed by sensor {} at {}: {}°C",
            self.sensor_id,
            format_timestamp(&self.timestamp, timestamp_format),
            self.temperature
        )
    }

    fn channel(hub: &EventHub) -> &Channel<Self> {
        hub.temperature_channel()
    }
}

macro_rules! display_with_default_format {
    ($($event:ty),+) => {
        $(
            impl std::fmt::Display for $event {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(&self.describe(DEFAULT_TIMESTAMP_FORMAT))
                }
            }
        )+
    };
}

display_with_default_format!(MotionEvent, DoorEvent, TemperatureEvent);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 3, 9, 14, 5, 7)
            .single()
            .expect("unambiguous local time")
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(EventKind::Motion.to_string(), "motion");
        assert_eq!(EventKind::Door.to_string(), "door");
        assert_eq!(EventKind::Temperature.to_string(), "temperature");
    }

    #[test]
    fn test_kind_constants() {
        assert_eq!(MotionEvent::KIND, EventKind::Motion);
        assert_eq!(DoorEvent::KIND, EventKind::Door);
        assert_eq!(TemperatureEvent::KIND, EventKind::Temperature);
    }

    #[test]
    fn test_motion_description() {
        let event = MotionEvent {
            sensor_id: 1,
            timestamp: fixed_time(),
        };
        assert_eq!(
            event.to_string(),
            "Motion detected by sensor 1 at 2024-03-09 14:05:07"
        );
    }

    #[test]
    fn test_door_description_custom_format() {
        let event = DoorEvent {
            sensor_id: 2,
            timestamp: fixed_time(),
        };
        assert_eq!(
            event.describe("%H:%M"),
            "Door opened by sensor 2 at 14:05"
        );
    }

    #[test]
    fn test_temperature_description() {
        let event = TemperatureEvent {
            sensor_id: 3,
            timestamp: fixed_time(),
            temperature: 25.5,
        };
        assert_eq!(
            event.to_string(),
            "Temperature changed by sensor 3 at 2024-03-09 14:05:07: 25.5°C"
        );
    }

    #[test]
    fn test_invalid_pattern_falls_back_to_rfc3339() {
        let ts = fixed_time();
        assert_eq!(format_timestamp(&ts, "%Q"), ts.to_rfc3339());
    }

    fn accessors<E: HubEvent>(event: &E) -> (SensorId, DateTime<Local>) {
        (event.sensor_id(), event.timestamp())
    }

    #[test]
    fn test_trait_accessors_match_fields() {
        let ts = fixed_time();
        let motion = MotionEvent { sensor_id: 1, timestamp: ts };
        let door = DoorEvent { sensor_id: 2, timestamp: ts };
        let temperature = TemperatureEvent {
            sensor_id: 3,
            timestamp: ts,
            temperature: 25.5,
        };

        assert_eq!(accessors(&motion), (1, ts));
        assert_eq!(accessors(&door), (2, ts));
        assert_eq!(accessors(&temperature), (3, ts));
    }

    #[test]
    fn test_now_keeps_inputs() {
        let event = TemperatureEvent::now(-4, -12.25);
        assert_eq!(event.sensor_id, -4);
        assert_eq!(event.temperature, -12.25);
    }

    #[test]
    fn test_event_serializes() {
        let event = TemperatureEvent {
            sensor_id: 3,
            timestamp: fixed_time(),
            temperature: 25.5,
        };
        let json = serde_json::to_string(&event).expect("serialize");
        let back: TemperatureEvent = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, event);

        let kind = serde_json::to_string(&EventKind::Temperature).expect("serialize kind");
        assert_eq!(kind, "\"temperature\"");
    }
}
