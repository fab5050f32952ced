//! Demonstration sequence
//!
//! Builds one sensor of each type and triggers each once.

use smarthome_core::{DoorSensor, EventHub, MotionSensor, Thermostat};
use smarthome_settings::DemoSettings;

/// Trigger the motion sensor, the door sensor, then the thermostat
///
/// Returns the total number of handler invocations. Stops at the first
/// handler error.
pub fn run_demo(hub: &EventHub, demo: &DemoSettings) -> smarthome_core::Result<usize> {
    let motion = MotionSensor::new(demo.motion_sensor_id);
    let door = DoorSensor::new(demo.door_sensor_id);
    let thermostat = Thermostat::new(demo.thermostat_id);

    tracing::info!(
        "Running demo: motion={}, door={}, thermostat={} ({}°C)",
        motion.sensor_id(),
        door.sensor_id(),
        thermostat.sensor_id(),
        demo.temperature
    );

    let mut delivered = motion.detect_motion(hub)?;
    delivered += door.open_door(hub)?;
    delivered += thermostat.change_temperature(hub, demo.temperature)?;

    tracing::debug!("Demo delivered {} event(s) to handlers", delivered);
    Ok(delivered)
}

/// Whether the binary should consume one line of stdin before exiting
///
/// `--once` always wins over `demo.wait_for_enter`.
pub fn should_wait_for_enter(demo: &DemoSettings, once: bool) -> bool {
    demo.wait_for_enter && !once
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::register_console_handlers;
    use parking_lot::Mutex;
    use smarthome_core::{EventKind, MotionEvent};
    use smarthome_settings::Config;
    use std::sync::Arc;

    fn printed_lines(config: &Config) -> Vec<String> {
        let hub = EventHub::new();
        let sink = Arc::new(Mutex::new(Vec::<u8>::new()));
        register_console_handlers(&hub, sink.clone(), &config.output.timestamp_format);

        let delivered = run_demo(&hub, &config.demo).expect("demo");
        assert_eq!(delivered, 3);

        let text = String::from_utf8(sink.lock().clone()).expect("utf8");
        text.lines().map(str::to_string).collect()
    }

    #[test]
    fn test_default_demo_prints_three_lines() {
        let lines = printed_lines(&Config::default());

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Motion detected by sensor 1 at "));
        assert!(lines[1].starts_with("Door opened by sensor 2 at "));
        assert!(lines[2].starts_with("Temperature changed by sensor 3 at "));
        assert!(lines[2].ends_with(": 25.5°C"));
    }

    #[test]
    fn test_configured_ids_and_format() {
        let mut config = Config::default();
        config.demo.motion_sensor_id = 10;
        config.demo.door_sensor_id = -20;
        config.demo.thermostat_id = 30;
        config.demo.temperature = -4.5;
        config.output.timestamp_format = "[fixed]".to_string();

        assert_eq!(
            printed_lines(&config),
            vec![
                "Motion detected by sensor 10 at [fixed]".to_string(),
                "Door opened by sensor -20 at [fixed]".to_string(),
                "Temperature changed by sensor 30 at [fixed]: -4.5°C".to_string(),
            ]
        );
    }

    #[test]
    fn test_wait_for_enter_gate() {
        let mut demo = DemoSettings::default();
        assert!(should_wait_for_enter(&demo, false));
        assert!(!should_wait_for_enter(&demo, true));

        demo.wait_for_enter = false;
        assert!(!should_wait_for_enter(&demo, false));
        assert!(!should_wait_for_enter(&demo, true));
    }

    #[test]
    fn test_counts_deliveries() {
        let hub = EventHub::new();
        hub.on_motion(|_| {});
        hub.on_motion(|_| {});
        hub.on_temperature_change(|_| {});

        let delivered = run_demo(&hub, &DemoSettings::default()).expect("demo");
        assert_eq!(delivered, 3);
    }

    #[test]
    fn test_stops_at_first_failure() {
        let hub = EventHub::new();
        hub.subscribe_fallible(|_: &MotionEvent| Err("no power".into()));
        let door_calls = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let calls = door_calls.clone();
        hub.on_door_open(move |_| {
            calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        });

        let err = run_demo(&hub, &DemoSettings::default()).expect_err("demo should fail");
        assert_eq!(err.kind(), EventKind::Motion);
        assert_eq!(door_calls.load(std::sync::atomic::Ordering::SeqCst), 0);
    }
}
