use parking_lot::Mutex;
use smarthome_core::*;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
enum Seen {
    Motion(SensorId),
    Door(SensorId),
    Temperature(SensorId, f64),
}

fn recording_hub() -> (EventHub, Arc<Mutex<Vec<Seen>>>) {
    let hub = EventHub::new();
    let log: Arc<Mutex<Vec<Seen>>> = Arc::default();

    let sink = log.clone();
    hub.on_motion(move |e| sink.lock().push(Seen::Motion(e.sensor_id)));
    let sink = log.clone();
    hub.on_door_open(move |e| sink.lock().push(Seen::Door(e.sensor_id)));
    let sink = log.clone();
    hub.on_temperature_change(move |e| {
        sink.lock().push(Seen::Temperature(e.sensor_id, e.temperature))
    });

    (hub, log)
}

#[test]
fn test_reference_scenario() {
    let (hub, log) = recording_hub();

    let motion = MotionSensor::new(1);
    let door = DoorSensor::new(2);
    let thermostat = Thermostat::new(3);

    motion.detect_motion(&hub).expect("motion dispatch");
    door.open_door(&hub).expect("door dispatch");
    thermostat
        .change_temperature(&hub, 25.5)
        .expect("temperature dispatch");

    assert_eq!(
        *log.lock(),
        vec![
            Seen::Motion(1),
            Seen::Door(2),
            Seen::Temperature(3, 25.5)
        ]
    );
}

#[test]
fn test_each_trigger_publishes_exactly_once() {
    let (hub, log) = recording_hub();

    for _ in 0..3 {
        MotionSensor::new(4).detect_motion(&hub).expect("dispatch");
    }

    assert_eq!(*log.lock(), vec![Seen::Motion(4); 3]);
}

#[test]
fn test_unsubscribed_handler_is_skipped() {
    let hub = EventHub::new();
    let log: Arc<Mutex<Vec<&'static str>>> = Arc::default();

    let sink = log.clone();
    let first = hub.on_door_open(move |_| sink.lock().push("first"));
    let sink = log.clone();
    hub.on_door_open(move |_| sink.lock().push("second"));

    assert!(hub.unsubscribe(first));
    DoorSensor::new(2).open_door(&hub).expect("dispatch");

    assert_eq!(*log.lock(), vec!["second"]);
}

#[test]
fn test_handler_error_reaches_the_sensor_caller() {
    let hub = EventHub::new();
    hub.subscribe_fallible(|_: &MotionEvent| Err("siren unreachable".into()));

    let err = MotionSensor::new(1)
        .detect_motion(&hub)
        .expect_err("handler error should propagate");

    assert_eq!(err.kind(), EventKind::Motion);
    assert!(err.to_string().ends_with("siren unreachable"));
}

#[test]
#[should_panic(expected = "handler panicked")]
fn test_handler_panic_unwinds_through_publish() {
    let hub = EventHub::new();
    hub.on_motion(|_| panic!("handler panicked"));
    let _ = hub.simulate_motion(1);
}
