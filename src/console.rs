//! Console handlers
//!
//! Print one line per sensor event to a shared writer.

use parking_lot::Mutex;
use smarthome_core::{DoorEvent, EventHub, HubEvent, MotionEvent, SubscriptionId, TemperatureEvent};
use std::io::Write;
use std::sync::Arc;

/// Subscribe a printing handler on every channel
///
/// Lines look like `Motion detected by sensor 1 at 2024-03-09 14:05:07`.
/// A failed write is reported as a handler error by the publishing call.
/// Returns the motion, door, and temperature subscriptions in that order.
pub fn register_console_handlers<W>(
    hub: &EventHub,
    sink: Arc<Mutex<W>>,
    timestamp_format: &str,
) -> [SubscriptionId; 3]
where
    W: Write + Send + 'static,
{
    [
        subscribe_printer::<MotionEvent, W>(hub, sink.clone(), timestamp_format),
        subscribe_printer::<DoorEvent, W>(hub, sink.clone(), timestamp_format),
        subscribe_printer::<TemperatureEvent, W>(hub, sink, timestamp_format),
    ]
}

fn subscribe_printer<E, W>(hub: &EventHub, sink: Arc<Mutex<W>>, timestamp_format: &str) -> SubscriptionId
where
    E: HubEvent,
    W: Write + Send + 'static,
{
    let timestamp_format = timestamp_format.to_string();
    hub.subscribe_fallible(move |event: &E| {
        let mut out = sink.lock();
        writeln!(out, "{}", event.describe(&timestamp_format))?;
        out.flush()?;
        Ok(())
    })
}
