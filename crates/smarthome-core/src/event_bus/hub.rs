//! Event Hub implementation.
//!
//! Provides the per-kind [`Channel`] subscriber list and the [`EventHub`]
//! that owns one channel for each sensor event type.

use parking_lot::RwLock;
use std::sync::Arc;
use uuid::Uuid;

use super::events::{DoorEvent, EventKind, HubEvent, MotionEvent, SensorId, TemperatureEvent};
use crate::error::{HandlerResult, HubError, Result};

/// Subscription handle for unsubscribing from a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId {
    id: Uuid,
    kind: EventKind,
}

impl SubscriptionId {
    /// Create a new unique subscription ID on the given channel
    pub(crate) fn new(kind: EventKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
        }
    }

    /// Channel the subscription belongs to
    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.id.to_string()[..8])
    }
}

/// Type alias for stored handler functions
type Handler<E> = Arc<dyn Fn(&E) -> HandlerResult + Send + Sync>;

/// Ordered subscriber list for one event type
pub struct Channel<E> {
    handlers: RwLock<Vec<(SubscriptionId, Handler<E>)>>,
}

impl<E: HubEvent> Channel<E> {
    /// Create an empty channel
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(Vec::new()),
        }
    }

    /// Append an infallible handler
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.subscribe_fallible(move |event: &E| {
            handler(event);
            Ok(())
        })
    }

    /// Append a handler that may fail
    ///
    /// An error stops the dispatch it occurs in; see [`Channel::publish`].
    pub fn subscribe_fallible<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&E) -> HandlerResult + Send + Sync + 'static,
    {
        let id = SubscriptionId::new(E::KIND);
        self.handlers.write().push((id, Arc::new(handler)));
        tracing::debug!("Subscription {} added to {} channel", id, E::KIND);
        id
    }

    /// Remove a handler
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.write();
        let before = handlers.len();
        handlers.retain(|(existing, _)| *existing != id);
        let removed = handlers.len() < before;
        if removed {
            tracing::debug!("Subscription {} removed from {} channel", id, E::KIND);
        }
        removed
    }

    /// Number of subscribed handlers
    pub fn len(&self) -> usize {
        self.handlers.read().len()
    }

    /// Whether no handler is subscribed
    pub fn is_empty(&self) -> bool {
        self.handlers.read().is_empty()
    }

    /// Invoke every subscribed handler in subscription order
    ///
    /// The subscriber list is captured before the first call, so handlers
    /// added or removed by a handler take effect on the next publish.
    /// Returns how many handlers ran. The first handler error aborts the
    /// dispatch and is returned; a panicking handler unwinds to the caller.
    pub fn publish(&self, event: &E) -> Result<usize> {
        let snapshot: Vec<(SubscriptionId, Handler<E>)> = self.handlers.read().clone();
        tracing::trace!(
            "Dispatching {} event from sensor {} ({}) to {} handler(s)",
            E::KIND,
            event.sensor_id(),
            event.timestamp().to_rfc3339(),
            snapshot.len()
        );

        for (id, handler) in &snapshot {
            handler(event).map_err(|source| HubError::HandlerFailed {
                kind: E::KIND,
                subscription: *id,
                source,
            })?;
        }

        Ok(snapshot.len())
    }
}

impl<E: HubEvent> Default for Channel<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: HubEvent> std::fmt::Debug for Channel<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Channel")
            .field("kind", &E::KIND)
            .field("subscribers", &self.len())
            .finish()
    }
}

/// Central hub with one channel per sensor event type
pub struct EventHub {
    motion: Channel<MotionEvent>,
    door: Channel<DoorEvent>,
    temperature: Channel<TemperatureEvent>,
}

impl EventHub {
    /// Create a hub with no subscribers
    pub fn new() -> Self {
        Self {
            motion: Channel::new(),
            door: Channel::new(),
            temperature: Channel::new(),
        }
    }

    pub(crate) fn motion_channel(&self) -> &Channel<MotionEvent> {
        &self.motion
    }

    pub(crate) fn door_channel(&self) -> &Channel<DoorEvent> {
        &self.door
    }

    pub(crate) fn temperature_channel(&self) -> &Channel<TemperatureEvent> {
        &self.temperature
    }

    /// Channel carrying events of type `E`
    pub fn channel<E: HubEvent>(&self) -> &Channel<E> {
        E::channel(self)
    }

    /// Subscribe a handler to the channel of `E`
    pub fn subscribe<E, F>(&self, handler: F) -> SubscriptionId
    where
        E: HubEvent,
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.channel::<E>().subscribe(handler)
    }

    /// Subscribe a fallible handler to the channel of `E`
    pub fn subscribe_fallible<E, F>(&self, handler: F) -> SubscriptionId
    where
        E: HubEvent,
        F: Fn(&E) -> HandlerResult + Send + Sync + 'static,
    {
        self.channel::<E>().subscribe_fallible(handler)
    }

    /// Publish an event to every handler on its channel
    pub fn publish<E: HubEvent>(&self, event: E) -> Result<usize> {
        self.channel::<E>().publish(&event)
    }

    /// Subscribe to motion events
    pub fn on_motion<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&MotionEvent) + Send + Sync + 'static,
    {
        self.motion.subscribe(handler)
    }

    /// Subscribe to door events
    pub fn on_door_open<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&DoorEvent) + Send + Sync + 'static,
    {
        self.door.subscribe(handler)
    }

    /// Subscribe to temperature events
    pub fn on_temperature_change<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&TemperatureEvent) + Send + Sync + 'static,
    {
        self.temperature.subscribe(handler)
    }

    /// Publish a motion event stamped now
    pub fn simulate_motion(&self, sensor_id: SensorId) -> Result<usize> {
        self.publish(MotionEvent::now(sensor_id))
    }

    /// Publish a door-open event stamped now
    pub fn simulate_door_open(&self, sensor_id: SensorId) -> Result<usize> {
        self.publish(DoorEvent::now(sensor_id))
    }

    /// Publish a temperature reading stamped now
    pub fn simulate_temperature_change(&self, sensor_id: SensorId, temperature: f64) -> Result<usize> {
        self.publish(TemperatureEvent::now(sensor_id, temperature))
    }

    /// Unsubscribe a handler from whichever channel it was added to
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        match id.kind() {
            EventKind::Motion => self.motion.unsubscribe(id),
            EventKind::Door => self.door.unsubscribe(id),
            EventKind::Temperature => self.temperature.unsubscribe(id),
        }
    }

    /// Number of handlers on one channel
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        match kind {
            EventKind::Motion => self.motion.len(),
            EventKind::Door => self.door.len(),
            EventKind::Temperature => self.temperature.len(),
        }
    }

    /// Number of handlers across all channels
    pub fn total_subscribers(&self) -> usize {
        EventKind::ALL
            .iter()
            .map(|kind| self.subscriber_count(*kind))
            .sum()
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHub")
            .field("motion", &self.motion.len())
            .field("door", &self.door.len())
            .field("temperature", &self.temperature.len())
            .finish()
    }
}
