//! # Event Hub Module
//!
//! Typed publish/subscribe channels for sensor events.
//!
//! ## Overview
//!
//! The hub owns one ordered subscriber list per event kind:
//! - Sensors publish typed events without knowing who listens
//! - Handlers subscribe to exactly one kind and run in subscription order
//! - Dispatch is synchronous on the publishing thread
//!
//! ## Usage
//!
//! ```rust
//! use smarthome_core::event_bus::{EventHub, EventKind};
//!
//! let hub = EventHub::new();
//!
//! let subscription = hub.on_motion(|event| {
//!     println!("Motion detected by sensor {}", event.sensor_id);
//! });
//!
//! hub.simulate_motion(1).expect("no handler fails");
//!
//! assert!(hub.unsubscribe(subscription));
//! assert_eq!(hub.subscriber_count(EventKind::Motion), 0);
//! ```

mod events;
mod hub;

pub use events::*;
pub use hub::*;
