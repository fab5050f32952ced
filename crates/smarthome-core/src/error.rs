//! Error handling for the SmartHome event hub
//!
//! The hub has a single failure surface: a handler that returns an error
//! while an event is being dispatched. Dispatch stops at that handler and
//! the error travels back to whoever called `publish`.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

use crate::event_bus::{EventKind, SubscriptionId};

/// Error a fallible handler may return.
///
/// Boxed so handlers can surface any error type (I/O, formatting, domain).
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result returned by a fallible handler.
pub type HandlerResult = std::result::Result<(), HandlerError>;

/// Event hub error type
#[derive(Error, Debug)]
pub enum HubError {
    /// A subscribed handler failed; handlers after it were not invoked.
    #[error("{kind} handler {subscription} failed: {source}")]
    HandlerFailed {
        /// Channel the failing handler was subscribed to.
        kind: EventKind,
        /// Subscription of the failing handler.
        subscription: SubscriptionId,
        /// Error returned by the handler.
        #[source]
        source: HandlerError,
    },
}

impl HubError {
    /// Channel on which the error occurred
    pub fn kind(&self) -> EventKind {
        match self {
            HubError::HandlerFailed { kind, .. } => *kind,
        }
    }

    /// Subscription whose handler produced the error
    pub fn subscription(&self) -> SubscriptionId {
        match self {
            HubError::HandlerFailed { subscription, .. } => *subscription,
        }
    }
}

/// Result type using HubError
pub type Result<T> = std::result::Result<T, HubError>;
