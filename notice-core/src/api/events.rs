//! Event System
//!
//! Callbacks for notification session events.

use std::sync::Arc;

use crate::network::ConnectionState;
use crate::notification::NotificationId;

use super::mutation::Mutation;

/// Events emitted by a notification session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyEvent {
    /// A pushed notification was added to the store.
    NotificationAdded {
        /// The notification ID.
        id: NotificationId,
    },

    /// A notification became read, locally or by server confirmation.
    NotificationRead {
        /// The notification ID.
        id: NotificationId,
    },

    /// A notification was removed, locally or by server confirmation.
    NotificationRemoved {
        /// The notification ID.
        id: NotificationId,
    },

    /// The store was replaced by a server snapshot.
    SnapshotLoaded {
        /// Records kept from the snapshot.
        count: usize,
    },

    /// Push channel state changed.
    ConnectionStateChanged {
        /// The new connection state.
        state: ConnectionState,
    },

    /// A remote mutation call failed. The local state is left as is.
    MutationFailed {
        /// The mutation that failed.
        mutation: Mutation,
        /// Error description.
        error: String,
    },
}

/// Event handler trait.
///
/// Implement this trait to receive session events.
pub trait EventHandler: Send + Sync {
    /// Called when an event occurs.
    fn on_event(&self, event: NotifyEvent);
}

/// Simple callback-based event handler.
///
/// Wraps a closure for easy event handling.
pub struct CallbackHandler<F>
where
    F: Fn(NotifyEvent) + Send + Sync,
{
    callback: F,
}

impl<F> CallbackHandler<F>
where
    F: Fn(NotifyEvent) + Send + Sync,
{
    /// Creates a new callback handler.
    pub fn new(callback: F) -> Self {
        CallbackHandler { callback }
    }
}

impl<F> EventHandler for CallbackHandler<F>
where
    F: Fn(NotifyEvent) + Send + Sync,
{
    fn on_event(&self, event: NotifyEvent) {
        (self.callback)(event);
    }
}

/// Event dispatcher for managing multiple handlers.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    /// Creates a new event dispatcher.
    pub fn new() -> Self {
        EventDispatcher {
            handlers: Vec::new(),
        }
    }

    /// Adds an event handler.
    pub fn add_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    /// Removes all handlers.
    pub fn clear_handlers(&mut self) {
        self.handlers.clear();
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Dispatches an event to all handlers.
    pub fn dispatch(&self, event: NotifyEvent) {
        for handler in &self.handlers {
            handler.on_event(event.clone());
        }
    }
}
