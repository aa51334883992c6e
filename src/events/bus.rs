//! Event bus for broadcasting child-process events.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`] through which
//! the reader loops and the exit waiter deliver [`Event`]s to observers.
//!
//! - [`Bus::publish`] sends an event to all current receivers (non-blocking).
//! - [`Bus::subscribe`] creates a new receiver for consuming events.
//!
//! Broadcast semantics give the delivery contract the supervisor depends on:
//! each receiver sees events in publish order, and attaching or dropping one
//! receiver (notably the transient readiness listener inside `start`) never
//! drops or duplicates events for the others.

use tokio::sync::broadcast;

use crate::events::Event;

/// Broadcast channel for supervisor events.
///
/// Wrapper over [`tokio::sync::broadcast`] that provides `publish`/`subscribe`
/// methods for working with [`Event`]s.
#[derive(Clone)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a new bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publishes an event to all receivers.
    ///
    /// Errors are ignored if there are no active receivers.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Subscribes to the bus and returns a new receiver.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}
