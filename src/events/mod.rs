//! Child-process events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to events emitted while a child is supervised.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] — event classification and payload
//! - [`Bus`] — thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: the stdout/stderr reader loops, the exit waiter, and
//!   the supervisor itself (operational failures on the error stream).
//! - **Consumers**: `Supervisor::subscribe()` receivers, the transient
//!   readiness listener inside `start`, and the subscriber fan-out worker.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
