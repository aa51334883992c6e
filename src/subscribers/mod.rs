//! # Event subscribers for the supervisor.
//!
//! This module provides the [`Subscriber`] trait and the fan-out machinery
//! for handling events broadcast through the [`Bus`](crate::events::Bus).
//!
//! ## Architecture
//! ```text
//! reader loops / exit waiter ── publish(Event) ──► Bus
//!                                                   │
//!                                        supervisor listener
//!                                                   │
//!                                                   ▼
//!                                           SubscriberSet::emit
//!                                     ┌─────────────┼─────────────┐
//!                                     ▼             ▼             ▼
//!                                [queue S1]    [queue S2]    [queue SN]
//!                                     ▼             ▼             ▼
//!                                 worker S1     worker S2     worker SN
//!                                     ▼             ▼             ▼
//!                               S1.handle()   S2.handle()   SN.handle()
//! ```
//!
//! Push-style consumers implement [`Subscriber`]; pull-style consumers call
//! [`Supervisor::subscribe`](crate::Supervisor::subscribe) instead and drive
//! a broadcast receiver themselves.

#[cfg(feature = "logging")]
mod log;
mod set;
mod subscriber;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscriber::Subscriber;
