//! # Global supervisor configuration.
//!
//! [`Config`] names every timing constant the lifecycle state machine relies
//! on, so tests can shrink them and deployments can widen them. None of them
//! is a hidden literal inside the supervisor.
//!
//! # Example
//! ```
//! use std::time::Duration;
//! use jarvisor::Config;
//!
//! let mut cfg = Config::default();
//! cfg.restart_delay = Duration::from_millis(500);
//! cfg.kill_grace = Duration::from_secs(10);
//!
//! assert_eq!(cfg.poll_interval, Duration::from_millis(100));
//! ```

use std::time::Duration;

/// Timing contract and channel sizing for one supervisor instance.
///
/// Controls the readiness poll cadence, the grace windows of the stop
/// escalation sequence, the stop→start delay of `restart`, and the capacity
/// of the event bus.
#[derive(Clone, Debug)]
pub struct Config {
    /// Re-check cadence of the bounded readiness wait inside `start`.
    pub poll_interval: Duration,
    /// Grace window after the empty-line stdin nudge, before signalling.
    pub stdin_grace: Duration,
    /// Delay between a completed `stop` and the `start` of a `restart`,
    /// letting the OS release resources such as bound network ports.
    pub restart_delay: Duration,
    /// Grace window after forced termination, for the OS to reap the child.
    pub kill_grace: Duration,
    /// Capacity of the broadcast event bus.
    pub bus_capacity: usize,
}

impl Default for Config {
    /// Provides a default configuration:
    /// - `poll_interval = 100ms`
    /// - `stdin_grace = 1s`
    /// - `restart_delay = 2s`
    /// - `kill_grace = 5s`
    /// - `bus_capacity = 1024`
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
            stdin_grace: Duration::from_secs(1),
            restart_delay: Duration::from_secs(2),
            kill_grace: Duration::from_secs(5),
            bus_capacity: 1024,
        }
    }
}
