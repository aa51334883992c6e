//! # Readiness predicate over child output lines.
//!
//! Pattern-matching readiness from log output is the only generic signal
//! available for a managed subprocess without a dedicated health endpoint.
//! The [`ReadyCheck`] trait keeps that predicate pluggable: the supervisor is
//! configured with one at construction and applies it to every stdout line
//! received during the bounded wait inside `start`.

use std::sync::Arc;

/// Shared handle to a readiness check (`Arc<dyn ReadyCheck>`).
pub type ReadyRef = Arc<dyn ReadyCheck>;

/// # Line predicate that latches readiness.
///
/// Implementations inspect one output line at a time and return `true` once
/// the line indicates the hosted service is up. The predicate is stateless
/// from the supervisor's point of view: it is consulted per line, and the
/// latch lives in the `start` call, not in the check.
///
/// # Example
/// ```
/// use jarvisor::ReadyCheck;
///
/// struct PortOpen;
///
/// impl ReadyCheck for PortOpen {
///     fn name(&self) -> &str { "port-open" }
///
///     fn is_ready(&self, line: &str) -> bool {
///         line.contains("listening on")
///     }
/// }
/// ```
pub trait ReadyCheck: Send + Sync + 'static {
    /// Returns a stable, human-readable check name.
    fn name(&self) -> &str;

    /// Returns `true` when the given output line indicates readiness.
    fn is_ready(&self, line: &str) -> bool;
}
