//! # Events emitted while a child process is supervised.
//!
//! [`EventKind`] classifies the three channels the supervisor exposes:
//! stdout lines, stderr lines (plus internal operational failures), and the
//! single exit notification per start cycle.
//!
//! The [`Event`] struct carries the payload plus ordering metadata.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Within one stream (stdout or stderr), lines are published
//! in the order the child wrote them; `seq` lets consumers recover relative
//! order across streams where they need one.
//!
//! ## Example
//! ```
//! use jarvisor::{Event, EventKind};
//!
//! let ev = Event::now(EventKind::OutputLine).with_line("Tomcat started on port 8080");
//!
//! assert_eq!(ev.kind, EventKind::OutputLine);
//! assert_eq!(ev.line.as_deref(), Some("Tomcat started on port 8080"));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of supervisor events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// One line the child wrote on standard output.
    ///
    /// Sets:
    /// - `line`: the line, without its trailing newline
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    OutputLine,

    /// One line the child wrote on standard error, or an internal
    /// operational failure (spawn error, broken stdin pipe, failed signal).
    ///
    /// Sets:
    /// - `line`: the line or failure description
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ErrorLine,

    /// The child exited. Fired at most once per start cycle, after the
    /// already-buffered output/error lines were drained on a best-effort
    /// basis.
    ///
    /// Sets:
    /// - `exit_code`: observed exit code, or `-1` when the OS reported none
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ProcessExited,
}

/// Supervisor event with optional payload.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - payload fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Line payload for `OutputLine` / `ErrorLine`.
    pub line: Option<Arc<str>>,
    /// Exit code payload for `ProcessExited`.
    pub exit_code: Option<i32>,
}

impl Event {
    /// Creates a new event of the given kind with the current timestamp and
    /// the next sequence number.
    pub fn now(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            line: None,
            exit_code: None,
        }
    }

    /// Attaches a line payload.
    #[inline]
    pub fn with_line(mut self, line: impl Into<Arc<str>>) -> Self {
        self.line = Some(line.into());
        self
    }

    /// Attaches an exit code payload.
    #[inline]
    pub fn with_exit_code(mut self, code: i32) -> Self {
        self.exit_code = Some(code);
        self
    }

    #[inline]
    pub fn is_output(&self) -> bool {
        matches!(self.kind, EventKind::OutputLine)
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self.kind, EventKind::ErrorLine)
    }

    #[inline]
    pub fn is_exit(&self) -> bool {
        matches!(self.kind, EventKind::ProcessExited)
    }
}
