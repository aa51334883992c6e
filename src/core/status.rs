//! # Point-in-time process state.
//!
//! [`ProcState`] is the value held in the supervisor's `watch` channel. The
//! spawn path sets `Running`, the exit waiter sets `Exited`; everything else
//! (queries, bounded waits) only reads it.

/// Exit code reported when the OS did not provide one (signal-killed child).
pub(crate) const EXIT_CODE_UNKNOWN: i32 = -1;

/// Lifecycle state of the supervised child.
///
/// Cycles `Idle → Running → Exited` once per start, and back to `Running`
/// on the next start. `Idle` only exists before the first spawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcState {
    /// No child has been spawned yet.
    Idle,
    /// A live child exists.
    Running {
        /// OS process identifier.
        pid: u32,
    },
    /// The most recent child has exited.
    Exited {
        /// Observed exit code, or `-1` when unavailable.
        code: i32,
    },
}

impl ProcState {
    /// True while a live child exists.
    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self, ProcState::Running { .. })
    }

    /// The child's PID, present only while running.
    #[inline]
    pub fn pid(&self) -> Option<u32> {
        match self {
            ProcState::Running { pid } => Some(*pid),
            _ => None,
        }
    }

    /// The exit code of the most recent child, valid only after it exited.
    #[inline]
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ProcState::Exited { code } => Some(*code),
            _ => None,
        }
    }
}
