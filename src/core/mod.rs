//! # Core: supervisor lifecycle and child-process plumbing.
//!
//! - [`Supervisor`]: public entry point, owns one child at a time.
//! - [`ProcState`]: point-in-time lifecycle state exposed by queries.
//! - `runner`: spawn + concurrent line capture + exit waiter (internal).
//! - `shutdown`: OS termination-signal helper (internal).

mod runner;
mod shutdown;
mod status;
mod supervisor;

pub use status::ProcState;
pub use supervisor::Supervisor;
