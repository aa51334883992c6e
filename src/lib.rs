//! # jarvisor
//!
//! **Jarvisor** is a supervision library for long-running external
//! processes, tuned for JVM services launched from an executable jar.
//!
//! It spawns the child with fully redirected standard streams, forwards
//! stdout/stderr line by line as events, latches readiness by
//! pattern-matching startup banners, and drives an idempotent
//! start / stop / restart / dispose lifecycle with bounded waits at every
//! step.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//!   │ LaunchSpec  │     │   Config    │     │ ReadyCheck  │
//!   │ (java, jar, │     │ (grace and  │     │ (banner or  │
//!   │  args, cwd) │     │  poll times)│     │  closure)   │
//!   └──────┬──────┘     └──────┬──────┘     └──────┬──────┘
//!          ▼                   ▼                   ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Supervisor (one child at a time)                               │
//! │  - Bus (broadcast events)                                       │
//! │  - watch state (Idle / Running{pid} / Exited{code})             │
//! │  - operation mutex (start/stop/restart/dispose queue)           │
//! │  - SubscriberSet (fans out to user subscribers)                 │
//! └──────┬──────────────────────────────────────────────────────────┘
//!        ▼ spawn
//!   ┌──────────────┐
//!   │    Child     │── stdout ──► reader task ──► Bus (OutputLine)
//!   │ (java -jar…) │── stderr ──► reader task ──► Bus (ErrorLine)
//!   │              │◄─ stdin  ─── send_line / stop nudge
//!   └──────┬───────┘
//!          └─ wait() ──► waiter task ──► state = Exited{code}
//!                                        Bus (ProcessExited, once)
//!                                                 │
//!                                      subscriber_listener
//!                                                 │
//!                                                 ▼
//!                                         SubscriberSet::emit
//!                                       ┌─────────┼─────────┐
//!                                       ▼         ▼         ▼
//!                                   worker1   worker2   workerN
//!                                       ▼         ▼         ▼
//!                                  s1.handle  s2.handle  sN.handle
//! ```
//!
//! ### Lifecycle
//! ```text
//! start(timeout):
//!   ├─► Disposed? ─► Err(Disposed)      AlreadyRunning? ─► Err(AlreadyRunning)
//!   ├─► subscribe readiness listener, spawn child (spawn failure ─► Ok(false))
//!   └─► while !ready && running && now < deadline:
//!         select { output line ► ReadyCheck, poll tick, dispose token }
//!       ─► Ok(ready && running)
//!
//! stop(timeout):                          each step only if still running
//!   ├─► empty line on stdin   ── wait stdin_grace
//!   ├─► SIGTERM               ── wait timeout
//!   └─► forced kill           ── wait kill_grace       ─► bool (never raises)
//!
//! restart:  stop ─► sleep(restart_delay) ─► start      (one lock, no interleave)
//! dispose:  cancel token ─► forced kill if running ─► release handles (terminal)
//! ```
//!
//! ## Features
//! | Area              | Description                                                        | Key types / traits                    |
//! |-------------------|--------------------------------------------------------------------|---------------------------------------|
//! | **Supervision**   | Spawn, stream, stop with escalation, restart, dispose.             | [`Supervisor`], [`ProcState`]         |
//! | **Launch**        | Describe what to run: java binary, jar, args, working directory.   | [`LaunchSpec`]                        |
//! | **Readiness**     | Decide "started" from output lines (banners or custom closures).   | [`ReadyCheck`], [`BannerCheck`], [`ReadyFn`] |
//! | **Events**        | Ordered stdout/stderr/exit notifications over a broadcast bus.     | [`Event`], [`EventKind`]              |
//! | **Subscriber API**| Push-style consumers with bounded queues and panic isolation.      | [`Subscriber`], [`SubscriberSet`]     |
//! | **Errors**        | Typed construction and lifecycle errors.                           | [`ConfigError`], [`SupervisorError`]  |
//! | **Configuration** | Centralize grace windows and poll cadence.                         | [`Config`]                            |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use jarvisor::{BannerCheck, Config, LaunchSpec, Supervisor};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let launch = LaunchSpec::new("/opt/app/service.jar")
//!         .with_jvm_args("-Xmx512m -Dspring.profiles.active=prod")
//!         .with_app_args("--server.port=8080");
//!
//!     // Build subscribers (optional)
//!     #[cfg(feature = "logging")]
//!     let subs: Vec<Arc<dyn jarvisor::Subscriber>> = {
//!         use jarvisor::LogWriter;
//!         vec![Arc::new(LogWriter::default())]
//!     };
//!     #[cfg(not(feature = "logging"))]
//!     let subs: Vec<Arc<dyn jarvisor::Subscriber>> = Vec::new();
//!
//!     let sup = Supervisor::new(Config::default(), launch, Arc::new(BannerCheck), subs)?;
//!
//!     if sup.start(Duration::from_secs(60)).await? {
//!         println!("service is up (pid {:?})", sup.process_id());
//!         sup.stop(Duration::from_secs(10)).await;
//!     }
//!     sup.dispose().await;
//!     Ok(())
//! }
//! ```
mod config;
mod core;
mod error;
mod events;
mod launch;
mod ready;
mod subscribers;

// ---- Public re-exports ----

pub use config::Config;
pub use crate::core::{ProcState, Supervisor};
pub use error::{ConfigError, SupervisorError};
pub use events::{Bus, Event, EventKind};
pub use launch::LaunchSpec;
pub use ready::{BannerCheck, ReadyCheck, ReadyFn, ReadyRef};
pub use subscribers::{Subscriber, SubscriberSet};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
