//! # Spawn one child and stream its output until it exits.
//!
//! This helper owns the moment a child comes to life:
//!
//! ```text
//!   Command ──spawn──► Child
//!                        ├─ stdout ──► reader task ──► Bus (OutputLine…)
//!                        ├─ stderr ──► reader task ──► Bus (ErrorLine…)
//!                        └─ wait() ──► waiter task ──► state = Exited
//!                                        │              Bus (ProcessExited, once)
//!                                        └─ drains both readers first
//! ```
//!
//! The waiter joins both reader tasks before publishing `ProcessExited`, so
//! the exit event lands after the lines the OS had already buffered, on a
//! best-effort basis. It fires exactly once per spawn.
//!
//! The `Child` itself never leaves the waiter task; the supervisor keeps
//! only the pieces it needs (pid, stdin handle, kill trigger).

use std::io;
use std::sync::Arc;

use tokio::{
    io::{AsyncBufReadExt, AsyncRead, BufReader},
    process::{ChildStdin, Command},
    sync::{watch, Notify},
    task::JoinHandle,
};

use crate::core::status::{ProcState, EXIT_CODE_UNKNOWN};
use crate::events::{Bus, Event, EventKind};

/// Handles the supervisor retains for a freshly spawned child.
pub(crate) struct SpawnedChild {
    /// OS process identifier at spawn time.
    pub pid: u32,
    /// The child's standard input, for `send_line` and the stop nudge.
    pub stdin: Option<ChildStdin>,
    /// One-shot trigger for forced termination; the waiter task listens.
    pub kill: Arc<Notify>,
}

/// Spawns the command with concurrent line capture.
///
/// On success the child is already `Running` in `state`, both reader loops
/// are live, and the waiter is armed. On failure nothing was published and
/// `state` is untouched.
pub(crate) fn spawn_streaming(
    mut command: Command,
    bus: Bus,
    state: Arc<watch::Sender<ProcState>>,
) -> io::Result<SpawnedChild> {
    let mut child = command.spawn()?;
    let pid = child.id().unwrap_or_default();
    let stdin = child.stdin.take();
    let out_reader = stream_lines(child.stdout.take(), bus.clone(), EventKind::OutputLine);
    let err_reader = stream_lines(child.stderr.take(), bus.clone(), EventKind::ErrorLine);

    // send_replace: the update must land even while nobody watches.
    state.send_replace(ProcState::Running { pid });

    let kill = Arc::new(Notify::new());
    let kill_trigger = Arc::clone(&kill);
    tokio::spawn(async move {
        let status = tokio::select! {
            status = child.wait() => status,
            _ = kill_trigger.notified() => {
                let _ = child.start_kill();
                child.wait().await
            }
        };
        let _ = out_reader.await;
        let _ = err_reader.await;

        let code = status
            .ok()
            .and_then(|s| s.code())
            .unwrap_or(EXIT_CODE_UNKNOWN);
        state.send_replace(ProcState::Exited { code });
        bus.publish(Event::now(EventKind::ProcessExited).with_exit_code(code));
    });

    Ok(SpawnedChild { pid, stdin, kill })
}

/// Forwards one stream to the bus, line by line, until EOF.
fn stream_lines<R>(reader: Option<R>, bus: Bus, kind: EventKind) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let Some(reader) = reader else { return };
        let mut lines = BufReader::new(reader).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            bus.publish(Event::now(kind).with_line(line));
        }
    })
}
