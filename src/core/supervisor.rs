//! # Supervisor: lifecycle of one hosted JVM process.
//!
//! The [`Supervisor`] owns the event bus, a [`SubscriberSet`], the validated
//! [`LaunchSpec`], and the cancellation token that bounds every internal
//! wait. It spawns at most one child at a time and drives it through
//! `start` / `stop` / `restart` / `dispose`.
//!
//! ## High-level architecture
//! ```text
//! construction:
//!   LaunchSpec ──validate──► Supervisor::new(cfg, launch, ready, subscribers)
//!     - Bus(cfg.bus_capacity)
//!     - listener: Bus.subscribe() ─► SubscriberSet::emit(&Event)   (fire-and-forget)
//!     - CancellationToken (cancelled once, at dispose)
//!
//! start(timeout):
//!   op lock ─► scoped Bus receiver ─► spawn (runner::spawn_streaming)
//!     ├─ stdout/stderr reader tasks ──► Bus (OutputLine / ErrorLine)
//!     ├─ waiter task ──► state = Exited, Bus (ProcessExited, once)
//!     └─ bounded readiness wait:
//!          while !ready && running && now < deadline:
//!            select { bus line ► ReadyCheck, poll tick, cancel token }
//!
//! stop(timeout):   empty line on stdin ─ stdin_grace
//!                    └─ SIGTERM ─ timeout
//!                         └─ forced kill ─ kill_grace
//!
//! restart:         stop ─► restart_delay (cancellable) ─► start
//! dispose:         cancel token ─► forced kill if running ─► release handles
//! ```
//!
//! ## Rules
//! - Lifecycle operations (`start`, `stop`, `restart`, `dispose`) queue on a
//!   per-instance mutex; overlapping callers never race the child handle.
//! - Queries (`is_running`, `process_id`, `exit_code`) read the `watch`
//!   state and never touch that mutex.
//! - Spawn failures, stop-step failures and broken pipes surface as
//!   `ErrorLine` events plus boolean returns; only `AlreadyRunning` and
//!   `Disposed` are raised.

use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::Duration;

use tokio::{
    io::AsyncWriteExt,
    process::ChildStdin,
    sync::{broadcast, watch, Mutex, Notify},
    time::{self, Instant},
};
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::core::{runner, shutdown, status::ProcState};
use crate::error::{ConfigError, SupervisorError};
use crate::events::{Bus, Event, EventKind};
use crate::launch::{command, LaunchSpec};
use crate::ready::ReadyRef;
use crate::subscribers::{Subscriber, SubscriberSet};

/// Handles retained for the live child.
struct ChildHandle {
    stdin: Option<ChildStdin>,
    kill: Arc<Notify>,
}

/// Supervises one external child process: spawn with redirected I/O, stream
/// its output, latch readiness, stop with escalation, dispose without
/// leaving an orphan.
///
/// ## Example
/// ```no_run
/// use std::sync::Arc;
/// use std::time::Duration;
/// use jarvisor::{BannerCheck, Config, LaunchSpec, Supervisor};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let launch = LaunchSpec::new("/opt/app/service.jar").with_jvm_args("-Xmx512m");
///     let sup = Supervisor::new(Config::default(), launch, Arc::new(BannerCheck), vec![])?;
///
///     if sup.start(Duration::from_secs(30)).await? {
///         sup.send_line("status").await;
///         sup.stop(Duration::from_secs(10)).await;
///     }
///     sup.dispose().await;
///     Ok(())
/// }
/// ```
pub struct Supervisor {
    cfg: Config,
    launch: LaunchSpec,
    ready: ReadyRef,
    bus: Bus,
    cancel: CancellationToken,
    /// Serializes lifecycle operations; queries bypass it.
    op: Mutex<()>,
    child: Mutex<Option<ChildHandle>>,
    state: Arc<watch::Sender<ProcState>>,
    disposed: AtomicBool,
}

impl std::fmt::Debug for Supervisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Supervisor")
            .field("launch", &self.launch)
            .field("state", &*self.state.borrow())
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

impl Supervisor {
    /// Creates a supervisor for the given launch parameters.
    ///
    /// Validates the spec (artifact and working directory must exist) and
    /// wires the bus → subscriber fan-out. No process is spawned.
    ///
    /// Must be called within a tokio runtime when `subscribers` is
    /// non-empty (worker tasks are spawned for the fan-out).
    pub fn new(
        cfg: Config,
        launch: LaunchSpec,
        ready: ReadyRef,
        subscribers: Vec<Arc<dyn Subscriber>>,
    ) -> Result<Self, ConfigError> {
        launch.validate()?;

        let bus = Bus::new(cfg.bus_capacity);
        if !subscribers.is_empty() {
            let subs = Arc::new(SubscriberSet::new(subscribers));
            Self::subscriber_listener(&bus, subs);
        }

        let (state, _rx) = watch::channel(ProcState::Idle);
        Ok(Self {
            cfg,
            launch,
            ready,
            bus,
            cancel: CancellationToken::new(),
            op: Mutex::new(()),
            child: Mutex::new(None),
            state: Arc::new(state),
            disposed: AtomicBool::new(false),
        })
    }

    /// Subscribes to the bus and forwards events to the subscriber set
    /// (fire-and-forget).
    fn subscriber_listener(bus: &Bus, set: Arc<SubscriberSet>) {
        let mut rx = bus.subscribe();
        tokio::spawn(async move {
            while let Ok(ev) = rx.recv().await {
                set.emit(&ev);
            }
        });
    }

    /// Starts the child and waits until it reports readiness.
    ///
    /// Returns `Ok(true)` only when the readiness check matched an output
    /// line within `timeout` **and** the child is still running. Returns
    /// `Ok(false)` on timeout, early exit, or spawn failure (the latter is
    /// also reported on the error stream).
    ///
    /// # Errors
    /// [`SupervisorError::AlreadyRunning`] when a live child exists - this
    /// is not a no-op, callers must `stop` first.
    /// [`SupervisorError::Disposed`] after disposal.
    pub async fn start(&self, timeout: Duration) -> Result<bool, SupervisorError> {
        let _op = self.op.lock().await;
        self.start_locked(timeout).await
    }

    /// Stops the child through the escalation sequence.
    ///
    /// Returns `true` iff the child is confirmed exited by the end of the
    /// sequence; `true` immediately when nothing is running. Never raises:
    /// step failures are published on the error stream.
    ///
    /// Escalation, each step only if the previous did not end the child:
    /// 1. empty line on stdin (application-level shutdown hook), wait
    ///    [`Config::stdin_grace`];
    /// 2. polite termination signal, wait `timeout`;
    /// 3. forced kill, wait [`Config::kill_grace`].
    pub async fn stop(&self, timeout: Duration) -> bool {
        let _op = self.op.lock().await;
        self.stop_locked(timeout).await
    }

    /// Restarts the child: `stop`, a fixed [`Config::restart_delay`], then
    /// `start`. The whole sequence holds the operation lock, so no other
    /// lifecycle call can interleave.
    ///
    /// # Errors
    /// [`SupervisorError::Disposed`] when disposal happens before the
    /// restarted child begins starting.
    pub async fn restart(
        &self,
        stop_timeout: Duration,
        start_timeout: Duration,
    ) -> Result<bool, SupervisorError> {
        let _op = self.op.lock().await;
        self.stop_locked(stop_timeout).await;

        tokio::select! {
            _ = time::sleep(self.cfg.restart_delay) => {}
            _ = self.cancel.cancelled() => return Err(SupervisorError::Disposed),
        }

        self.start_locked(start_timeout).await
    }

    /// Writes one line to the child's standard input, fire-and-forget.
    ///
    /// No-op when the child is not running; write failures are published on
    /// the error stream. There is no acknowledgement and no response
    /// correlation - stdin and stdout are independent one-way pipes.
    pub async fn send_line(&self, text: &str) {
        if !self.is_running() {
            return;
        }
        self.write_stdin_line(text).await;
    }

    /// Disposes the supervisor. Idempotent, terminal, never raises.
    ///
    /// Cancels the internal token (promptly unwinding any in-flight bounded
    /// wait), force-kills a live child with a bounded reap wait, and
    /// releases the child handles. After the first call every later call is
    /// a no-op, and `start` fails with [`SupervisorError::Disposed`].
    pub async fn dispose(&self) {
        if self.disposed.swap(true, AtomicOrdering::SeqCst) {
            return;
        }
        self.cancel.cancel();

        let _op = self.op.lock().await;
        if self.is_running() {
            self.trigger_kill().await;
            // The token is already cancelled; this wait must not heed it.
            self.wait_exited(self.cfg.kill_grace, false).await;
        }
        *self.child.lock().await = None;
    }

    /// Waits for an OS termination signal (SIGINT/SIGTERM/SIGQUIT, Ctrl-C),
    /// then disposes. Spawn this alongside the application so disposal
    /// always runs on process-wide shutdown.
    pub async fn dispose_on_shutdown_signal(&self) {
        let _ = shutdown::wait_for_termination_signal().await;
        self.dispose().await;
    }

    /// True while a live child exists.
    pub fn is_running(&self) -> bool {
        self.state.borrow().is_running()
    }

    /// The child's PID, present only while running.
    pub fn process_id(&self) -> Option<u32> {
        self.state.borrow().pid()
    }

    /// Exit code of the most recent child, valid only after it exited.
    pub fn exit_code(&self) -> Option<i32> {
        self.state.borrow().exit_code()
    }

    /// Point-in-time lifecycle state.
    pub fn state(&self) -> ProcState {
        *self.state.borrow()
    }

    /// True once `dispose` ran.
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(AtomicOrdering::SeqCst)
    }

    /// Subscribes to the event bus and returns a new receiver.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// The launch parameters this supervisor was built with.
    pub fn launch(&self) -> &LaunchSpec {
        &self.launch
    }

    /// The launched command's argument string, for display and logging.
    pub fn command_line(&self) -> String {
        command::command_line(&self.launch)
    }

    async fn start_locked(&self, timeout: Duration) -> Result<bool, SupervisorError> {
        if self.is_disposed() {
            return Err(SupervisorError::Disposed);
        }
        if self.is_running() {
            return Err(SupervisorError::AlreadyRunning);
        }

        // Scoped readiness listener: subscribed before the spawn so an
        // early banner cannot slip past, dropped on every exit path.
        let ready_rx = self.bus.subscribe();

        let spawned = match runner::spawn_streaming(
            command::build(&self.launch),
            self.bus.clone(),
            Arc::clone(&self.state),
        ) {
            Ok(spawned) => spawned,
            Err(err) => {
                self.report(format!("failed to start `{}`: {err}", self.command_line()));
                return Ok(false);
            }
        };
        *self.child.lock().await = Some(ChildHandle {
            stdin: spawned.stdin,
            kill: spawned.kill,
        });

        Ok(self.wait_ready(ready_rx, timeout).await)
    }

    /// Bounded readiness wait: re-checks the latch, the running flag and the
    /// deadline on every received line and at least every
    /// [`Config::poll_interval`]; unwinds promptly on disposal.
    async fn wait_ready(&self, mut rx: broadcast::Receiver<Event>, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut ready = false;

        while !ready && self.is_running() && Instant::now() < deadline {
            tokio::select! {
                ev = rx.recv() => match ev {
                    Ok(ev) if ev.kind == EventKind::OutputLine => {
                        if let Some(line) = ev.line.as_deref() {
                            ready = self.ready.is_ready(line);
                        }
                    }
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(_)) => {}
                    Err(broadcast::error::RecvError::Closed) => break,
                },
                _ = time::sleep(self.cfg.poll_interval) => {}
                _ = self.cancel.cancelled() => break,
            }
        }

        ready && self.is_running()
    }

    async fn stop_locked(&self, timeout: Duration) -> bool {
        if !self.is_running() {
            return true;
        }

        // Application-level nudge: some hosted runtimes treat a line on
        // stdin as their shutdown hook long before they honor signals.
        self.write_stdin_line("").await;
        if self.wait_exited(self.cfg.stdin_grace, true).await {
            return true;
        }

        self.signal_terminate();
        if self.wait_exited(timeout, true).await {
            return true;
        }

        self.trigger_kill().await;
        self.wait_exited(self.cfg.kill_grace, true).await
    }

    /// Waits up to `dur` for the child to exit, waking on state changes
    /// rather than at poll boundaries. `heed_cancel` is false only during
    /// disposal, which runs after the token was cancelled.
    async fn wait_exited(&self, dur: Duration, heed_cancel: bool) -> bool {
        let mut rx = self.state.subscribe();
        let deadline = Instant::now() + dur;

        loop {
            if !rx.borrow().is_running() {
                return true;
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return !self.is_running();
            }
            tokio::select! {
                changed = rx.changed() => {
                    if changed.is_err() {
                        return !self.is_running();
                    }
                }
                _ = time::sleep(remaining) => return !self.is_running(),
                _ = self.cancel.cancelled(), if heed_cancel => return !self.is_running(),
            }
        }
    }

    /// Writes one line to the child's stdin; failures go to the error stream.
    async fn write_stdin_line(&self, text: &str) {
        let mut guard = self.child.lock().await;
        let Some(handle) = guard.as_mut() else {
            return;
        };
        let Some(stdin) = handle.stdin.as_mut() else {
            return;
        };
        let write = async {
            stdin.write_all(text.as_bytes()).await?;
            stdin.write_all(b"\n").await?;
            stdin.flush().await
        };
        if let Err(err) = write.await {
            self.report(format!("failed to write to child stdin: {err}"));
        }
    }

    /// Sends the polite termination signal (SIGTERM on unix). On other
    /// platforms this step is skipped and `stop` escalates straight to the
    /// forced kill.
    fn signal_terminate(&self) {
        let Some(pid) = self.process_id() else {
            return;
        };
        #[cfg(unix)]
        {
            let rc = unsafe { libc::kill(pid as libc::pid_t, libc::SIGTERM) };
            if rc != 0 {
                self.report(format!(
                    "failed to signal pid {pid}: {}",
                    std::io::Error::last_os_error()
                ));
            }
        }
        #[cfg(not(unix))]
        {
            let _ = pid;
        }
    }

    /// Triggers forced termination through the waiter task.
    async fn trigger_kill(&self) {
        let guard = self.child.lock().await;
        if let Some(handle) = guard.as_ref() {
            handle.kill.notify_one();
        }
    }

    /// Publishes an operational failure on the error stream.
    fn report(&self, message: String) {
        self.bus
            .publish(Event::now(EventKind::ErrorLine).with_line(message));
    }
}
