//! Integration tests driving real child processes.
//!
//! Each test writes a small shell script into a temp directory and launches
//! it through the supervisor (the script stands in for the java binary and
//! ignores the `-jar` arguments). Unix-only: the scripts and the signal
//! escalation need a POSIX shell.
#![cfg(unix)]

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use tempfile::TempDir;

use jarvisor::{
    Config, Event, EventKind, LaunchSpec, ProcState, ReadyFn, ReadyRef, Subscriber, Supervisor,
    SupervisorError,
};

/// Writes an executable script plus a placeholder jar, and returns a spec
/// that launches the script.
fn script_launch(dir: &TempDir, body: &str) -> LaunchSpec {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.path().join("fake-java.sh");
    std::fs::write(&script, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

    let jar = dir.path().join("app.jar");
    std::fs::write(&jar, b"").unwrap();

    LaunchSpec::new(jar).with_java(script)
}

/// Shrinks the grace windows so escalation paths finish in test time.
fn quick_cfg() -> Config {
    Config {
        poll_interval: Duration::from_millis(20),
        stdin_grace: Duration::from_millis(500),
        restart_delay: Duration::from_millis(400),
        kill_grace: Duration::from_secs(3),
        bus_capacity: 1024,
    }
}

fn ready_on(marker: &'static str) -> ReadyRef {
    ReadyFn::arc(marker, move |line: &str| line.contains(marker))
}

fn supervisor(dir: &TempDir, body: &str, marker: &'static str) -> Supervisor {
    Supervisor::new(quick_cfg(), script_launch(dir, body), ready_on(marker), vec![]).unwrap()
}

/// Records every event it sees, for ordering assertions.
struct Recorder {
    tag: &'static str,
    seen: Arc<Mutex<Vec<(u64, String)>>>,
}

#[async_trait::async_trait]
impl Subscriber for Recorder {
    async fn handle(&self, ev: &Event) {
        if ev.kind == EventKind::OutputLine {
            let line = ev.line.as_deref().unwrap_or("").to_string();
            self.seen.lock().unwrap().push((ev.seq, line));
        }
    }

    fn name(&self) -> &'static str {
        self.tag
    }
}

#[tokio::test]
async fn test_construction_spawns_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let sup = supervisor(&dir, "echo never-run > marker.txt", "up");

    assert_eq!(sup.state(), ProcState::Idle);
    assert!(!sup.is_running());
    assert_eq!(sup.process_id(), None);
    assert_eq!(sup.exit_code(), None);

    // The script never executed.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!dir.path().join("marker.txt").exists());
}

#[tokio::test]
async fn test_missing_jar_is_rejected_at_construction() {
    let launch = LaunchSpec::new("/definitely/not/here/app.jar");
    let err = Supervisor::new(quick_cfg(), launch, ready_on("up"), vec![]).unwrap_err();
    assert_eq!(err.as_label(), "config_artifact_not_found");
}

#[tokio::test]
async fn test_start_latches_on_banner() {
    let dir = tempfile::tempdir().unwrap();
    let sup = supervisor(&dir, "echo booting\necho service up\nread _\nexit 0", "up");

    let ready = sup.start(Duration::from_secs(5)).await.unwrap();
    assert!(ready);
    assert!(sup.is_running());
    assert!(sup.process_id().is_some());

    assert!(sup.stop(Duration::from_secs(2)).await);
    sup.dispose().await;
}

#[tokio::test]
async fn test_start_while_running_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let sup = supervisor(&dir, "echo up\nread _\nexit 0", "up");

    assert!(sup.start(Duration::from_secs(5)).await.unwrap());
    let err = sup.start(Duration::from_secs(1)).await.unwrap_err();
    assert!(matches!(err, SupervisorError::AlreadyRunning));
    assert!(sup.is_running());

    sup.dispose().await;
}

#[tokio::test]
async fn test_early_exit_fails_start_before_deadline() {
    let dir = tempfile::tempdir().unwrap();
    let sup = supervisor(&dir, "echo crashing\nexit 3", "up");

    let begun = Instant::now();
    let ready = sup.start(Duration::from_secs(10)).await.unwrap();

    assert!(!ready);
    // Must return on the exit, not ride out the 10s deadline.
    assert!(begun.elapsed() < Duration::from_secs(5));

    // The waiter publishes Exited shortly after wait() returns.
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(sup.exit_code(), Some(3));
    sup.dispose().await;
}

#[tokio::test]
async fn test_start_times_out_without_banner() {
    let dir = tempfile::tempdir().unwrap();
    let sup = supervisor(&dir, "echo still warming up\nread _\nexit 0", "up-banner");

    let ready = sup.start(Duration::from_millis(400)).await.unwrap();
    assert!(!ready);
    // Timed out but the child is alive; that is the caller's call to make.
    assert!(sup.is_running());

    sup.dispose().await;
}

#[tokio::test]
async fn test_stop_when_idle_is_true() {
    let dir = tempfile::tempdir().unwrap();
    let sup = supervisor(&dir, "echo up", "up");

    assert!(sup.stop(Duration::from_secs(1)).await);
    sup.dispose().await;
}

#[tokio::test]
async fn test_stop_via_stdin_nudge() {
    let dir = tempfile::tempdir().unwrap();
    // Exits cleanly as soon as anything arrives on stdin.
    let sup = supervisor(&dir, "echo up\nread _\nexit 0", "up");

    assert!(sup.start(Duration::from_secs(5)).await.unwrap());

    let begun = Instant::now();
    assert!(sup.stop(Duration::from_secs(10)).await);
    // First escalation step must have sufficed.
    assert!(begun.elapsed() < Duration::from_secs(2));
    assert_eq!(sup.exit_code(), Some(0));

    sup.dispose().await;
}

#[tokio::test]
async fn test_stop_escalates_to_kill_for_stubborn_child() {
    let dir = tempfile::tempdir().unwrap();
    // Ignores stdin and SIGTERM; only SIGKILL ends it.
    let body = "trap '' TERM\necho up\nwhile true; do sleep 1; done";
    let sup = supervisor(&dir, body, "up");

    assert!(sup.start(Duration::from_secs(5)).await.unwrap());

    assert!(sup.stop(Duration::from_millis(500)).await);
    assert!(!sup.is_running());
    // Signal-killed children report no exit code; the sentinel is -1.
    assert_eq!(sup.exit_code(), Some(-1));

    sup.dispose().await;
}

#[tokio::test]
async fn test_restart_waits_out_the_delay() {
    let dir = tempfile::tempdir().unwrap();
    let sup = supervisor(&dir, "echo up\nread _\nexit 0", "up");

    assert!(sup.start(Duration::from_secs(5)).await.unwrap());
    let first_pid = sup.process_id().unwrap();

    let mut rx = sup.subscribe();
    let begun = Instant::now();
    let ready = sup
        .restart(Duration::from_secs(2), Duration::from_secs(5))
        .await
        .unwrap();

    assert!(ready);
    assert!(begun.elapsed() >= Duration::from_millis(400));
    assert!(sup.is_running());
    assert_ne!(sup.process_id(), Some(first_pid));

    // The old child's exit event precedes every line of the new child.
    let mut exit_seq = None;
    let mut first_new_line_seq = None;
    while first_new_line_seq.is_none() {
        let ev = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap();
        match ev.kind {
            EventKind::ProcessExited => exit_seq = Some(ev.seq),
            EventKind::OutputLine => first_new_line_seq = Some(ev.seq),
            EventKind::ErrorLine => {}
        }
    }
    assert!(exit_seq.unwrap() < first_new_line_seq.unwrap());

    sup.dispose().await;
}

#[tokio::test]
async fn test_restart_from_exited_acts_like_start() {
    let dir = tempfile::tempdir().unwrap();
    let sup = supervisor(&dir, "echo up\nread _\nexit 0", "up");

    // Never started: stop phase is a no-op, start phase runs.
    let ready = sup
        .restart(Duration::from_secs(1), Duration::from_secs(5))
        .await
        .unwrap();
    assert!(ready);
    assert!(sup.is_running());

    sup.dispose().await;
}

#[tokio::test]
async fn test_send_line_reaches_child_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let body = "echo up\nread msg\necho \"got $msg\"\nread _\nexit 0";
    let sup = supervisor(&dir, body, "up");

    let mut rx = sup.subscribe();
    assert!(sup.start(Duration::from_secs(5)).await.unwrap());

    sup.send_line("ping").await;

    let echoed = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let ev = rx.recv().await.unwrap();
            if ev.kind == EventKind::OutputLine && ev.line.as_deref() == Some("got ping") {
                return true;
            }
        }
    })
    .await
    .unwrap();
    assert!(echoed);

    sup.dispose().await;
}

#[tokio::test]
async fn test_send_line_when_idle_is_a_noop() {
    let dir = tempfile::tempdir().unwrap();
    let sup = supervisor(&dir, "echo up", "up");

    // Must not panic or error; there is simply nobody to talk to.
    sup.send_line("hello?").await;
    sup.dispose().await;
}

#[tokio::test]
async fn test_spawn_failure_returns_false_and_reports() {
    let dir = tempfile::tempdir().unwrap();
    let jar = dir.path().join("app.jar");
    std::fs::write(&jar, b"").unwrap();

    let launch = LaunchSpec::new(jar).with_java(dir.path().join("no-such-binary"));
    let sup = Supervisor::new(quick_cfg(), launch, ready_on("up"), vec![]).unwrap();

    let mut rx = sup.subscribe();
    let ready = sup.start(Duration::from_secs(5)).await.unwrap();
    assert!(!ready);
    assert!(!sup.is_running());

    let ev = tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ev.kind, EventKind::ErrorLine);
    assert!(ev.line.as_deref().unwrap_or("").contains("failed to start"));

    sup.dispose().await;
}

#[tokio::test]
async fn test_exit_event_fires_once_with_code() {
    let dir = tempfile::tempdir().unwrap();
    let sup = supervisor(&dir, "echo up\nexit 7", "up");

    let mut rx = sup.subscribe();
    let _ = sup.start(Duration::from_secs(5)).await.unwrap();

    let mut exits = Vec::new();
    while let Ok(Ok(ev)) = tokio::time::timeout(Duration::from_secs(2), rx.recv()).await {
        if ev.kind == EventKind::ProcessExited {
            exits.push(ev.exit_code);
        }
    }
    assert_eq!(exits, vec![Some(7)]);

    sup.dispose().await;
}

#[tokio::test]
async fn test_subscribers_observe_lines_in_stream_order() {
    let dir = tempfile::tempdir().unwrap();
    let body = "echo one\necho two\necho three\necho up\nread _\nexit 0";

    let first = Arc::new(Mutex::new(Vec::new()));
    let second = Arc::new(Mutex::new(Vec::new()));
    let subs: Vec<Arc<dyn Subscriber>> = vec![
        Arc::new(Recorder { tag: "first", seen: Arc::clone(&first) }),
        Arc::new(Recorder { tag: "second", seen: Arc::clone(&second) }),
    ];

    let sup = Supervisor::new(quick_cfg(), script_launch(&dir, body), ready_on("up"), subs)
        .unwrap();
    assert!(sup.start(Duration::from_secs(5)).await.unwrap());
    assert!(sup.stop(Duration::from_secs(2)).await);

    // Give the fan-out workers a beat to drain their queues.
    tokio::time::sleep(Duration::from_millis(300)).await;

    let first = first.lock().unwrap().clone();
    let second = second.lock().unwrap().clone();
    let lines: Vec<&str> = first.iter().map(|(_, l)| l.as_str()).collect();
    assert_eq!(lines, vec!["one", "two", "three", "up"]);
    // Same events, same order, same sequence numbers on both sides.
    assert_eq!(first, second);

    sup.dispose().await;
}

#[tokio::test]
async fn test_dispose_kills_and_is_terminal() {
    let dir = tempfile::tempdir().unwrap();
    let body = "trap '' TERM\necho up\nwhile true; do sleep 1; done";
    let sup = supervisor(&dir, body, "up");

    assert!(sup.start(Duration::from_secs(5)).await.unwrap());
    assert!(sup.is_running());

    sup.dispose().await;
    assert!(sup.is_disposed());
    assert!(!sup.is_running());

    // Idempotent, and start is permanently refused.
    sup.dispose().await;
    let err = sup.start(Duration::from_secs(1)).await.unwrap_err();
    assert!(matches!(err, SupervisorError::Disposed));
}

#[tokio::test]
async fn test_dispose_unblocks_inflight_start() {
    let dir = tempfile::tempdir().unwrap();
    // Never prints the banner, never exits on its own.
    let sup = Arc::new(supervisor(&dir, "sleep 30", "up"));

    let starter = {
        let sup = Arc::clone(&sup);
        tokio::spawn(async move { sup.start(Duration::from_secs(30)).await })
    };

    tokio::time::sleep(Duration::from_millis(300)).await;
    let begun = Instant::now();
    sup.dispose().await;

    let ready = tokio::time::timeout(Duration::from_secs(5), starter)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert!(!ready);
    // The 30s readiness deadline must not have been ridden out.
    assert!(begun.elapsed() < Duration::from_secs(5));
    assert!(!sup.is_running());
}

#[tokio::test]
async fn test_stderr_lines_arrive_as_error_events() {
    let dir = tempfile::tempdir().unwrap();
    let body = "echo up\necho oops >&2\nread _\nexit 0";
    let sup = supervisor(&dir, body, "up");

    let mut rx = sup.subscribe();
    assert!(sup.start(Duration::from_secs(5)).await.unwrap());

    let seen = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let ev = rx.recv().await.unwrap();
            if ev.kind == EventKind::ErrorLine && ev.line.as_deref() == Some("oops") {
                return true;
            }
        }
    })
    .await
    .unwrap();
    assert!(seen);

    sup.dispose().await;
}

#[tokio::test]
async fn test_working_dir_defaults_to_jar_directory() {
    let dir = tempfile::tempdir().unwrap();
    let body = "echo up\npwd\nread _\nexit 0";
    let sup = supervisor(&dir, body, "up");

    let mut rx = sup.subscribe();
    assert!(sup.start(Duration::from_secs(5)).await.unwrap());

    let expected: PathBuf = dir.path().canonicalize().unwrap();
    let seen = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let ev = rx.recv().await.unwrap();
            if ev.kind != EventKind::OutputLine {
                continue;
            }
            if let Some(line) = ev.line.as_deref() {
                if PathBuf::from(line).canonicalize().ok() == Some(expected.clone()) {
                    return true;
                }
            }
        }
    })
    .await
    .unwrap();
    assert!(seen);

    sup.dispose().await;
}
