//! # Demo: supervise
//!
//! Full lifecycle against a real executable jar: start with a readiness
//! timeout, send a line to the child, restart, stop, dispose.
//!
//! Shows how to:
//! - Build a [`LaunchSpec`] with JVM and application arguments.
//! - Attach the built-in [`LogWriter`] subscriber.
//! - Drive `start` / `send_line` / `restart` / `stop` / `dispose`.
//!
//! ## Flow
//! ```text
//! LaunchSpec ──► Supervisor::new ──► start(60s)
//!     ├─► child stdout/stderr ──► Bus ──► LogWriter ([out] / [err] lines)
//!     ├─► BannerCheck latches on the startup banner
//!     ├─► send_line("status")
//!     ├─► restart(10s, 60s)
//!     └─► stop(10s) ──► dispose()
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example supervise --features logging -- /path/to/app.jar
//! ```

use std::{sync::Arc, time::Duration};

use jarvisor::{BannerCheck, Config, LaunchSpec, LogWriter, Subscriber, Supervisor};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let jar = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: supervise <path/to/app.jar>"))?;

    let launch = LaunchSpec::new(jar).with_jvm_args("-Xmx256m");
    let subs: Vec<Arc<dyn Subscriber>> = vec![Arc::new(LogWriter::default())];
    let sup = Supervisor::new(Config::default(), launch, Arc::new(BannerCheck), subs)?;

    println!("launching: {}", sup.command_line());
    if !sup.start(Duration::from_secs(60)).await? {
        println!("child did not become ready (exit code: {:?})", sup.exit_code());
        sup.dispose().await;
        return Ok(());
    }
    println!("ready, pid={:?}", sup.process_id());

    sup.send_line("status").await;
    tokio::time::sleep(Duration::from_secs(2)).await;

    println!("restarting...");
    let ready = sup
        .restart(Duration::from_secs(10), Duration::from_secs(60))
        .await?;
    println!("restarted, ready={ready}, pid={:?}", sup.process_id());

    println!("stopping...");
    let stopped = sup.stop(Duration::from_secs(10)).await;
    println!("stopped={stopped}, exit code={:?}", sup.exit_code());

    sup.dispose().await;
    Ok(())
}
