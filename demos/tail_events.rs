//! # Demo: tail_events
//!
//! Two ways to consume supervisor events:
//! - push-style: a custom [`Subscriber`] counting lines per stream;
//! - pull-style: a broadcast receiver obtained from [`Supervisor::subscribe`].
//!
//! ## Flow
//! ```text
//! LaunchSpec ──► Supervisor::new ──► start(30s)
//!     ├─► Bus ──► SubscriberSet ──► LineCounter.handle()
//!     └─► Bus ──► broadcast receiver (this main) prints every event
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example tail_events -- /path/to/app.jar
//! ```

use std::{
    sync::atomic::{AtomicU64, Ordering},
    sync::Arc,
    time::Duration,
};

use jarvisor::{BannerCheck, Config, Event, EventKind, LaunchSpec, Subscriber, Supervisor};

/// Counts lines per stream; a stand-in for metrics or log shipping.
#[derive(Default)]
struct LineCounter {
    out: AtomicU64,
    err: AtomicU64,
}

#[async_trait::async_trait]
impl Subscriber for LineCounter {
    async fn handle(&self, ev: &Event) {
        match ev.kind {
            EventKind::OutputLine => {
                self.out.fetch_add(1, Ordering::Relaxed);
            }
            EventKind::ErrorLine => {
                self.err.fetch_add(1, Ordering::Relaxed);
            }
            EventKind::ProcessExited => {
                println!(
                    "[counter] exited code={:?} after out={} err={}",
                    ev.exit_code,
                    self.out.load(Ordering::Relaxed),
                    self.err.load(Ordering::Relaxed)
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "line-counter"
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let jar = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: tail_events <path/to/app.jar>"))?;

    let launch = LaunchSpec::new(jar);
    let subs: Vec<Arc<dyn Subscriber>> = vec![Arc::new(LineCounter::default())];
    let sup = Supervisor::new(Config::default(), launch, Arc::new(BannerCheck), subs)?;

    // Pull-style consumer: subscribe before start so no line is missed.
    let mut rx = sup.subscribe();
    let tail = tokio::spawn(async move {
        while let Ok(ev) = rx.recv().await {
            match ev.kind {
                EventKind::OutputLine => println!("#{:>4} out | {}", ev.seq, ev.line.as_deref().unwrap_or("")),
                EventKind::ErrorLine => println!("#{:>4} err | {}", ev.seq, ev.line.as_deref().unwrap_or("")),
                EventKind::ProcessExited => {
                    println!("#{:>4} exit| code={:?}", ev.seq, ev.exit_code);
                    break;
                }
            }
        }
    });

    let ready = sup.start(Duration::from_secs(30)).await?;
    println!("ready={ready}");
    tokio::time::sleep(Duration::from_secs(5)).await;

    sup.stop(Duration::from_secs(10)).await;
    sup.dispose().await;
    let _ = tail.await;
    Ok(())
}
