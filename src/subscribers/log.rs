//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format.
//!
//! ## Output format
//! ```text
//! [out] Tomcat started on port 8080
//! [err] WARN spring.profiles.active not set
//! [exited] code=0
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscriber;

/// Simple stdout logging subscriber.
///
/// Enabled via the `logging` feature. Prints human-readable event
/// descriptions to stdout for debugging and demonstration purposes.
///
/// Not intended for production use - implement a custom [`Subscriber`] for
/// structured logging or metrics collection.
#[derive(Default)]
pub struct LogWriter;

#[async_trait]
impl Subscriber for LogWriter {
    async fn handle(&self, e: &Event) {
        match e.kind {
            EventKind::OutputLine => {
                if let Some(line) = &e.line {
                    println!("[out] {line}");
                }
            }
            EventKind::ErrorLine => {
                if let Some(line) = &e.line {
                    println!("[err] {line}");
                }
            }
            EventKind::ProcessExited => {
                println!("[exited] code={}", e.exit_code.unwrap_or(-1));
            }
        }
    }

    fn name(&self) -> &'static str {
        "log-writer"
    }
}
