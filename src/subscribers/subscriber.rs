//! # Core subscriber trait
//!
//! `Subscriber` is the extension point for plugging custom event handlers
//! into the supervisor. Each subscriber is driven by a dedicated worker loop
//! fed by a bounded queue owned by the
//! [`SubscriberSet`](crate::subscribers::SubscriberSet).
//!
//! ## Contract
//! - Implementations may be slow (I/O, batching) - they do **not** block the
//!   publisher nor other subscribers.
//! - Each subscriber **declares** its preferred queue capacity via
//!   [`Subscriber::queue_capacity`]. If a queue overflows, events for that
//!   subscriber are **dropped** (warn).

use async_trait::async_trait;

use crate::events::Event;

/// Contract for event subscribers.
///
/// Called from a subscriber-dedicated worker task. Implementations should
/// avoid blocking the async runtime (prefer async I/O and cooperative waits).
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use jarvisor::{Event, EventKind, Subscriber};
///
/// struct ExitAlert;
///
/// #[async_trait]
/// impl Subscriber for ExitAlert {
///     async fn handle(&self, event: &Event) {
///         if event.kind == EventKind::ProcessExited {
///             // page someone...
///         }
///     }
///
///     fn name(&self) -> &'static str {
///         "exit-alert"
///     }
/// }
/// ```
#[async_trait]
pub trait Subscriber: Send + Sync + 'static {
    /// Handle a single event for this subscriber.
    async fn handle(&self, event: &Event);

    /// Human-readable name (for warnings).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Preferred capacity of this subscriber's queue.
    ///
    /// On overflow, events for this subscriber are **dropped** (warn).
    fn queue_capacity(&self) -> usize {
        1024
    }
}
