//! # Function-backed readiness check (`ReadyFn`)
//!
//! [`ReadyFn`] wraps a closure `F: Fn(&str) -> bool`, which is enough for
//! most ad-hoc banners without defining a new type.
//!
//! ## Example
//! ```
//! use jarvisor::{ReadyFn, ReadyRef, ReadyCheck};
//!
//! let check: ReadyRef = ReadyFn::arc("listening", |line: &str| line.contains("listening on"));
//!
//! assert_eq!(check.name(), "listening");
//! assert!(check.is_ready("server listening on 0.0.0.0:8080"));
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use crate::ready::check::ReadyCheck;

/// Function-backed readiness check implementation.
#[derive(Debug)]
pub struct ReadyFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> ReadyFn<F> {
    /// Creates a new function-backed check.
    ///
    /// Prefer [`ReadyFn::arc`] when you immediately need a
    /// [`ReadyRef`](crate::ReadyRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the check and returns it as a shared handle (`Arc<dyn ReadyCheck>`).
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

impl<F> ReadyCheck for ReadyFn<F>
where
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn is_ready(&self, line: &str) -> bool {
        (self.f)(line)
    }
}
