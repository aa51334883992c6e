//! # Readiness detection over child log output.
//!
//! This module provides the readiness-related types:
//! - [`ReadyCheck`] - trait for line predicates that latch readiness
//! - [`ReadyFn`] - closure-based check implementation
//! - [`ReadyRef`] - shared reference to a check (`Arc<dyn ReadyCheck>`)
//! - [`BannerCheck`] - default matcher for Spring Boot startup banners

mod banner;
mod check;
mod func;

pub use banner::BannerCheck;
pub use check::{ReadyCheck, ReadyRef};
pub use func::ReadyFn;
