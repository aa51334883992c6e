//! # Default readiness check for Spring Boot startup banners.
//!
//! Spring Boot applications announce readiness on stdout in a handful of
//! stable phrasings, depending on the embedded server and log format.
//! [`BannerCheck`] matches all of them.
//!
//! The match is substring-based on purpose: it trades precision (false
//! negatives on exotic log formats) for portability across Spring Boot
//! versions and logging configurations.

use crate::ready::check::ReadyCheck;

/// Matches the standard Spring Boot startup banners.
///
/// A line indicates readiness when any of these holds:
/// - it contains both `"Started"` and `"Application"`,
/// - it contains `"Tomcat started on port"`,
/// - it contains `"Netty started on port"`,
/// - it contains `"JVM running for"`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BannerCheck;

impl ReadyCheck for BannerCheck {
    fn name(&self) -> &str {
        "spring-banner"
    }

    fn is_ready(&self, line: &str) -> bool {
        (line.contains("Started") && line.contains("Application"))
            || line.contains("Tomcat started on port")
            || line.contains("Netty started on port")
            || line.contains("JVM running for")
    }
}
