//! Error types used by the jarvisor supervisor.
//!
//! This module defines two error enums:
//!
//! - [`ConfigError`] — invalid construction inputs; fatal, no supervisor instance is produced.
//! - [`SupervisorError`] — lifecycle faults raised by `start`/`restart`.
//!
//! Everything else is deliberately **not** an error type: spawn failures,
//! readiness timeouts and unexpected child exits are reported through the
//! event bus and boolean returns (see [`Supervisor`](crate::Supervisor)).
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics.

use std::path::PathBuf;
use thiserror::Error;

/// # Errors raised at supervisor construction.
///
/// These represent invalid launch parameters and fail fast: a supervisor is
/// never created from a configuration that cannot possibly start.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The artifact (executable jar) does not exist on disk.
    #[error("artifact not found: {path}")]
    ArtifactNotFound {
        /// The missing artifact path.
        path: PathBuf,
    },

    /// An explicitly supplied working directory does not exist.
    #[error("working directory not found: {path}")]
    WorkingDirNotFound {
        /// The missing directory path.
        path: PathBuf,
    },
}

impl ConfigError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use jarvisor::ConfigError;
    ///
    /// let err = ConfigError::ArtifactNotFound { path: "/tmp/app.jar".into() };
    /// assert_eq!(err.as_label(), "config_artifact_not_found");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ConfigError::ArtifactNotFound { .. } => "config_artifact_not_found",
            ConfigError::WorkingDirNotFound { .. } => "config_working_dir_not_found",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ConfigError::ArtifactNotFound { path } => {
                format!("artifact not found: {}", path.display())
            }
            ConfigError::WorkingDirNotFound { path } => {
                format!("working directory not found: {}", path.display())
            }
        }
    }
}

/// # Lifecycle faults raised by `start` and `restart`.
///
/// These are the only operational failures the supervisor raises to the
/// caller. All others (spawn errors, stop timeouts, broken pipes) surface as
/// error events plus boolean returns.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SupervisorError {
    /// A live child already exists; callers must `stop` before `start`.
    #[error("child process is already running")]
    AlreadyRunning,

    /// The supervisor was disposed; no further lifecycle transitions exist.
    #[error("supervisor has been disposed")]
    Disposed,
}

impl SupervisorError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use jarvisor::SupervisorError;
    ///
    /// assert_eq!(SupervisorError::AlreadyRunning.as_label(), "supervisor_already_running");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            SupervisorError::AlreadyRunning => "supervisor_already_running",
            SupervisorError::Disposed => "supervisor_disposed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            SupervisorError::AlreadyRunning => "child process is already running".to_string(),
            SupervisorError::Disposed => "supervisor has been disposed".to_string(),
        }
    }
}
