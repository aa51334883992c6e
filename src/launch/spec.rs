//! # Launch specification for the hosted JVM process.
//!
//! Defines [`LaunchSpec`] - the immutable bundle of parameters describing
//! how the child is launched: java executable, executable jar, working
//! directory, and the argument strings on both sides of the artifact.
//!
//! A spec is built fluently and validated once, when the
//! [`Supervisor`](crate::Supervisor) is constructed:
//! - the jar must exist on disk,
//! - an explicitly supplied working directory must exist.
//!
//! No process is spawned until `start` is called.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Specification for launching the hosted process.
///
/// Bundles together:
/// - The java executable (optional, resolved from the environment when unset)
/// - The executable jar (required)
/// - The working directory (optional, defaults to the jar's directory)
/// - JVM arguments (whitespace-separated, placed before `-jar`)
/// - Application arguments (whitespace-separated, placed after the jar)
///
/// ## Example
/// ```no_run
/// use jarvisor::LaunchSpec;
///
/// let launch = LaunchSpec::new("/opt/app/service.jar")
///     .with_jvm_args("-Xmx512m")
///     .with_app_args("--server.port=8081");
///
/// assert_eq!(launch.jar().to_str(), Some("/opt/app/service.jar"));
/// ```
#[derive(Clone, Debug)]
pub struct LaunchSpec {
    java: Option<PathBuf>,
    jar: PathBuf,
    working_dir: Option<PathBuf>,
    jvm_args: String,
    app_args: String,
}

impl LaunchSpec {
    /// Creates a specification for the given executable jar.
    pub fn new(jar: impl Into<PathBuf>) -> Self {
        Self {
            java: None,
            jar: jar.into(),
            working_dir: None,
            jvm_args: String::new(),
            app_args: String::new(),
        }
    }

    /// Returns a new spec with an explicit java executable.
    pub fn with_java(mut self, java: impl Into<PathBuf>) -> Self {
        self.java = Some(java.into());
        self
    }

    /// Returns a new spec with an explicit working directory.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Returns a new spec with the given JVM arguments (before `-jar`).
    pub fn with_jvm_args(mut self, args: impl Into<String>) -> Self {
        self.jvm_args = args.into();
        self
    }

    /// Returns a new spec with the given application arguments (after the jar).
    pub fn with_app_args(mut self, args: impl Into<String>) -> Self {
        self.app_args = args.into();
        self
    }

    /// Returns the artifact path.
    pub fn jar(&self) -> &Path {
        &self.jar
    }

    /// Returns the JVM argument string.
    pub fn jvm_args(&self) -> &str {
        &self.jvm_args
    }

    /// Returns the application argument string.
    pub fn app_args(&self) -> &str {
        &self.app_args
    }

    /// Resolves the java executable to launch.
    ///
    /// Resolution order: the explicit path when one was supplied, then
    /// `$JAVA_HOME/bin/java` when `JAVA_HOME` is set, then bare `java`
    /// (resolved through `PATH` by the OS).
    pub fn effective_java(&self) -> PathBuf {
        if let Some(java) = &self.java {
            return java.clone();
        }
        match env::var_os("JAVA_HOME") {
            Some(home) => PathBuf::from(home).join("bin").join("java"),
            None => PathBuf::from("java"),
        }
    }

    /// Resolves the working directory: the explicit one when supplied,
    /// otherwise the jar's parent directory.
    pub fn effective_working_dir(&self) -> PathBuf {
        if let Some(dir) = &self.working_dir {
            return dir.clone();
        }
        match self.jar.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Validates the filesystem preconditions of this spec.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !self.jar.is_file() {
            return Err(ConfigError::ArtifactNotFound {
                path: self.jar.clone(),
            });
        }
        if let Some(dir) = &self.working_dir {
            if !dir.is_dir() {
                return Err(ConfigError::WorkingDirNotFound { path: dir.clone() });
            }
        }
        Ok(())
    }
}
