//! # Command assembly for the hosted JVM process.
//!
//! The launched command line has a fixed shape the hosted runtime's argument
//! parsing depends on:
//!
//! ```text
//! <jvm_args> -jar "<jar>" <app_args>
//! ```
//!
//! Only the artifact path is quoted in the rendered form. When actually
//! spawning, the jar travels as a single argv element, so paths containing
//! spaces survive without any shell quoting.

use std::process::Stdio;

use tokio::process::Command;

use crate::launch::spec::LaunchSpec;

/// The fixed flag introducing the artifact.
const LAUNCH_FLAG: &str = "-jar";

/// Renders the launched command's argument string for display and logging.
///
/// Preserves the literal shape `<jvm_args> -jar "<jar>" <app_args>`, with
/// empty argument groups omitted.
pub(crate) fn command_line(spec: &LaunchSpec) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(3);
    let jvm = spec.jvm_args().trim();
    if !jvm.is_empty() {
        parts.push(jvm.to_string());
    }
    parts.push(format!("{LAUNCH_FLAG} \"{}\"", spec.jar().display()));
    let app = spec.app_args().trim();
    if !app.is_empty() {
        parts.push(app.to_string());
    }
    parts.join(" ")
}

/// Builds the spawnable command: resolved java executable, arguments in
/// launch order, working directory, and all three standard streams piped
/// (no console window, readers attach to stdout/stderr).
///
/// `kill_on_drop` is set as a backstop: if the supervisor's runtime goes
/// away while the child lives, the OS reaps it rather than orphaning it.
pub(crate) fn build(spec: &LaunchSpec) -> Command {
    let mut command = Command::new(spec.effective_java());
    command
        .args(spec.jvm_args().split_whitespace())
        .arg(LAUNCH_FLAG)
        .arg(spec.jar())
        .args(spec.app_args().split_whitespace())
        .current_dir(spec.effective_working_dir())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    command
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn test_command_line_quotes_artifact_only() {
        let spec = LaunchSpec::new("/opt/my apps/demo.jar")
            .with_jvm_args("-Xmx512m")
            .with_app_args("--server.port=8081");
        assert_eq!(
            command_line(&spec),
            "-Xmx512m -jar \"/opt/my apps/demo.jar\" --server.port=8081"
        );
    }

    #[test]
    fn test_command_line_omits_empty_argument_groups() {
        let spec = LaunchSpec::new("/opt/app/demo.jar");
        assert_eq!(command_line(&spec), "-jar \"/opt/app/demo.jar\"");
    }

    #[test]
    fn test_argv_preserves_launch_order() {
        let spec = LaunchSpec::new("/opt/app/demo.jar")
            .with_java("/usr/bin/java")
            .with_jvm_args("-Xmx512m -Dspring.profiles.active=prod")
            .with_app_args("--server.port=8081");
        let command = build(&spec);
        let args: Vec<&OsStr> = command.as_std().get_args().collect();
        assert_eq!(
            args,
            vec![
                OsStr::new("-Xmx512m"),
                OsStr::new("-Dspring.profiles.active=prod"),
                OsStr::new("-jar"),
                OsStr::new("/opt/app/demo.jar"),
                OsStr::new("--server.port=8081"),
            ]
        );
        assert_eq!(command.as_std().get_program(), OsStr::new("/usr/bin/java"));
    }

    #[test]
    fn test_argv_keeps_spaced_jar_path_as_one_element() {
        let spec = LaunchSpec::new("/opt/my apps/demo.jar").with_java("java");
        let command = build(&spec);
        let args: Vec<&OsStr> = command.as_std().get_args().collect();
        assert_eq!(
            args,
            vec![OsStr::new("-jar"), OsStr::new("/opt/my apps/demo.jar")]
        );
    }
}
