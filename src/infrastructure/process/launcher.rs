use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::process::{Child, Command};

use crate::common::error::HgDevError;
use crate::common::result::HgDevResult;

/// A program to launch together with its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    /// Program to execute, looked up on `PATH`
    pub program: String,

    /// Arguments passed to the program
    pub args: Vec<String>,

    /// Working directory for the process
    pub working_directory: Option<PathBuf>,
}

impl LaunchSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_directory: None,
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set working directory
    pub fn with_working_directory<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.working_directory = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Command line as it would be typed, for logs and errors
    pub fn command_line(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        if let Some(dir) = &self.working_directory {
            cmd.current_dir(dir);
        }

        cmd
    }
}

/// Launches daemons with inherited output streams
pub struct ProcessLauncher;

impl ProcessLauncher {
    /// Start `spec` and return immediately
    ///
    /// The child is neither awaited nor killed when the handle is dropped.
    pub fn spawn_background(spec: &LaunchSpec) -> HgDevResult<Child> {
        let command_line = spec.command_line();
        tracing::debug!(command = %command_line, "spawning background process");

        spec.to_command().spawn().map_err(|e| {
            HgDevError::command_error_with_source(
                format!("Failed to start {}", spec.program),
                command_line,
                e,
            )
        })
    }

    /// Start `spec` and wait until it exits
    pub async fn run_foreground(spec: &LaunchSpec) -> HgDevResult<ExitStatus> {
        let command_line = spec.command_line();
        tracing::debug!(command = %command_line, "running foreground process");

        let mut child = spec.to_command().spawn().map_err(|e| {
            HgDevError::command_error_with_source(
                format!("Failed to start {}", spec.program),
                command_line.clone(),
                e,
            )
        })?;

        child.wait().await.map_err(|e| {
            HgDevError::command_error_with_source(
                format!("Failed to wait for {}", spec.program),
                command_line,
                e,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_rendering() {
        let spec = LaunchSpec::new("sudo").arg("/usr/sbin/sshd").args(["-p", "8022"]);
        assert_eq!(spec.command_line(), "sudo /usr/sbin/sshd -p 8022");
        assert_eq!(LaunchSpec::new("hg").command_line(), "hg");
    }

    #[test]
    fn test_working_directory() {
        let spec = LaunchSpec::new("hg").with_working_directory("/repos");
        assert_eq!(spec.working_directory, Some(PathBuf::from("/repos")));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_foreground_waits_for_exit() {
        let status = ProcessLauncher::run_foreground(&LaunchSpec::new("true"))
            .await
            .unwrap();
        assert!(status.success());

        let status = ProcessLauncher::run_foreground(&LaunchSpec::new("false"))
            .await
            .unwrap();
        assert!(!status.success());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_spawn_background_returns_child() {
        let mut child = ProcessLauncher::spawn_background(&LaunchSpec::new("true")).unwrap();
        assert!(child.wait().await.unwrap().success());
    }

    #[tokio::test]
    async fn test_missing_binary_is_an_error() {
        let spec = LaunchSpec::new("hgdev-no-such-daemon").arg("--port");
        let error = ProcessLauncher::run_foreground(&spec).await.unwrap_err();
        assert!(matches!(error, HgDevError::CommandError { ref command, .. } if command == "hgdev-no-such-daemon --port"));

        assert!(ProcessLauncher::spawn_background(&spec).is_err());
    }
}
