use super::scm_interface::{CommandOutcome, HgOperations, ScmError};
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

/// Mercurial implementation of [`HgOperations`] backed by the `hg` binary
///
/// Output streams are inherited so hg's own messages reach the terminal.
pub struct HgScm {
    hg_executable: String,
}

impl Default for HgScm {
    fn default() -> Self {
        Self {
            hg_executable: "hg".to_string(),
        }
    }
}

impl HgScm {
    /// Create a new Mercurial SCM instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new Mercurial SCM instance with custom executable path
    pub fn with_executable(executable: impl Into<String>) -> Self {
        Self {
            hg_executable: executable.into(),
        }
    }

    /// Execute an hg command, optionally inside `working_dir`, and wait for it
    async fn execute_hg_command(
        &self,
        args: &[&str],
        working_dir: Option<&Path>,
    ) -> Result<CommandOutcome, ScmError> {
        let command_line = format!("{} {}", self.hg_executable, args.join(" "));
        tracing::debug!(command = %command_line, "running hg");

        let mut cmd = Command::new(&self.hg_executable);
        cmd.args(args);

        if let Some(dir) = working_dir {
            cmd.current_dir(dir);
        }

        let status = cmd
            .status()
            .await
            .map_err(|e| ScmError::spawn_failed(&self.hg_executable, command_line.clone(), e))?;

        Ok(CommandOutcome::new(command_line, status.code()))
    }
}

fn path_arg(path: &Path) -> Result<&str, ScmError> {
    path.to_str().ok_or_else(|| ScmError::InvalidPath {
        path: path.display().to_string(),
    })
}

#[async_trait]
impl HgOperations for HgScm {
    async fn init_repository(&self, repo_path: &Path) -> Result<CommandOutcome, ScmError> {
        self.execute_hg_command(&["init", path_arg(repo_path)?], None)
            .await
    }

    async fn commit_all(
        &self,
        repo_path: &Path,
        message: &str,
        user: &str,
    ) -> Result<CommandOutcome, ScmError> {
        self.execute_hg_command(
            &["commit", "--addremove", "--message", message, "--user", user],
            Some(repo_path),
        )
        .await
    }

    async fn make_public(
        &self,
        repo_path: &Path,
        revision: &str,
    ) -> Result<CommandOutcome, ScmError> {
        self.execute_hg_command(&["phase", "--public", "--rev", revision], Some(repo_path))
            .await
    }
}
