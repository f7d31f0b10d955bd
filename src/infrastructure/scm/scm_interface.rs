use async_trait::async_trait;
use std::path::Path;

/// Mercurial operations needed to provision a development repository
#[async_trait]
pub trait HgOperations: Send + Sync {
    /// Create a repository at `repo_path`; an existing repository is left to hg
    async fn init_repository(&self, repo_path: &Path) -> Result<CommandOutcome, ScmError>;

    /// Add every untracked file and commit the working copy
    async fn commit_all(
        &self,
        repo_path: &Path,
        message: &str,
        user: &str,
    ) -> Result<CommandOutcome, ScmError>;

    /// Move `revision` to the public phase
    async fn make_public(&self, repo_path: &Path, revision: &str)
        -> Result<CommandOutcome, ScmError>;
}

/// What happened when an hg command ran to completion
///
/// A non-zero exit code is not an error at this layer; callers decide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Rendered command line, for logs
    pub command: String,
    /// Exit code, `None` when the process was killed by a signal
    pub exit_code: Option<i32>,
}

impl CommandOutcome {
    pub fn new(command: impl Into<String>, exit_code: Option<i32>) -> Self {
        Self {
            command: command.into(),
            exit_code,
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Errors that can occur while driving hg
#[derive(Debug, thiserror::Error)]
pub enum ScmError {
    #[error("SCM executable not found: {executable}")]
    ExecutableNotFound { executable: String },

    #[error("Failed to run {command}: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid path: {path}")]
    InvalidPath { path: String },
}

impl ScmError {
    /// Create an executable not found error
    pub fn executable_not_found(executable: impl Into<String>) -> Self {
        Self::ExecutableNotFound {
            executable: executable.into(),
        }
    }

    /// Classify a spawn failure, singling out a missing binary
    pub fn spawn_failed(executable: &str, command: impl Into<String>, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::executable_not_found(executable)
        } else {
            Self::SpawnFailed {
                command: command.into(),
                source,
            }
        }
    }
}
