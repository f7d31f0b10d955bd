//! Mock services for testing
//!
//! Stand-ins for the hg driver so use cases can run without Mercurial.

use async_trait::async_trait;
use hgdev::infrastructure::scm::{CommandOutcome, HgOperations, ScmError};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// One recorded hg invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HgCall {
    Init(PathBuf),
    Commit {
        repo: PathBuf,
        message: String,
        user: String,
    },
    Phase {
        repo: PathBuf,
        revision: String,
    },
}

/// Records every call and answers with a fixed exit code
pub struct RecordingHg {
    calls: Arc<Mutex<Vec<HgCall>>>,
    exit_code: Option<i32>,
    fail_to_spawn: bool,
}

impl RecordingHg {
    /// Every command succeeds
    pub fn new() -> Self {
        Self::with_exit_code(Some(0))
    }

    /// Every command "runs" and exits with `exit_code`
    pub fn with_exit_code(exit_code: Option<i32>) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            exit_code,
            fail_to_spawn: false,
        }
    }

    /// Behaves as if hg is not installed
    pub fn missing_binary() -> Self {
        Self {
            fail_to_spawn: true,
            ..Self::new()
        }
    }

    /// Get call history for verification
    pub fn calls(&self) -> Vec<HgCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: HgCall, command: String) -> Result<CommandOutcome, ScmError> {
        if self.fail_to_spawn {
            return Err(ScmError::executable_not_found("hg"));
        }
        self.calls.lock().unwrap().push(call);
        Ok(CommandOutcome::new(command, self.exit_code))
    }
}

#[async_trait]
impl HgOperations for RecordingHg {
    async fn init_repository(&self, repo_path: &Path) -> Result<CommandOutcome, ScmError> {
        self.record(
            HgCall::Init(repo_path.to_path_buf()),
            format!("hg init {}", repo_path.display()),
        )
    }

    async fn commit_all(
        &self,
        repo_path: &Path,
        message: &str,
        user: &str,
    ) -> Result<CommandOutcome, ScmError> {
        self.record(
            HgCall::Commit {
                repo: repo_path.to_path_buf(),
                message: message.to_string(),
                user: user.to_string(),
            },
            "hg commit".to_string(),
        )
    }

    async fn make_public(
        &self,
        repo_path: &Path,
        revision: &str,
    ) -> Result<CommandOutcome, ScmError> {
        self.record(
            HgCall::Phase {
                repo: repo_path.to_path_buf(),
                revision: revision.to_string(),
            },
            "hg phase".to_string(),
        )
    }
}
