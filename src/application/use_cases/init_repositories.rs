use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs as async_fs;

use crate::common::error::HgDevError;
use crate::common::result::{HgDevResult, ResultExt};
use crate::domain::entities::arc_config::{ArcConfig, ARC_CONFIG_FILE_NAME};
use crate::domain::entities::repository::{RepositoryDescriptor, README_FILE_NAME};
use crate::infrastructure::filesystem::WebConfigStore;
use crate::infrastructure::scm::{CommandOutcome, HgOperations, HgScm};

/// Default location of the provisioned repositories
pub const DEFAULT_BASE_DIR: &str = "/repos";

/// Phabricator instance written into `.arcconfig`
pub const DEFAULT_PHABRICATOR_URI: &str = "http://phabricator.test";

/// Author of the initial revision
pub const DEFAULT_COMMIT_USER: &str = "hgdev <hgdev@example.test>";

pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

/// Settings for repository provisioning
#[derive(Debug, Clone)]
pub struct InitRepositoriesConfig {
    /// Directory holding one working copy per repository
    pub base_dir: PathBuf,

    /// Repositories to create, in order
    pub repositories: Vec<RepositoryDescriptor>,

    /// Value of `phabricator.uri` in the sidecar
    pub phabricator_uri: String,

    /// Whether to write `.arcconfig` into each repository
    pub write_arc_config: bool,

    /// `--user` for the initial commit
    pub commit_user: String,
}

impl Default for InitRepositoriesConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(DEFAULT_BASE_DIR),
            repositories: RepositoryDescriptor::defaults(),
            phabricator_uri: DEFAULT_PHABRICATOR_URI.to_string(),
            write_arc_config: false,
            commit_user: DEFAULT_COMMIT_USER.to_string(),
        }
    }
}

impl InitRepositoriesConfig {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Default::default()
        }
    }

    pub fn with_phabricator_uri(mut self, uri: impl Into<String>) -> Self {
        self.phabricator_uri = uri.into();
        self
    }

    pub fn with_arc_config(mut self, write_arc_config: bool) -> Self {
        self.write_arc_config = write_arc_config;
        self
    }

    pub fn with_repositories(mut self, repositories: Vec<RepositoryDescriptor>) -> Self {
        self.repositories = repositories;
        self
    }

    pub fn with_commit_user(mut self, user: impl Into<String>) -> Self {
        self.commit_user = user.into();
        self
    }
}

/// One repository as left on disk
#[derive(Debug, Clone)]
pub struct ProvisionedRepository {
    pub name: String,
    pub path: PathBuf,
    /// Path of `.arcconfig` when one was written
    pub arc_config_path: Option<PathBuf>,
    /// hg steps that exited unsuccessfully
    pub failed_steps: Vec<CommandOutcome>,
}

/// Result of a full `init` run
#[derive(Debug, Clone)]
pub struct InitRepositoriesResult {
    pub repositories: Vec<ProvisionedRepository>,
    pub web_config_path: PathBuf,
}

impl InitRepositoriesResult {
    /// Number of hg steps that exited unsuccessfully across all repositories
    pub fn failed_step_count(&self) -> usize {
        self.repositories.iter().map(|r| r.failed_steps.len()).sum()
    }
}

/// Creates the fixture repositories and the hgweb config
///
/// Provisioning is best effort: hg exit codes are logged and otherwise
/// ignored so one broken repository does not stop the rest. Failing to
/// launch hg at all, or to touch the filesystem, aborts the run.
pub struct InitRepositoriesUseCase {
    config: InitRepositoriesConfig,
    hg: Arc<dyn HgOperations>,
}

impl InitRepositoriesUseCase {
    pub fn new(config: InitRepositoriesConfig) -> Self {
        Self::with_hg(config, Arc::new(HgScm::new()))
    }

    pub fn with_hg(config: InitRepositoriesConfig, hg: Arc<dyn HgOperations>) -> Self {
        Self { config, hg }
    }

    pub async fn execute(&self) -> HgDevResult<InitRepositoriesResult> {
        let base_dir = &self.config.base_dir;
        let mut repositories = Vec::with_capacity(self.config.repositories.len());

        for repository in &self.config.repositories {
            async_fs::create_dir_all(base_dir)
                .await
                .with_filesystem_error("Failed to create base directory", base_dir)?;

            let provisioned = self.provision(repository).await?;
            tracing::info!(
                repository = %provisioned.name,
                path = %provisioned.path.display(),
                "repository provisioned"
            );
            repositories.push(provisioned);
        }

        let web_config_path = WebConfigStore::new(base_dir).write().await?;
        tracing::info!(path = %web_config_path.display(), "hgweb config written");

        Ok(InitRepositoriesResult {
            repositories,
            web_config_path,
        })
    }

    async fn provision(&self, repository: &RepositoryDescriptor) -> HgDevResult<ProvisionedRepository> {
        let repo_path = repository.path_in(&self.config.base_dir);
        let mut failed_steps = Vec::new();

        let outcome = self
            .hg
            .init_repository(&repo_path)
            .await
            .map_err(|e| HgDevError::scm_error(&repository.name, e))?;
        record_outcome(&repository.name, outcome, &mut failed_steps);

        // hg init may have failed; the files below still need a directory
        async_fs::create_dir_all(&repo_path)
            .await
            .with_filesystem_error("Failed to create repository directory", &repo_path)?;

        let readme_path = repo_path.join(README_FILE_NAME);
        async_fs::write(&readme_path, repository.readme_contents())
            .await
            .with_filesystem_error("Failed to write README", &readme_path)?;

        let arc_config_path = if self.config.write_arc_config {
            let path = repo_path.join(ARC_CONFIG_FILE_NAME);
            let arc_config = ArcConfig::for_repository(repository, &self.config.phabricator_uri);
            async_fs::write(&path, arc_config.to_json()?)
                .await
                .with_filesystem_error("Failed to write .arcconfig", &path)?;
            Some(path)
        } else {
            None
        };

        let outcome = self
            .hg
            .commit_all(&repo_path, INITIAL_COMMIT_MESSAGE, &self.config.commit_user)
            .await
            .map_err(|e| HgDevError::scm_error(&repository.name, e))?;
        record_outcome(&repository.name, outcome, &mut failed_steps);

        let outcome = self
            .hg
            .make_public(&repo_path, ".")
            .await
            .map_err(|e| HgDevError::scm_error(&repository.name, e))?;
        record_outcome(&repository.name, outcome, &mut failed_steps);

        Ok(ProvisionedRepository {
            name: repository.name.clone(),
            path: repo_path,
            arc_config_path,
            failed_steps,
        })
    }
}

fn record_outcome(repository: &str, outcome: CommandOutcome, failed_steps: &mut Vec<CommandOutcome>) {
    if !outcome.success() {
        tracing::warn!(
            repository,
            command = %outcome.command,
            exit_code = ?outcome.exit_code,
            "hg exited unsuccessfully, continuing"
        );
        failed_steps.push(outcome);
    }
}
