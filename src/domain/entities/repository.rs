use std::path::{Path, PathBuf};

use crate::domain::value_objects::callsign::Callsign;

/// Repositories provisioned by `init`, in creation order
pub const DEFAULT_REPOSITORIES: [&str; 4] = ["test-repo", "first-repo", "second-repo", "third-repo"];

/// Name of the identity file written into every repository
pub const README_FILE_NAME: &str = "README";

/// A repository to provision under the base directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryDescriptor {
    /// Directory name under the base directory
    pub name: String,
}

impl RepositoryDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Descriptors for [`DEFAULT_REPOSITORIES`]
    pub fn defaults() -> Vec<Self> {
        DEFAULT_REPOSITORIES.iter().map(|name| Self::new(*name)).collect()
    }

    /// Working copy location under `base_dir`
    pub fn path_in(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.name)
    }

    pub fn callsign(&self) -> Callsign {
        Callsign::from_repository_name(&self.name)
    }

    /// Content of the README file; just the name
    pub fn readme_contents(&self) -> &str {
        &self.name
    }
}
