use std::path::PathBuf;

use crate::common::result::HgDevResult;
use crate::infrastructure::filesystem::AuthorizedKeysStore;

/// Environment variable that supplies the key when no flag is given
pub const SSH_PUBLIC_KEY_ENV: &str = "SSH_PUBLIC_KEY";

/// Settings for `authorize-ssh`
#[derive(Debug, Clone)]
pub struct AuthorizeSshConfig {
    /// File that receives the key
    pub authorized_keys_path: PathBuf,

    /// Key from the command line or environment
    pub public_key: Option<String>,
}

impl AuthorizeSshConfig {
    pub fn new(authorized_keys_path: impl Into<PathBuf>) -> Self {
        Self {
            authorized_keys_path: authorized_keys_path.into(),
            public_key: None,
        }
    }

    pub fn with_public_key(mut self, public_key: Option<String>) -> Self {
        self.public_key = public_key;
        self
    }

    /// The key to install; only an empty value counts as absent
    pub fn effective_key(&self) -> Option<&str> {
        self.public_key.as_deref().filter(|key| !key.is_empty())
    }
}

/// What `authorize-ssh` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizeSshOutcome {
    /// The file now holds exactly the key
    Authorized { path: PathBuf },
    /// No key was available; the old file, if any, is gone
    Skipped { removed_existing: bool },
}

/// Replaces the authorized-keys file with a single public key
pub struct AuthorizeSshUseCase {
    config: AuthorizeSshConfig,
}

impl AuthorizeSshUseCase {
    pub fn new(config: AuthorizeSshConfig) -> Self {
        Self { config }
    }

    pub async fn execute(&self) -> HgDevResult<AuthorizeSshOutcome> {
        let store = AuthorizedKeysStore::new(&self.config.authorized_keys_path);
        let removed_existing = store.remove().await?;

        let Some(key) = self.config.effective_key() else {
            tracing::warn!(
                "No SSH public key provided via --public-key or {}, skipping authorization",
                SSH_PUBLIC_KEY_ENV
            );
            return Ok(AuthorizeSshOutcome::Skipped { removed_existing });
        };

        store.replace(key).await?;
        tracing::info!(path = %store.path().display(), "authorized SSH public key");

        Ok(AuthorizeSshOutcome::Authorized {
            path: store.path().to_path_buf(),
        })
    }
}
