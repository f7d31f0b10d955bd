use std::ffi::OsStr;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs as async_fs;

use crate::common::error::HgDevError;
use crate::common::result::{HgDevResult, ResultExt};

/// `~/.ssh/authorized_keys` relative to the home directory
pub const AUTHORIZED_KEYS_RELATIVE_PATH: &str = ".ssh/authorized_keys";

const SSH_DIR_NAME: &str = ".ssh";

/// Owns a single authorized-keys file and replaces it wholesale
#[derive(Debug, Clone)]
pub struct AuthorizedKeysStore {
    path: PathBuf,
}

impl AuthorizedKeysStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_path() -> HgDevResult<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(AUTHORIZED_KEYS_RELATIVE_PATH))
            .ok_or_else(|| HgDevError::config_error("Could not determine home directory"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the file; a missing file counts as removed
    ///
    /// Returns whether a file was actually deleted.
    pub async fn remove(&self) -> HgDevResult<bool> {
        match async_fs::remove_file(&self.path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(HgDevError::filesystem_error_with_source(
                "Failed to remove authorized keys",
                Some(self.path.clone()),
                e,
            )),
        }
    }

    /// Write `key` as the file's entire content
    ///
    /// A missing parent directory is created with mode 0700. An existing
    /// one keeps its mode unless it is an `.ssh` directory.
    pub async fn replace(&self, key: &str) -> HgDevResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            let existed = async_fs::try_exists(parent)
                .await
                .with_filesystem_error("Failed to inspect ssh directory", parent)?;

            if !existed {
                async_fs::create_dir_all(parent)
                    .await
                    .with_filesystem_error("Failed to create ssh directory", parent)?;
            }
            if !existed || parent.file_name() == Some(OsStr::new(SSH_DIR_NAME)) {
                restrict_permissions(parent, 0o700).await?;
            }
        }

        async_fs::write(&self.path, key)
            .await
            .with_filesystem_error("Failed to write authorized keys", &self.path)?;
        restrict_permissions(&self.path, 0o600).await
    }
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path, mode: u32) -> HgDevResult<()> {
    use std::os::unix::fs::PermissionsExt;

    async_fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
        .await
        .with_filesystem_error("Failed to set permissions", path)
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path, _mode: u32) -> HgDevResult<()> {
    Ok(())
}
