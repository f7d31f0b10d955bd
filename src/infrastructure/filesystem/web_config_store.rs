use std::path::{Path, PathBuf};
use tokio::fs as async_fs;

use crate::common::result::{HgDevResult, ResultExt};

/// File name of the hgweb routing config inside the base directory
pub const WEB_CONFIG_FILE_NAME: &str = "hgweb.config";

/// Writes the `hg serve --web-conf` file that publishes every repository
/// under the base directory at `/`
#[derive(Debug, Clone)]
pub struct WebConfigStore {
    base_dir: PathBuf,
}

impl WebConfigStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn path(&self) -> PathBuf {
        Self::path_for(&self.base_dir)
    }

    /// Location of the config for a given base directory
    pub fn path_for(base_dir: &Path) -> PathBuf {
        base_dir.join(WEB_CONFIG_FILE_NAME)
    }

    /// `[paths]` section mapping `/` to `<base>/*`, no trailing newline
    pub fn contents(&self) -> String {
        format!("[paths]\n/ = {}/*", self.base_dir.display())
    }

    /// Overwrite the config file and return its path
    pub async fn write(&self) -> HgDevResult<PathBuf> {
        let path = self.path();
        async_fs::write(&path, self.contents())
            .await
            .with_filesystem_error("Failed to write hgweb config", &path)?;
        Ok(path)
    }
}
