//! Test helper functions and utilities

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::TempDir;

/// Helper functions for file system operations in tests
pub struct FileSystemHelper;

impl FileSystemHelper {
    /// Read file content and return as string
    pub fn read_file_content(path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    /// Parse a JSON file into a value
    pub fn read_json(path: &Path) -> serde_json::Value {
        let content = std::fs::read_to_string(path).expect("Failed to read JSON file");
        serde_json::from_str(&content).expect("File is not valid JSON")
    }
}

/// A directory of fake executables to prepend to `PATH`
pub struct FakeBinDir {
    dir: TempDir,
    log_path: PathBuf,
}

impl FakeBinDir {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create fake bin dir");
        let log_path = dir.path().join("calls.log");
        Self { dir, log_path }
    }

    /// Install a script named `name` that appends `name <args>` to the call
    /// log and exits with `exit_code`
    #[cfg(unix)]
    pub fn install(&self, name: &str, exit_code: i32) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.dir.path().join(name);
        let script = format!(
            "#!/bin/sh\necho \"{} $*\" >> \"{}\"\nexit {}\n",
            name,
            self.log_path.display(),
            exit_code
        );
        std::fs::write(&path, script).expect("Failed to write fake executable");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to mark fake executable");
        path
    }

    /// `PATH` value with this directory first
    pub fn path_env(&self) -> String {
        let original = std::env::var("PATH").unwrap_or_default();
        format!("{}:{}", self.dir.path().display(), original)
    }

    /// Wait for a background process to log a call starting with `prefix`
    pub fn wait_for_call(&self, prefix: &str, timeout: Duration) -> bool {
        let start = Instant::now();

        while start.elapsed() < timeout {
            if self.calls().iter().any(|call| call.starts_with(prefix)) {
                return true;
            }
            std::thread::sleep(Duration::from_millis(10));
        }

        false
    }

    /// Lines written by the fake executables so far
    pub fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(&self.log_path)
            .map(|content| content.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }
}
