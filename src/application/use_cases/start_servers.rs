use std::path::Path;
use std::process::ExitStatus;
use std::sync::Arc;

use crate::application::use_cases::authorize_ssh::{
    AuthorizeSshConfig, AuthorizeSshOutcome, AuthorizeSshUseCase,
};
use crate::application::use_cases::init_repositories::{
    InitRepositoriesConfig, InitRepositoriesResult, InitRepositoriesUseCase,
};
use crate::common::result::HgDevResult;
use crate::infrastructure::filesystem::WebConfigStore;
use crate::infrastructure::process::{LaunchSpec, ProcessLauncher};
use crate::infrastructure::scm::HgScm;

pub const DEFAULT_HG_SERVE_PORT: u16 = 8000;
pub const DEFAULT_SSHD_PORT: u16 = 8022;

/// sshd needs root to bind and read host keys
pub const DEFAULT_SSHD_COMMAND: [&str; 2] = ["sudo", "/usr/sbin/sshd"];

/// Settings for `start`
#[derive(Debug, Clone)]
pub struct StartServersConfig {
    /// Provisioning settings; also supplies the base directory
    pub init: InitRepositoriesConfig,

    /// Key installation settings
    pub authorize_ssh: AuthorizeSshConfig,

    /// Run provisioning before launching
    pub run_init: bool,

    /// Install the SSH key before launching
    pub run_ssh_auth: bool,

    /// Launch sshd in the background
    pub run_sshd: bool,

    pub hg_serve_port: u16,
    pub sshd_port: u16,

    /// hg binary used for provisioning and `hg serve`
    pub hg_executable: String,

    /// Program and leading arguments used to start sshd
    pub sshd_command: Vec<String>,
}

impl StartServersConfig {
    pub fn new(init: InitRepositoriesConfig, authorize_ssh: AuthorizeSshConfig) -> Self {
        Self {
            init,
            authorize_ssh,
            run_init: true,
            run_ssh_auth: true,
            run_sshd: true,
            hg_serve_port: DEFAULT_HG_SERVE_PORT,
            sshd_port: DEFAULT_SSHD_PORT,
            hg_executable: "hg".to_string(),
            sshd_command: DEFAULT_SSHD_COMMAND.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_ports(mut self, hg_serve_port: u16, sshd_port: u16) -> Self {
        self.hg_serve_port = hg_serve_port;
        self.sshd_port = sshd_port;
        self
    }

    /// Enable or disable the optional steps
    pub fn with_steps(mut self, run_init: bool, run_ssh_auth: bool, run_sshd: bool) -> Self {
        self.run_init = run_init;
        self.run_ssh_auth = run_ssh_auth;
        self.run_sshd = run_sshd;
        self
    }

    pub fn with_hg_executable(mut self, executable: impl Into<String>) -> Self {
        self.hg_executable = executable.into();
        self
    }

    pub fn with_sshd_command(mut self, command: Vec<String>) -> Self {
        self.sshd_command = command;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.init.base_dir
    }

    /// `sshd -p <port>` behind the configured prefix
    pub fn sshd_spec(&self) -> LaunchSpec {
        let mut parts = self.sshd_command.iter();
        let program = parts.next().cloned().unwrap_or_else(|| "sshd".to_string());

        LaunchSpec::new(program)
            .args(parts.cloned())
            .arg("-p")
            .arg(self.sshd_port.to_string())
    }

    /// `hg serve` over the base directory, logging to the inherited streams
    pub fn hg_serve_spec(&self) -> LaunchSpec {
        let base_dir = self.base_dir();
        let web_config = WebConfigStore::path_for(base_dir);

        LaunchSpec::new(&self.hg_executable).args([
            "serve".to_string(),
            "--cwd".to_string(),
            base_dir.display().to_string(),
            "--web-conf".to_string(),
            web_config.display().to_string(),
            "--port".to_string(),
            self.hg_serve_port.to_string(),
            "--accesslog".to_string(),
            "/dev/stdout".to_string(),
            "--errorlog".to_string(),
            "/dev/stderr".to_string(),
        ])
    }
}

/// Everything `start` did before hg serve returned
#[derive(Debug)]
pub struct StartServersResult {
    pub init: Option<InitRepositoriesResult>,
    pub authorize_ssh: Option<AuthorizeSshOutcome>,
    /// pid of the sshd launcher process, if started
    pub sshd_pid: Option<u32>,
    /// How hg serve exited
    pub hg_serve_status: ExitStatus,
}

/// Runs the optional setup steps, starts sshd and then blocks on hg serve
pub struct StartServersUseCase {
    config: StartServersConfig,
}

impl StartServersUseCase {
    pub fn new(config: StartServersConfig) -> Self {
        Self { config }
    }

    pub async fn execute(&self) -> HgDevResult<StartServersResult> {
        let init = if self.config.run_init {
            let hg = Arc::new(HgScm::with_executable(&self.config.hg_executable));
            let use_case = InitRepositoriesUseCase::with_hg(self.config.init.clone(), hg);
            Some(use_case.execute().await?)
        } else {
            None
        };

        let authorize_ssh = if self.config.run_ssh_auth {
            let use_case = AuthorizeSshUseCase::new(self.config.authorize_ssh.clone());
            Some(use_case.execute().await?)
        } else {
            None
        };

        let sshd_pid = if self.config.run_sshd {
            let spec = self.config.sshd_spec();
            let child = ProcessLauncher::spawn_background(&spec)?;
            tracing::info!(port = self.config.sshd_port, command = %spec.command_line(), "sshd started");
            child.id()
        } else {
            None
        };

        let spec = self.config.hg_serve_spec();
        tracing::info!(
            port = self.config.hg_serve_port,
            base_dir = %self.config.base_dir().display(),
            "starting hg serve"
        );
        let hg_serve_status = ProcessLauncher::run_foreground(&spec).await?;

        if hg_serve_status.success() {
            tracing::info!("hg serve exited");
        } else {
            tracing::warn!(status = %hg_serve_status, "hg serve exited unsuccessfully");
        }

        Ok(StartServersResult {
            init,
            authorize_ssh,
            sshd_pid,
            hg_serve_status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config() -> StartServersConfig {
        StartServersConfig::new(
            InitRepositoriesConfig::new("/repos"),
            AuthorizeSshConfig::new("/home/dev/.ssh/authorized_keys"),
        )
    }

    #[test]
    fn test_defaults() {
        let config = config();
        assert!(config.run_init && config.run_ssh_auth && config.run_sshd);
        assert_eq!(config.hg_serve_port, 8000);
        assert_eq!(config.sshd_port, 8022);
    }

    #[test]
    fn test_sshd_spec() {
        let spec = config().with_ports(8000, 2222).sshd_spec();
        assert_eq!(spec.command_line(), "sudo /usr/sbin/sshd -p 2222");
    }

    #[test]
    fn test_sshd_spec_without_sudo() {
        let spec = config()
            .with_sshd_command(vec!["/usr/sbin/sshd".to_string()])
            .sshd_spec();
        assert_eq!(spec.program, "/usr/sbin/sshd");
        assert_eq!(spec.args, vec!["-p", "8022"]);
    }

    #[test]
    fn test_hg_serve_spec() {
        let spec = config().with_ports(9000, 8022).hg_serve_spec();
        assert_eq!(
            spec.command_line(),
            "hg serve --cwd /repos --web-conf /repos/hgweb.config --port 9000 \
             --accesslog /dev/stdout --errorlog /dev/stderr"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_only_hg_serve_when_steps_disabled() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let keys = temp_dir.path().join("authorized_keys");
        std::fs::write(&keys, "ssh-ed25519 AAAA keep").unwrap();

        let config = StartServersConfig::new(
            InitRepositoriesConfig::new(temp_dir.path().join("repos")),
            AuthorizeSshConfig::new(&keys),
        )
        .with_steps(false, false, false)
        .with_hg_executable("true");

        let result = StartServersUseCase::new(config).execute().await.unwrap();
        assert!(result.init.is_none());
        assert!(result.authorize_ssh.is_none());
        assert!(result.sshd_pid.is_none());
        assert!(result.hg_serve_status.success());
        assert!(!temp_dir.path().join("repos").exists());
        assert_eq!(std::fs::read_to_string(&keys).unwrap(), "ssh-ed25519 AAAA keep");
    }

    #[tokio::test]
    async fn test_missing_hg_serve_binary_propagates() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = StartServersConfig::new(
            InitRepositoriesConfig::new(temp_dir.path()),
            AuthorizeSshConfig::new(temp_dir.path().join("authorized_keys")),
        )
        .with_steps(false, false, false)
        .with_hg_executable("hgdev-no-such-hg-binary");

        assert!(StartServersUseCase::new(config).execute().await.is_err());
    }
}
