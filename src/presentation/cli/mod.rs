pub mod commands;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::exit;

use crate::application::use_cases::{
    authorize_ssh::AuthorizeSshConfig,
    init_repositories::{InitRepositoriesConfig, DEFAULT_BASE_DIR, DEFAULT_PHABRICATOR_URI},
    start_servers::{StartServersConfig, DEFAULT_HG_SERVE_PORT, DEFAULT_SSHD_PORT},
};
use crate::infrastructure::filesystem::AuthorizedKeysStore;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    ", built ",
    env!("BUILD_DATE"),
    " for ",
    env!("BUILD_TARGET"),
    ")"
);

/// Interpret `ARCCONFIG`-style switches: `y`, `1` and `true` enable,
/// anything else disables
pub fn parse_truthy(value: &str) -> Result<bool, String> {
    Ok(matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "y" | "1" | "true"
    ))
}

/// hgdev - Mercurial development environment bootstrap
#[derive(Parser)]
#[command(name = "hgdev")]
#[command(about = "Provision local Mercurial repositories and serve them over HTTP and SSH")]
#[command(version, long_version = LONG_VERSION)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Directory holding the repositories
    #[arg(long, global = true, env = "HG_REPOS_DIR", default_value = DEFAULT_BASE_DIR)]
    pub base_dir: PathBuf,

    /// Phabricator URI written into .arcconfig
    #[arg(long, global = true, env = "PHABRICATOR_URI", default_value = DEFAULT_PHABRICATOR_URI)]
    pub phabricator_uri: String,

    /// Write an .arcconfig into every repository (y, 1 or true)
    #[arg(
        long,
        global = true,
        env = "ARCCONFIG",
        action = ArgAction::Set,
        value_parser = parse_truthy,
        default_value = "false"
    )]
    pub arcconfig: bool,

    /// Authorized keys file (defaults to ~/.ssh/authorized_keys)
    #[arg(long, global = true)]
    pub authorized_keys: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the repositories and the hgweb config
    Init,

    /// Install a public key as the only authorized SSH key
    AuthorizeSsh {
        /// Public key to authorize
        #[arg(short = 'k', long, env = "SSH_PUBLIC_KEY")]
        public_key: Option<String>,
    },

    /// Provision, then run sshd in the background and hg serve in the foreground
    Start {
        /// Port for hg serve
        #[arg(short = 'p', long, env = "HG_SERVE_PORT", default_value_t = DEFAULT_HG_SERVE_PORT)]
        hg_serve_port: u16,

        /// Port for sshd
        #[arg(short = 'q', long, env = "SSHD_PORT", default_value_t = DEFAULT_SSHD_PORT)]
        sshd_port: u16,

        /// Skip installing the SSH public key
        #[arg(short = 'r', long)]
        no_ssh_auth: bool,

        /// Do not start sshd
        #[arg(short = 's', long)]
        no_sshd: bool,

        /// Skip repository provisioning
        #[arg(short = 't', long)]
        no_init: bool,

        /// Public key installed before launching
        #[arg(long, env = "SSH_PUBLIC_KEY", hide = true)]
        public_key: Option<String>,
    },
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl CliApp {
    pub fn new() -> Self {
        Self { cli: Cli::parse() }
    }

    pub fn from_cli(cli: Cli) -> Self {
        Self { cli }
    }

    pub fn verbose(&self) -> bool {
        self.cli.verbose
    }

    pub async fn run(self) -> anyhow::Result<()> {
        colored::control::set_override(!self.cli.no_color);

        match self.handle_command().await {
            Ok(_) => Ok(()),
            Err(e) => {
                eprintln!("{} {:#}", "Error:".red().bold(), e);
                exit(1);
            }
        }
    }

    async fn handle_command(&self) -> anyhow::Result<()> {
        match &self.cli.command {
            Commands::Init => self.handle_init_command().await,
            Commands::AuthorizeSsh { public_key } => {
                self.handle_authorize_ssh_command(public_key.clone()).await
            }
            Commands::Start {
                hg_serve_port,
                sshd_port,
                no_ssh_auth,
                no_sshd,
                no_init,
                public_key,
            } => {
                let steps = StartSteps {
                    ssh_auth: !no_ssh_auth,
                    sshd: !no_sshd,
                    init: !no_init,
                };
                self.handle_start_command(*hg_serve_port, *sshd_port, steps, public_key.clone())
                    .await
            }
        }
    }

    async fn handle_init_command(&self) -> anyhow::Result<()> {
        use crate::presentation::cli::commands::init::InitCommand;

        InitCommand::new(self.init_config()?).execute().await
    }

    async fn handle_authorize_ssh_command(&self, public_key: Option<String>) -> anyhow::Result<()> {
        use crate::presentation::cli::commands::authorize_ssh::AuthorizeSshCommand;

        let config = AuthorizeSshConfig::new(self.authorized_keys_path()?).with_public_key(public_key);
        AuthorizeSshCommand::new(config).execute().await
    }

    async fn handle_start_command(
        &self,
        hg_serve_port: u16,
        sshd_port: u16,
        steps: StartSteps,
        public_key: Option<String>,
    ) -> anyhow::Result<()> {
        use crate::presentation::cli::commands::start::StartCommand;

        let authorize_ssh =
            AuthorizeSshConfig::new(self.authorized_keys_path()?).with_public_key(public_key);
        let config = StartServersConfig::new(self.init_config()?, authorize_ssh)
            .with_ports(hg_serve_port, sshd_port)
            .with_steps(steps.init, steps.ssh_auth, steps.sshd);

        StartCommand::new(config).execute().await
    }

    /// Provisioning settings with the base directory made absolute, since
    /// `hg serve --cwd` changes directory before reading `--web-conf`
    fn init_config(&self) -> anyhow::Result<InitRepositoriesConfig> {
        Ok(InitRepositoriesConfig::new(absolute_path(&self.cli.base_dir)?)
            .with_phabricator_uri(&self.cli.phabricator_uri)
            .with_arc_config(self.cli.arcconfig))
    }

    fn authorized_keys_path(&self) -> anyhow::Result<PathBuf> {
        match &self.cli.authorized_keys {
            Some(path) => Ok(path.clone()),
            None => Ok(AuthorizedKeysStore::default_path()?),
        }
    }
}

/// Which optional `start` steps run
struct StartSteps {
    ssh_auth: bool,
    sshd: bool,
    init: bool,
}

/// Resolve `path` against the current directory when it is relative
fn absolute_path(path: &Path) -> anyhow::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    Ok(cwd.join(path))
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_truthy() {
        for value in ["y", "1", "true", "TRUE", "Y", " true "] {
            assert_eq!(parse_truthy(value), Ok(true), "{value}");
        }
        for value in ["", "n", "0", "false", "yes", "on"] {
            assert_eq!(parse_truthy(value), Ok(false), "{value}");
        }
    }

    #[test]
    fn test_start_flags() {
        let cli = Cli::try_parse_from([
            "hgdev", "start", "-p", "9000", "-q", "2222", "-r", "-s", "-t",
        ])
        .unwrap();

        match cli.command {
            Commands::Start {
                hg_serve_port,
                sshd_port,
                no_ssh_auth,
                no_sshd,
                no_init,
                ..
            } => {
                assert_eq!(hg_serve_port, 9000);
                assert_eq!(sshd_port, 2222);
                assert!(no_ssh_auth && no_sshd && no_init);
            }
            _ => panic!("expected start"),
        }
    }

    #[test]
    fn test_start_accepts_public_key() {
        let cli = Cli::try_parse_from(["hgdev", "start", "--public-key", "ssh-ed25519 AAAA"]).unwrap();
        match cli.command {
            Commands::Start { public_key, .. } => {
                assert_eq!(public_key.as_deref(), Some("ssh-ed25519 AAAA"));
            }
            _ => panic!("expected start"),
        }
    }

    #[test]
    fn test_absolute_path_resolves_relative_against_cwd() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(absolute_path(Path::new("repos")).unwrap(), cwd.join("repos"));
        assert_eq!(
            absolute_path(Path::new("/srv/repos")).unwrap(),
            PathBuf::from("/srv/repos")
        );
    }

    #[test]
    fn test_authorize_ssh_flag() {
        let cli = Cli::try_parse_from(["hgdev", "authorize-ssh", "-k", "ssh-ed25519 AAAA"]).unwrap();
        match cli.command {
            Commands::AuthorizeSsh { public_key } => {
                assert_eq!(public_key.as_deref(), Some("ssh-ed25519 AAAA"));
            }
            _ => panic!("expected authorize-ssh"),
        }
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "hgdev",
            "init",
            "--base-dir",
            "/tmp/repos",
            "--arcconfig",
            "y",
            "--phabricator-uri",
            "https://phab.example",
        ])
        .unwrap();

        assert_eq!(cli.base_dir, PathBuf::from("/tmp/repos"));
        assert!(cli.arcconfig);
        assert_eq!(cli.phabricator_uri, "https://phab.example");
    }
}
