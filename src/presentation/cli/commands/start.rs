use anyhow::Result;
use colored::Colorize;

use crate::application::use_cases::start_servers::{StartServersConfig, StartServersUseCase};

/// Provision, then run the daemons
pub struct StartCommand {
    config: StartServersConfig,
}

impl StartCommand {
    pub fn new(config: StartServersConfig) -> Self {
        Self { config }
    }

    /// Execute the start command; returns once hg serve exits
    pub async fn execute(&self) -> Result<()> {
        println!(
            "{} Serving {} on port {}",
            "::".blue().bold(),
            self.config.base_dir().display(),
            self.config.hg_serve_port
        );

        let use_case = StartServersUseCase::new(self.config.clone());
        let result = use_case.execute().await?;

        println!("{} hg serve stopped ({})", "::".blue().bold(), result.hg_serve_status);
        Ok(())
    }
}
