use anyhow::Result;
use colored::Colorize;

use crate::application::use_cases::init_repositories::{
    InitRepositoriesConfig, InitRepositoriesResult, InitRepositoriesUseCase,
};

/// Provision the development repositories
pub struct InitCommand {
    config: InitRepositoriesConfig,
}

impl InitCommand {
    pub fn new(config: InitRepositoriesConfig) -> Self {
        Self { config }
    }

    /// Execute the init command
    pub async fn execute(&self) -> Result<()> {
        println!(
            "{} Provisioning repositories in {}",
            "::".blue().bold(),
            self.config.base_dir.display()
        );

        let use_case = InitRepositoriesUseCase::new(self.config.clone());
        let result = use_case.execute().await?;
        print_summary(&result);

        Ok(())
    }
}

fn print_summary(result: &InitRepositoriesResult) {
    for repository in &result.repositories {
        let marker = if repository.failed_steps.is_empty() {
            "✓".green().bold()
        } else {
            "⚠".yellow().bold()
        };
        print!("{} {}", marker, repository.name.bold());
        if repository.arc_config_path.is_some() {
            print!(" {}", "(.arcconfig)".dimmed());
        }
        println!();
    }

    println!("📁 hgweb config: {}", result.web_config_path.display());

    let failed = result.failed_step_count();
    if failed > 0 {
        println!(
            "{} {} hg step(s) exited unsuccessfully; see the log above",
            "⚠".yellow().bold(),
            failed
        );
    }
}
