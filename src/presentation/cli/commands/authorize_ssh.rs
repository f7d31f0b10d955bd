use anyhow::Result;
use colored::Colorize;

use crate::application::use_cases::authorize_ssh::{
    AuthorizeSshConfig, AuthorizeSshOutcome, AuthorizeSshUseCase,
};

/// Install the SSH public key
pub struct AuthorizeSshCommand {
    config: AuthorizeSshConfig,
}

impl AuthorizeSshCommand {
    pub fn new(config: AuthorizeSshConfig) -> Self {
        Self { config }
    }

    /// Execute the authorize-ssh command
    pub async fn execute(&self) -> Result<()> {
        let use_case = AuthorizeSshUseCase::new(self.config.clone());
        let outcome = use_case.execute().await?;
        print_outcome(&outcome);
        Ok(())
    }
}

fn print_outcome(outcome: &AuthorizeSshOutcome) {
    match outcome {
        AuthorizeSshOutcome::Authorized { path } => {
            println!("{} Authorized SSH key in {}", "✓".green().bold(), path.display());
        }
        AuthorizeSshOutcome::Skipped { .. } => {
            println!("{} No SSH public key given, nothing authorized", "⚠".yellow().bold());
        }
    }
}
