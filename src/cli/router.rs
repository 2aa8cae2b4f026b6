//! Command routing and execution

use anyhow::Result;

use crate::app::AppConfig;
use crate::cli::args::Commands;
use crate::cli::commands::*;

/// Execute a CLI command based on the parsed arguments
pub async fn execute_command(command: Commands, app: &AppConfig) -> Result<()> {
    match command {
        Commands::Validate { file } => run_validate_command(&app.resolve(&file)).await,
        Commands::Apply {
            file,
            host,
            role,
            site_directory,
            log_output,
        } => {
            let overrides = ApplyOverrides {
                host,
                role,
                site_directory,
            };
            let sink = if log_output {
                ApplySink::Log
            } else {
                ApplySink::Stdout
            };
            run_apply_command(&app.resolve(&file), overrides, sink).await
        }
    }
}
