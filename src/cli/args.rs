//! CLI argument structures

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Run the waffles configuration management tool against a host
#[derive(Parser, Debug)]
#[command(name = "waffles-provisioner")]
#[command(about = "waffles-provisioner - Provision hosts with waffles", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a resource configuration file without running anything
    Validate {
        /// Resource configuration (TOML, YAML or JSON)
        file: PathBuf,
    },

    /// Run waffles against the host described by a resource configuration
    Apply {
        /// Resource configuration (TOML, YAML or JSON)
        file: PathBuf,

        /// Override the target host
        #[arg(long)]
        host: Option<String>,

        /// Override the waffles role
        #[arg(long)]
        role: Option<String>,

        /// Override the waffles site directory
        #[arg(long, value_name = "DIR")]
        site_directory: Option<String>,

        /// Send waffles output to the log (stderr) instead of stdout
        #[arg(long)]
        log_output: bool,
    },
}
