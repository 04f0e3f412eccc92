//! Serverless CI/CD CLI
//!
//! A stand-in host that loads a service description, fires the package hook,
//! and prints the generated resources.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose)
        .map_err(|e| CliError::user(format!("Failed to set up logging: {}", e)))?;
    tracing::debug!("Verbose mode enabled");

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!("{} Serverless CI/CD CLI", "cicd".green().bold());
            println!();
            println!("Run {} for available commands.", "cicd --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Generate {
            file,
            stage,
            format,
            checksum,
        } => commands::run_generate(&file, stage.as_deref(), format.into(), checksum),
        Commands::Package {
            file,
            stage,
            format,
        } => commands::run_package(&file, stage.as_deref(), format.into()),
        Commands::Events => commands::run_events(),
    }
}
