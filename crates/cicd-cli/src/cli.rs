//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Serverless CI/CD - Generate pipeline resources for a service
#[derive(Parser, Debug)]
#[command(name = "cicd")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for rendered documents
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl From<OutputFormat> for cicd_core::Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Yaml => Self::Yaml,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the CI/CD resource document for a service
    ///
    /// Examples:
    ///   cicd generate serverless.yml
    ///   cicd generate serverless.yml --stage prod --format json
    ///   cicd generate serverless.yml --checksum
    Generate {
        /// Service description (.yml, .yaml or .json)
        file: PathBuf,

        /// Stage to generate for (defaults to the stage in the file)
        #[arg(short, long, env = "CICD_STAGE")]
        stage: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,

        /// Print the SHA-256 of the rendered document instead of the document
        #[arg(long)]
        checksum: bool,
    },

    /// Run the package hook and print the merged resources block
    Package {
        /// Service description (.yml, .yaml or .json)
        file: PathBuf,

        /// Stage to package (defaults to the stage in the file)
        #[arg(short, long, env = "CICD_STAGE")]
        stage: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },

    /// List lifecycle events and the ones the CI/CD plugin handles
    Events,
}
