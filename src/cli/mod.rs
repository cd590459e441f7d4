//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{BatchCommand, RunCommand, ValidateCommand};
use std::ffi::OsString;

/// Staged email-generation pipeline for job applications
#[derive(Debug, Parser, Clone)]
#[command(name = "mailsmith")]
#[command(version = "0.1.0")]
#[command(about = "Drafts and sends personalized application emails", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "mailsmith.yaml")]
    pub config: String,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Generate an email for a single target
    Run(RunCommand),

    /// Generate (and optionally send) emails for every target in a CSV
    Batch(BatchCommand),

    /// Validate the configuration file
    Validate(ValidateCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_command_parsing() {
        let cli = Cli::try_parse_from([
            "mailsmith",
            "run",
            "--company",
            "Acme Corp",
            "--name",
            "Jordan Lee",
            "--email",
            "jordan@acme.example",
        ])
        .unwrap();

        match cli.command {
            Command::Run(cmd) => {
                assert_eq!(cmd.company, "Acme Corp");
                assert_eq!(cmd.name, "Jordan Lee");
                assert!(!cmd.send);
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_batch_defaults() {
        let cli =
            Cli::try_parse_from(["mailsmith", "batch", "--file", "targets.csv"]).unwrap();
        match cli.command {
            Command::Batch(cmd) => {
                assert_eq!(cmd.file, "targets.csv");
                assert!(!cmd.dry_run);
                assert!(!cmd.json);
            }
            _ => panic!("expected batch command"),
        }
        assert_eq!(cli.config, "mailsmith.yaml");
    }
}
