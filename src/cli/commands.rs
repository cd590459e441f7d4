//! CLI command definitions

use clap::Args;

/// Generate an email for a single target
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Company being applied to
    #[arg(long)]
    pub company: String,

    /// Recipient's name
    #[arg(long)]
    pub name: String,

    /// Recipient's email address
    #[arg(long)]
    pub email: String,

    /// Override the resume path from the config
    #[arg(long)]
    pub resume: Option<String>,

    /// Also dispatch the generated email
    #[arg(long)]
    pub send: bool,
}

/// Generate (and optionally send) emails for every target in a CSV
#[derive(Debug, Args, Clone)]
pub struct BatchCommand {
    /// Path to the target CSV (Name, Email, Company headers)
    #[arg(short, long)]
    pub file: String,

    /// Generate and persist only; skip SMTP dispatch
    #[arg(long)]
    pub dry_run: bool,

    /// Print the batch report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Validate the configuration file
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Output the parsed configuration as JSON
    #[arg(long)]
    pub json: bool,
}
