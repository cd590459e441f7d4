use anyhow::{Context, Result};
use mailsmith::artifact::ArtifactWriter;
use mailsmith::backend::{GeminiBackend, SearchAugmented, SerperClient, StageBackend};
use mailsmith::batch::{self, BatchDriver, BatchReport};
use mailsmith::cli::commands::{BatchCommand, RunCommand, ValidateCommand};
use mailsmith::cli::output::*;
use mailsmith::cli::{Cli, Command};
use mailsmith::config::{AppConfig, Secrets};
use mailsmith::core::{EmailPipeline, Target, STAGES};
use mailsmith::transport::Mailer;
use std::path::Path;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    match &cli.command {
        Command::Run(cmd) => run_single(cmd, &cli.config).await?,
        Command::Batch(cmd) => run_batch(cmd, &cli.config).await?,
        Command::Validate(cmd) => validate_config(cmd, &cli.config)?,
    }

    Ok(())
}

/// Build the stage backend: Gemini, wrapped with search augmentation for
/// the research role when a Serper key is available.
fn build_backend(config: &AppConfig, secrets: &Secrets) -> Result<Box<dyn StageBackend>> {
    let gemini = GeminiBackend::new(config.gemini_config(), secrets.gemini_api_key.clone())
        .context("Failed to build generation backend")?;

    match &secrets.serper_api_key {
        Some(key) => {
            let search = SerperClient::new(key.clone())
                .context("Failed to build search client")?;
            Ok(Box::new(SearchAugmented::new(
                gemini,
                search,
                STAGES[0].role,
            )))
        }
        None => Ok(Box::new(gemini)),
    }
}

fn build_mailer(config: &AppConfig, secrets: &Secrets) -> Result<Mailer> {
    let password = secrets
        .smtp_password
        .clone()
        .context("SMTP_PASSWORD is required to send emails")?;
    Ok(Mailer::new(config.smtp_config(), password))
}

async fn run_single(cmd: &RunCommand, config_path: &str) -> Result<()> {
    let config = AppConfig::from_file(config_path).context("Failed to load config")?;
    let secrets = Secrets::from_env()?;

    let backend = build_backend(&config, &secrets)?;
    let pipeline = EmailPipeline::new(backend, config.profile());
    let writer = ArtifactWriter::new(&config.output_dir);

    let target = Target::new(&cmd.company, &cmd.name, &cmd.email);
    let reference = cmd
        .resume
        .as_deref()
        .map(Path::new)
        .unwrap_or(&config.resume);

    println!(
        "{} Generating email for {} at {}",
        ENVELOPE,
        style(&target.recipient_name).bold(),
        style(&target.company).bold()
    );

    let artifact = match pipeline.run(&target, reference).await {
        Ok(artifact) => artifact,
        Err(err) => {
            println!("{} Generation {}", CROSS, style("failed").red());
            error!("{err}");
            std::process::exit(1);
        }
    };

    println!("\n{}\n", artifact.as_str());

    let path = writer.write(&target, &artifact)?;
    println!("{} Saved to {}", CHECK, style(path.display()).dim());

    if cmd.send {
        let mailer = build_mailer(&config, &secrets)?;
        let subject = batch::render_subject(&config.subject, &target.company);
        match mailer.send(
            &target.recipient_email,
            &subject,
            artifact.as_str(),
            config.attachment_path(),
        ) {
            Ok(()) => println!("{} Sent to {}", CHECK, style(&target.recipient_email).bold()),
            // The artifact is already on disk; delivery failure is reported
            // on its own.
            Err(err) => {
                println!("{} Delivery failed: {}", WARN, style(&err).red());
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

async fn run_batch(cmd: &BatchCommand, config_path: &str) -> Result<()> {
    let config = AppConfig::from_file(config_path).context("Failed to load config")?;
    let secrets = Secrets::from_env()?;

    let targets = batch::load_targets(Path::new(&cmd.file))
        .context("Failed to load target list")?;
    if targets.is_empty() {
        println!("{} No targets in {}", INFO, style(&cmd.file).bold());
        return Ok(());
    }

    println!(
        "{} Loaded {} targets from {}",
        INFO,
        style(targets.len()).cyan(),
        style(&cmd.file).bold()
    );

    let backend = build_backend(&config, &secrets)?;
    let pipeline = EmailPipeline::new(backend, config.profile());
    let writer = ArtifactWriter::new(&config.output_dir);

    let mailer = if cmd.dry_run {
        println!("{} Dry run: emails are generated but not sent", INFO);
        None
    } else {
        Some(build_mailer(&config, &secrets)?)
    };

    let driver = BatchDriver::new(
        &pipeline,
        &writer,
        mailer.as_ref(),
        &config.resume,
        config.attachment_path(),
        &config.subject,
    );

    let progress = create_progress_bar(targets.len());
    let mut summaries = Vec::with_capacity(targets.len());
    for target in &targets {
        progress.set_message(target.company.clone());
        summaries.push(driver.process(target).await);
        progress.inc(1);
    }
    progress.finish_and_clear();

    let report = BatchReport::new(summaries);
    println!();
    for summary in &report.summaries {
        println!("{}", format_run_summary(summary));
    }
    println!(
        "\n{} {} generated, {} delivered, {} failed",
        INFO,
        style(report.generated()).green(),
        style(report.delivered()).green(),
        style(report.failed()).red()
    );

    if cmd.json {
        println!("\n{}", serde_json::to_string_pretty(&report)?);
    }

    if report.generated() == 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn validate_config(cmd: &ValidateCommand, config_path: &str) -> Result<()> {
    println!("{} Validating configuration...", INFO);

    match AppConfig::from_file(config_path) {
        Ok(config) => {
            println!("{} Configuration is valid!", CHECK);
            println!("  Sender: {}", style(&config.sender).bold());
            println!("  Resume: {}", style(config.resume.display()).bold());
            println!(
                "  Output: {}",
                style(config.output_dir.display()).bold()
            );
            println!("  Model: {}", style(&config.backend.model).cyan());

            if cmd.json {
                let json = serde_json::to_string_pretty(&config)?;
                println!("\n{}", json);
            }
            Ok(())
        }
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(e).red());
            std::process::exit(1);
        }
    }
}
