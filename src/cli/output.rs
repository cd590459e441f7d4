//! CLI output formatting

use crate::batch::{RunStatus, RunSummary};
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "!");
pub static ENVELOPE: Emoji<'_, '_> = Emoji("📧 ", "> ");

/// Create a progress bar for a batch run
pub fn create_progress_bar(total: usize) -> ProgressBar {
    let progress = ProgressBar::new(total as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    progress.enable_steady_tick(Duration::from_millis(100));
    progress
}

/// Format a run status for display
pub fn format_status(status: RunStatus) -> String {
    match status {
        RunStatus::Generated => style("GENERATED").green().to_string(),
        RunStatus::Delivered => style("DELIVERED").green().to_string(),
        RunStatus::DeliveryFailed => style("DELIVERY FAILED").yellow().to_string(),
        RunStatus::Failed => style("FAILED").red().to_string(),
    }
}

/// Format one run summary as a report line
pub fn format_run_summary(summary: &RunSummary) -> String {
    let icon = match summary.status {
        RunStatus::Generated | RunStatus::Delivered => CHECK,
        RunStatus::DeliveryFailed => WARN,
        RunStatus::Failed => CROSS,
    };

    let mut line = format!(
        "{} {} - {} - {}",
        icon,
        style(&summary.run_id.to_string()[..8]).dim(),
        style(&summary.company).bold(),
        format_status(summary.status)
    );

    if let Some(path) = &summary.artifact_path {
        line.push_str(&format!(" - {}", style(path.display()).dim()));
    }
    if let Some(error) = &summary.error {
        line.push_str(&format!("\n    {}", style(error).red()));
    }

    line
}
