//! Batch driver - iterates a CSV of targets through the pipeline

use crate::artifact::ArtifactWriter;
use crate::backend::StageBackend;
use crate::core::{EmailPipeline, Target};
use crate::transport::Mailer;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Errors loading the target list. Per-record pipeline failures are not
/// errors at this level; they land in the summaries instead.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("target list not found: {path}")]
    NotFound { path: PathBuf },

    #[error("could not parse target list: {0}")]
    Csv(#[from] csv::Error),
}

/// One CSV row of the target list.
#[derive(Debug, Deserialize)]
struct TargetRecord {
    #[serde(rename = "Name")]
    name: String,

    #[serde(rename = "Email")]
    email: String,

    #[serde(rename = "Company")]
    company: String,
}

impl From<TargetRecord> for Target {
    fn from(record: TargetRecord) -> Self {
        Target::new(record.company, record.name, record.email)
    }
}

/// Load all targets from a CSV file with `Name`, `Email`, `Company` headers.
pub fn load_targets(path: &Path) -> Result<Vec<Target>, BatchError> {
    if !path.exists() {
        return Err(BatchError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut targets = Vec::new();
    for record in reader.deserialize::<TargetRecord>() {
        targets.push(record?.into());
    }
    Ok(targets)
}

/// Terminal state of one record's processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Artifact produced and written; dispatch was not requested
    Generated,
    /// Artifact produced, written, and delivered
    Delivered,
    /// Artifact produced and written, but dispatch failed
    DeliveryFailed,
    /// No artifact: the pipeline or persistence failed
    Failed,
}

/// Outcome of one record, kept for the end-of-batch report.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub company: String,
    pub recipient_email: String,
    pub status: RunStatus,
    pub artifact_path: Option<PathBuf>,
    pub error: Option<String>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

/// Aggregate of a whole batch run.
#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub summaries: Vec<RunSummary>,
}

impl BatchReport {
    pub fn new(summaries: Vec<RunSummary>) -> Self {
        Self { summaries }
    }

    /// Records that produced an artifact, delivered or not.
    pub fn generated(&self) -> usize {
        self.summaries
            .iter()
            .filter(|s| s.status != RunStatus::Failed)
            .count()
    }

    pub fn delivered(&self) -> usize {
        self.summaries
            .iter()
            .filter(|s| s.status == RunStatus::Delivered)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.summaries
            .iter()
            .filter(|s| s.status == RunStatus::Failed)
            .count()
    }
}

/// Drives the pipeline once per target: generate, persist, and optionally
/// dispatch. A record's failure never aborts the batch.
pub struct BatchDriver<'a, B> {
    pipeline: &'a EmailPipeline<B>,
    writer: &'a ArtifactWriter,
    mailer: Option<&'a Mailer>,
    reference_path: &'a Path,
    attachment_path: &'a Path,
    subject_template: &'a str,
}

impl<'a, B: StageBackend> BatchDriver<'a, B> {
    pub fn new(
        pipeline: &'a EmailPipeline<B>,
        writer: &'a ArtifactWriter,
        mailer: Option<&'a Mailer>,
        reference_path: &'a Path,
        attachment_path: &'a Path,
        subject_template: &'a str,
    ) -> Self {
        Self {
            pipeline,
            writer,
            mailer,
            reference_path,
            attachment_path,
            subject_template,
        }
    }

    /// Process one target end to end and report what happened.
    pub async fn process(&self, target: &Target) -> RunSummary {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();

        let artifact = match self.pipeline.run(target, self.reference_path).await {
            Ok(artifact) => artifact,
            Err(err) => {
                error!("Generation failed for {}: {err}", target.company);
                return self.summary(run_id, target, RunStatus::Failed, None, Some(err.to_string()), started_at);
            }
        };

        let artifact_path = match self.writer.write(target, &artifact) {
            Ok(path) => path,
            Err(err) => {
                error!("Persistence failed for {}: {err}", target.company);
                return self.summary(run_id, target, RunStatus::Failed, None, Some(err.to_string()), started_at);
            }
        };

        let Some(mailer) = self.mailer else {
            info!("Generated email for {} (dispatch skipped)", target.company);
            return self.summary(run_id, target, RunStatus::Generated, Some(artifact_path), None, started_at);
        };

        let subject = render_subject(self.subject_template, &target.company);
        match mailer.send(
            &target.recipient_email,
            &subject,
            artifact.as_str(),
            self.attachment_path,
        ) {
            Ok(()) => {
                info!("Delivered email for {}", target.company);
                self.summary(run_id, target, RunStatus::Delivered, Some(artifact_path), None, started_at)
            }
            Err(err) => {
                // Artifact stays on disk; only the delivery is reported.
                warn!("Delivery failed for {}: {err}", target.company);
                self.summary(
                    run_id,
                    target,
                    RunStatus::DeliveryFailed,
                    Some(artifact_path),
                    Some(err.to_string()),
                    started_at,
                )
            }
        }
    }

    fn summary(
        &self,
        run_id: Uuid,
        target: &Target,
        status: RunStatus,
        artifact_path: Option<PathBuf>,
        error: Option<String>,
        started_at: DateTime<Utc>,
    ) -> RunSummary {
        RunSummary {
            run_id,
            company: target.company.clone(),
            recipient_email: target.recipient_email.clone(),
            status,
            artifact_path,
            error,
            started_at,
            completed_at: Utc::now(),
        }
    }
}

/// Substitute `{{ company }}` in the subject template.
pub fn render_subject(template: &str, company: &str) -> String {
    template.replace("{{ company }}", company)
}
