//! Pipeline orchestrator - sequences the fixed stage graph

use crate::backend::StageBackend;
use crate::core::{
    context::StageContext,
    error::PipelineError,
    stage::{Profile, StageSpec, STAGES},
    Target,
};
use crate::source;
use std::path::Path;
use tracing::{debug, info};
use uuid::Uuid;

/// The finalized deliverable of a run: a plain-text, ready-to-send email
/// body with the contact block appended by the terminal stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    body: String,
}

impl Artifact {
    /// Wrap already-produced text as an artifact. Normal artifacts come out
    /// of [`EmailPipeline::run`]; this exists for callers replaying
    /// persisted output and for tests.
    pub fn from_text(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.body
    }

    pub fn into_string(self) -> String {
        self.body
    }
}

/// Orchestrates one fixed five-stage generation pipeline per target.
///
/// The stage graph is defined at construction and reused across runs; each
/// `run` owns its own [`StageContext`], so independent targets can be
/// pipelined concurrently over a shared `&EmailPipeline`.
pub struct EmailPipeline<B> {
    backend: B,
    profile: Profile,
    stages: &'static [StageSpec],
}

impl<B: StageBackend> EmailPipeline<B> {
    pub fn new(backend: B, profile: Profile) -> Self {
        let pipeline = Self {
            backend,
            profile,
            stages: &STAGES,
        };
        // The static graph declares each stage after all of its
        // dependencies; a broken declaration is a programming error.
        assert!(
            pipeline.declaration_is_topological(),
            "stage graph declaration order is not topological"
        );
        pipeline
    }

    /// Access the wrapped backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn declaration_is_topological(&self) -> bool {
        let mut seen = Vec::with_capacity(self.stages.len());
        for spec in self.stages {
            if spec.depends_on.iter().any(|dep| !seen.contains(dep)) {
                return false;
            }
            seen.push(spec.id);
        }
        true
    }

    /// Execute the full pipeline for one target.
    ///
    /// The reference document is acquired first; if it is missing or not
    /// plain text the run aborts with zero stages executed. Stages then run
    /// strictly in dependency order, each receiving the verbatim output of
    /// its declared dependencies. The first backend failure aborts the
    /// remaining stages and discards all prior results - no partial
    /// artifact is ever returned.
    pub async fn run(
        &self,
        target: &Target,
        reference_path: &Path,
    ) -> Result<Artifact, PipelineError> {
        let reference = source::read(reference_path)?;

        let run_id = Uuid::new_v4();
        info!(
            "Starting pipeline run {} for {} ({})",
            run_id, target.company, target.recipient_email
        );

        let mut ctx = StageContext::new();

        for spec in self.stages {
            let dep_block = self.render_dependencies(spec, &ctx)?;
            let instruction = spec.instruction(target, &self.profile, &dep_block);
            let reference_doc = spec.needs_reference.then_some(reference.as_str());

            debug!(
                "Run {}: invoking stage {} ({} instruction bytes)",
                run_id,
                spec.id,
                instruction.len()
            );

            let output = self
                .backend
                .invoke(spec.role, &instruction, reference_doc)
                .await
                .map_err(|source| PipelineError::StageExecutionFailed {
                    stage: spec.id,
                    source,
                })?;

            info!(
                "Run {}: stage {} produced {} bytes",
                run_id,
                spec.id,
                output.len()
            );
            ctx.insert(spec.id, output);
        }

        // Terminal stage output is the artifact.
        let terminal = self.stages[self.stages.len() - 1].id;
        let body = ctx.get(terminal)?.to_string();

        info!("Run {} completed, {} stages executed", run_id, ctx.len());
        Ok(Artifact { body })
    }

    /// Concatenate the declared dependencies' outputs, verbatim and in
    /// declaration order.
    fn render_dependencies(
        &self,
        spec: &StageSpec,
        ctx: &StageContext,
    ) -> Result<String, PipelineError> {
        let mut block = String::new();
        for dep in spec.depends_on {
            let output = ctx.get(*dep)?;
            block.push_str(&format!("--- {dep} output ---\n{output}\n\n"));
        }
        Ok(block)
    }
}
