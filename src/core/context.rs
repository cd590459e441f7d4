//! Stage context - the growing record of stage outputs within one run

use crate::core::error::PipelineError;
use crate::core::stage::StageId;

/// Ordered, append-only mapping from stage identifier to produced output.
///
/// One instance exists per pipeline run and is discarded when the run ends;
/// it is never shared across runs. Reading a stage that has not executed is
/// a contract violation surfaced as [`PipelineError::DependencyNotReady`];
/// unreachable in the fixed linear graph, kept as a safety contract for any
/// future non-linear topology.
#[derive(Debug, Default)]
pub struct StageContext {
    entries: Vec<(StageId, String)>,
}

impl StageContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a stage's output. Each stage executes once per run, so the
    /// identifier must not already be present.
    pub fn insert(&mut self, stage: StageId, output: String) {
        debug_assert!(
            !self.contains(stage),
            "stage {stage} produced output twice in one run"
        );
        self.entries.push((stage, output));
    }

    /// Look up a stage's output, failing if that stage has not executed yet.
    pub fn get(&self, stage: StageId) -> Result<&str, PipelineError> {
        self.entries
            .iter()
            .find(|(id, _)| *id == stage)
            .map(|(_, output)| output.as_str())
            .ok_or(PipelineError::DependencyNotReady { stage })
    }

    pub fn contains(&self, stage: StageId) -> bool {
        self.entries.iter().any(|(id, _)| *id == stage)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stage outputs in execution order.
    pub fn iter(&self) -> impl Iterator<Item = (StageId, &str)> {
        self.entries.iter().map(|(id, output)| (*id, output.as_str()))
    }
}
