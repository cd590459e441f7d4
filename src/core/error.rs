//! Pipeline error taxonomy

use crate::backend::BackendError;
use crate::core::stage::StageId;
use crate::source::SourceError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures a pipeline run can surface to its caller.
///
/// All variants are run-scoped and never retried by the pipeline itself;
/// recovery policy (retry, skip, abort the batch) belongs to the caller.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Reference document missing, unreadable, or empty. No stage executed.
    #[error("reference document unavailable: {0}")]
    SourceUnavailable(#[source] SourceError),

    /// Reference document is not a plain-text file. No stage executed.
    #[error("unsupported reference document: {0}")]
    UnsupportedSourceKind(#[source] SourceError),

    /// A backend invocation failed; later stages never ran and no artifact
    /// was produced.
    #[error("stage {stage} failed: {source}")]
    StageExecutionFailed {
        stage: StageId,
        #[source]
        source: BackendError,
    },

    /// A stage's output was requested before that stage executed. Cannot
    /// occur in the fixed linear graph.
    #[error("output of stage {stage} requested before it executed")]
    DependencyNotReady { stage: StageId },

    /// The finished artifact could not be written.
    #[error("could not persist artifact to {path}: {source}")]
    ArtifactPersistenceFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<SourceError> for PipelineError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::WrongKind { .. } => PipelineError::UnsupportedSourceKind(err),
            _ => PipelineError::SourceUnavailable(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_kind_maps_to_unsupported_source() {
        let err: PipelineError = SourceError::WrongKind {
            path: PathBuf::from("resume.pdf"),
        }
        .into();
        assert!(matches!(err, PipelineError::UnsupportedSourceKind(_)));
    }

    #[test]
    fn test_not_found_maps_to_source_unavailable() {
        let err: PipelineError = SourceError::NotFound {
            path: PathBuf::from("missing.txt"),
        }
        .into();
        assert!(matches!(err, PipelineError::SourceUnavailable(_)));
    }

    #[test]
    fn test_stage_failure_names_the_stage() {
        let err = PipelineError::StageExecutionFailed {
            stage: StageId::Extraction,
            source: BackendError::Api("quota exceeded".to_string()),
        };
        assert!(err.to_string().contains("Extraction"));
    }
}
