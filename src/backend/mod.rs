//! Stage backend - the capability that turns an instruction into text

pub mod gemini;
pub mod search;

use async_trait::async_trait;
use thiserror::Error;

pub use gemini::{GeminiBackend, GeminiConfig};
pub use search::{SearchAugmented, SerperClient};

/// Error types for backend invocations
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("API error: {0}")]
    Api(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend returned no text")]
    EmptyResponse,

    #[error("internal error: {0}")]
    Internal(String),
}

/// Trait for stage execution backends.
///
/// A backend is stateless from the pipeline's viewpoint: everything a stage
/// needs arrives through `role`, `instruction`, and the optional reference
/// document. The real backend is non-deterministic generative text
/// production; callers must not assume exact output.
#[async_trait]
pub trait StageBackend: Send + Sync {
    /// Produce free-text output for one stage.
    async fn invoke(
        &self,
        role: &str,
        instruction: &str,
        reference: Option<&str>,
    ) -> Result<String, BackendError>;
}

#[async_trait]
impl StageBackend for Box<dyn StageBackend> {
    async fn invoke(
        &self,
        role: &str,
        instruction: &str,
        reference: Option<&str>,
    ) -> Result<String, BackendError> {
        (**self).invoke(role, instruction, reference).await
    }
}
