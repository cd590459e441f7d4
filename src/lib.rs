//! mailsmith - staged generation pipeline for personalized application emails

pub mod artifact;
pub mod backend;
pub mod batch;
pub mod cli;
pub mod config;
pub mod core;
pub mod source;
pub mod transport;

// Re-export commonly used types
pub use artifact::ArtifactWriter;
pub use backend::{BackendError, GeminiBackend, GeminiConfig, SearchAugmented, SerperClient, StageBackend};
pub use batch::{BatchDriver, BatchReport, RunStatus, RunSummary};
pub use config::{AppConfig, Secrets};
pub use core::{Artifact, EmailPipeline, PipelineError, Profile, StageContext, StageId, Target};
pub use source::SourceError;
pub use transport::{Mailer, SmtpConfig, TransportError};
