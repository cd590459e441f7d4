//! Core domain models for mailsmith
//!
//! This module defines the staged pipeline: targets, the fixed stage
//! graph, the run-scoped context, and the orchestrator that walks them.

pub mod context;
pub mod error;
pub mod pipeline;
pub mod stage;
pub mod target;

pub use context::StageContext;
pub use error::PipelineError;
pub use pipeline::{Artifact, EmailPipeline};
pub use stage::{Profile, StageId, StageSpec, CLEAN_OUTPUT_DIRECTIVE, STAGES};
pub use target::Target;
