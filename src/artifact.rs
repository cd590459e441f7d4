//! Artifact writer - persists finished emails under the output directory

use crate::core::{Artifact, PipelineError, Target};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::info;

fn whitespace() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Writes artifacts as named files, one per target company.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    output_dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Filename derived from the company: lower-cased, whitespace runs
    /// replaced with underscores. "Acme Corp" becomes `email_acme_corp.txt`.
    pub fn derive_filename(company: &str) -> String {
        let slug = whitespace().replace_all(company.trim(), "_").to_lowercase();
        format!("email_{slug}.txt")
    }

    pub fn path_for(&self, target: &Target) -> PathBuf {
        self.output_dir.join(Self::derive_filename(&target.company))
    }

    /// Persist the artifact, creating the output directory if absent and
    /// overwriting any previous file of the same derived name.
    pub fn write(&self, target: &Target, artifact: &Artifact) -> Result<PathBuf, PipelineError> {
        let path = self.path_for(target);

        std::fs::create_dir_all(&self.output_dir).map_err(|source| {
            PipelineError::ArtifactPersistenceFailed {
                path: path.clone(),
                source,
            }
        })?;

        std::fs::write(&path, artifact.as_str()).map_err(|source| {
            PipelineError::ArtifactPersistenceFailed {
                path: path.clone(),
                source,
            }
        })?;

        info!("Artifact written to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Target;

    fn artifact(text: &str) -> Artifact {
        // Artifacts are normally produced by a pipeline run; tests build
        // them through the same public surface.
        Artifact::from_text(text)
    }

    #[test]
    fn test_filename_derivation() {
        assert_eq!(ArtifactWriter::derive_filename("Acme Corp"), "email_acme_corp.txt");
        assert_eq!(
            ArtifactWriter::derive_filename("Deep  Mind Labs"),
            "email_deep_mind_labs.txt"
        );
        assert_eq!(ArtifactWriter::derive_filename("OpenAI"), "email_openai.txt");
    }

    #[test]
    fn test_write_creates_directory_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ArtifactWriter::new(dir.path().join("generated"));
        let target = Target::new("Acme Corp", "Jordan", "jordan@acme.example");

        let path = writer.write(&target, &artifact("first draft")).unwrap();
        assert!(path.ends_with("email_acme_corp.txt"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first draft");

        // Same target overwrites, no versioning.
        writer.write(&target, &artifact("second draft")).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second draft");
    }

    #[test]
    fn test_unwritable_destination_reports_persistence_failure() {
        let dir = tempfile::tempdir().unwrap();
        // A file where the output directory should be.
        let blocked = dir.path().join("blocked");
        std::fs::write(&blocked, "file, not dir").unwrap();

        let writer = ArtifactWriter::new(&blocked);
        let target = Target::new("Acme", "J", "j@a.example");
        let err = writer.write(&target, &artifact("body")).unwrap_err();
        assert!(matches!(err, PipelineError::ArtifactPersistenceFailed { .. }));
    }
}
