//! Reference document reader

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures while acquiring the reference document. Any of these abort a
/// pipeline run before its first stage executes.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("only plain-text (.txt) files are supported: {path}")]
    WrongKind { path: PathBuf },

    #[error("could not read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file is empty: {path}")]
    Empty { path: PathBuf },
}

/// Load the reference document, validating that it exists, is a plain-text
/// file, and decodes to non-empty UTF-8. One-shot, synchronous.
pub fn read(path: &Path) -> Result<String, SourceError> {
    if !path.exists() {
        return Err(SourceError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let is_txt = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
    if !is_txt {
        return Err(SourceError::WrongKind {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| SourceError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    if content.trim().is_empty() {
        return Err(SourceError::Empty {
            path: path.to_path_buf(),
        });
    }

    Ok(content)
}
