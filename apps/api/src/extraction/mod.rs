//! Text extraction: turns an uploaded resume file into plain text.
//!
//! `AppState` holds an `Arc<dyn TextExtractor>`; the default is [`DocumentExtractor`].

pub mod formats;

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::extraction::formats::{extract_from_path, FileKind};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error("Text file is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("Document contains no extractable text")]
    Empty,

    #[error("Extraction worker failed: {0}")]
    Worker(String),
}

/// An uploaded resume that passed file-type gating.
#[derive(Debug, Clone)]
pub struct UploadedResume {
    /// Sanitized client filename.
    pub filename: String,
    pub kind: FileKind,
    pub data: Bytes,
}

#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Returns the trimmed plaintext of the document, never an empty string.
    async fn extract(&self, resume: &UploadedResume) -> Result<String, ExtractionError>;
}

/// Spools each upload to a temp file in the upload directory, parses it on the
/// blocking pool, and removes the file when done.
pub struct DocumentExtractor {
    upload_dir: PathBuf,
}

impl DocumentExtractor {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
        }
    }
}

#[async_trait]
impl TextExtractor for DocumentExtractor {
    async fn extract(&self, resume: &UploadedResume) -> Result<String, ExtractionError> {
        let upload_dir = self.upload_dir.clone();
        let kind = resume.kind;
        let data = resume.data.clone();

        // pdf-extract can panic on malformed input; a panic surfaces here as a JoinError.
        let text = tokio::task::spawn_blocking(move || extract_via_temp_file(&upload_dir, kind, &data))
            .await
            .map_err(|e| ExtractionError::Worker(e.to_string()))??;

        let text = text.trim();
        if text.is_empty() {
            return Err(ExtractionError::Empty);
        }

        tracing::debug!(
            "Extracted {} chars from {} upload",
            text.len(),
            kind.extension()
        );
        Ok(text.to_string())
    }
}

fn extract_via_temp_file(
    upload_dir: &Path,
    kind: FileKind,
    data: &[u8],
) -> Result<String, ExtractionError> {
    let mut file = tempfile::Builder::new()
        .prefix("resume-")
        .suffix(&format!(".{}", kind.extension()))
        .tempfile_in(upload_dir)?;
    file.write_all(data)?;
    file.flush()?;

    extract_from_path(kind, file.path())
}
