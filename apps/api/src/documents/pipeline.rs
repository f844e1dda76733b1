//! Extraction + matching for a single document.

use std::sync::Arc;

use anyhow::anyhow;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::documents::extract::extract_text;
use crate::errors::AppError;
use crate::skills::{extract_skills, Vocabulary};

/// Response body for both parse endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillReport {
    /// Matched vocabulary terms, sorted.
    pub skills: Vec<String>,
}

/// Decodes `bytes` and matches the text against `vocabulary`.
///
/// Runs on the blocking pool since decoding a large PDF is CPU-bound.
/// The extracted text is dropped before this returns.
pub async fn analyze_document(
    bytes: Bytes,
    vocabulary: Arc<Vocabulary>,
) -> Result<SkillReport, AppError> {
    let size = bytes.len();
    tokio::task::spawn_blocking(move || analyze_blocking(&bytes, &vocabulary))
        .await
        .map_err(|e| AppError::Internal(anyhow!("Document analysis task failed: {e}")))?
        .inspect(|report| info!(size, skills = report.skills.len(), "Document analyzed"))
}

fn analyze_blocking(bytes: &[u8], vocabulary: &Vocabulary) -> Result<SkillReport, AppError> {
    let text = extract_text(bytes)?;
    debug!(chars = text.len(), "Extracted document text");

    if text.is_empty() {
        return Err(AppError::EmptyExtraction);
    }

    Ok(SkillReport {
        skills: extract_skills(&text, vocabulary),
    })
}
