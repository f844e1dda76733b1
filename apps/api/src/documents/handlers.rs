//! Axum route handlers for document analysis.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, Query, State},
    response::Html,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::documents::pipeline::{analyze_document, SkillReport};
use crate::errors::AppError;
use crate::state::AppState;

const UPLOAD_PAGE: &str = include_str!("../../templates/upload.html");

#[derive(Debug, Deserialize)]
pub struct ParseUrlQuery {
    pub pdf_url: Option<String>,
}

/// POST /parse_resume
///
/// Multipart upload with a `file` part holding a `.pdf`.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SkillReport>, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::Validation(e.body_text()))?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        upload = Some((filename, bytes));
        break;
    }

    let (filename, bytes) =
        upload.ok_or_else(|| AppError::Validation("No file part in the request.".to_string()))?;
    if !has_pdf_extension(&filename) {
        return Err(AppError::Validation(
            "Please upload a valid PDF file.".to_string(),
        ));
    }
    if bytes.is_empty() {
        return Err(AppError::InputMissing("The uploaded file is empty.".to_string()));
    }

    info!(filename = %filename, size = bytes.len(), "Received document upload");
    let report = analyze_document(bytes, state.vocabulary.clone()).await?;
    Ok(Json(report))
}

/// GET /parse_resume_url?pdf_url=...
///
/// Fetches the document from an HTTP(S) URL or a path under the document root.
pub async fn handle_parse_resume_url(
    State(state): State<AppState>,
    Query(params): Query<ParseUrlQuery>,
) -> Result<Json<SkillReport>, AppError> {
    let reference = params
        .pdf_url
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or_else(|| AppError::InputMissing("No PDF URL provided.".to_string()))?;

    info!(reference, "Fetching document by reference");
    let bytes = state.fetcher.fetch(reference).await?;
    if bytes.is_empty() {
        return Err(AppError::InputMissing(
            "The referenced document is empty.".to_string(),
        ));
    }

    let report = analyze_document(bytes, state.vocabulary.clone()).await?;
    Ok(Json(report))
}

/// GET /upload
pub async fn handle_upload_page() -> Html<&'static str> {
    Html(UPLOAD_PAGE)
}

fn has_pdf_extension(filename: &str) -> bool {
    !filename.is_empty() && filename.to_ascii_lowercase().ends_with(".pdf")
}
