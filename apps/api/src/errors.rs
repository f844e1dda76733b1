use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::documents::extract::DecodeError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// No document bytes could be obtained from the request.
    #[error("Input missing: {0}")]
    InputMissing(String),

    #[error("No text could be extracted from the PDF.")]
    EmptyExtraction,

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InputMissing(_) | AppError::EmptyExtraction => {
                StatusCode::BAD_REQUEST
            }
            AppError::Decode(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::InputMissing(_) => "INPUT_MISSING",
            AppError::EmptyExtraction => "EMPTY_EXTRACTION",
            AppError::Decode(_) => "DECODE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let message = match &self {
            AppError::Validation(msg) | AppError::InputMissing(msg) => msg.clone(),
            AppError::EmptyExtraction => self.to_string(),
            AppError::Decode(e) => {
                tracing::error!("Decode error: {e}");
                e.to_string()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                e.to_string()
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
