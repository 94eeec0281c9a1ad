use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::classifier::dataset::DatasetError;
use crate::classifier::ClassifierError;
use crate::extraction::ExtractionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Model not trained")]
    ModelNotTrained,

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::Validation(format!("invalid multipart body: {e}"))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(e: tokio::task::JoinError) -> Self {
        AppError::Internal(anyhow::Error::new(e).context("background task failed"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::ModelNotTrained => (
                StatusCode::CONFLICT,
                "MODEL_NOT_TRAINED",
                "Model not trained. Train the model first via POST /api/v1/model/train".to_string(),
            ),
            AppError::Extraction(e) => (StatusCode::BAD_REQUEST, "EXTRACTION_ERROR", e.to_string()),
            AppError::Dataset(e @ DatasetError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "DATASET_NOT_FOUND", e.to_string())
            }
            AppError::Dataset(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "DATASET_ERROR",
                e.to_string(),
            ),
            AppError::Classifier(
                e @ (ClassifierError::Io(_)
                | ClassifierError::Serde(_)
                | ClassifierError::Corrupt(_)),
            ) => {
                tracing::error!("Model persistence error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "MODEL_STORAGE_ERROR",
                    "The model could not be saved or loaded".to_string(),
                )
            }
            AppError::Classifier(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "TRAINING_ERROR",
                e.to_string(),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
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

/// Rejects resume text that is too short to analyze.
pub fn require_resume_text(field: &str, text: &str) -> Result<(), AppError> {
    if text.trim().chars().count() < MIN_TEXT_CHARS {
        return Err(AppError::Validation(format!(
            "{field} must be at least {MIN_TEXT_CHARS} characters"
        )));
    }
    Ok(())
}

pub const MIN_TEXT_CHARS: usize = 10;

/// Decodes an optional JSON body. Only an empty or whitespace body falls back to the
/// defaults; anything else must parse.
pub fn optional_json<T>(body: &[u8]) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("invalid request body: {e}")))
}
