//! Axum route handlers for the domain classifier.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{body::Bytes, extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::classifier::dataset::load_dataset;
use crate::classifier::{DomainClassifier, DomainPrediction, TrainingOptions, TrainingReport};
use crate::errors::{optional_json, require_resume_text, AppError};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct TrainRequest {
    pub dataset_path: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct TrainResponse {
    pub status: &'static str,
    pub message: String,
    pub model_info: TrainingReport,
    /// False when `MODEL_PATH` is unset.
    pub persisted: bool,
}

#[derive(Debug, Serialize)]
pub struct ModelStatusResponse {
    pub trained: bool,
    pub domains: Vec<String>,
    pub total_domains: usize,
    pub accuracy: Option<f64>,
    pub trained_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub domain_prediction: DomainPrediction,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/model/train
///
/// Loads the labelled dataset, trains a fresh classifier off the async runtime and swaps
/// it in. The previous model keeps serving until training succeeds.
pub async fn handle_train(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TrainResponse>, AppError> {
    let request: TrainRequest = optional_json(&body)?;
    let dataset_path = request.dataset_path.or_else(|| state.config.dataset_path.clone());

    let classifier = Arc::new(train_classifier(dataset_path).await?);
    let persisted = persist(&state, classifier.clone()).await;
    let report = classifier.report().clone();

    *state.classifier.write().await = Some(classifier);

    Ok(Json(TrainResponse {
        status: "success",
        message: format!(
            "Model trained on {} resumes with {:.2}% accuracy",
            report.total_resumes,
            report.accuracy * 100.0
        ),
        model_info: report,
        persisted,
    }))
}

/// GET /api/v1/model/status
pub async fn handle_model_status(State(state): State<AppState>) -> Json<ModelStatusResponse> {
    let guard = state.classifier.read().await;
    let response = match guard.as_ref() {
        Some(classifier) => ModelStatusResponse {
            trained: true,
            domains: classifier.labels().to_vec(),
            total_domains: classifier.labels().len(),
            accuracy: Some(classifier.report().accuracy),
            trained_at: Some(classifier.report().trained_at),
        },
        None => ModelStatusResponse {
            trained: false,
            domains: Vec::new(),
            total_domains: 0,
            accuracy: None,
            trained_at: None,
        },
    };
    Json(response)
}

/// POST /api/v1/model/predict
pub async fn handle_predict(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, AppError> {
    require_resume_text("text", &request.text)?;

    let classifier = state.trained_classifier().await?;

    Ok(Json(PredictResponse {
        domain_prediction: classifier.predict(&request.text),
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Loads the dataset and trains on a blocking thread.
pub async fn train_classifier(dataset_path: Option<PathBuf>) -> Result<DomainClassifier, AppError> {
    let classifier = tokio::task::spawn_blocking(move || -> Result<DomainClassifier, AppError> {
        let dataset = load_dataset(dataset_path.as_deref())?;
        let source = dataset.source.to_string();
        Ok(DomainClassifier::train(
            &dataset.records,
            &TrainingOptions::default(),
            &source,
        )?)
    })
    .await??;
    Ok(classifier)
}

/// Saves to `MODEL_PATH` if configured. A failed save is logged, not returned: the
/// freshly trained model is still usable in memory.
async fn persist(state: &AppState, classifier: Arc<DomainClassifier>) -> bool {
    let Some(path) = state.config.model_path.clone() else {
        return false;
    };
    match tokio::task::spawn_blocking(move || classifier.save(&path)).await {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            warn!(error = %e, "Failed to persist trained classifier");
            false
        }
        Err(e) => {
            warn!(error = %e, "Persist task failed");
            false
        }
    }
}
