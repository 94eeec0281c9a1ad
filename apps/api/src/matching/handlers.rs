//! Axum route handlers for the role matcher.

use std::path::PathBuf;

use axum::{body::Bytes, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::classifier::dataset::load_dataset;
use crate::errors::{optional_json, require_resume_text, AppError};
use crate::matching::demo::{demo_predictions, DemoReport};
use crate::matching::evaluation::{evaluate, EvaluationReport};
use crate::matching::ranker::{MatchOutcome, RoleExplanation};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub resume_text: String,
    /// Default: `DEFAULT_TOP_K` from config.
    pub top_k: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ExplainRequest {
    pub resume_text: String,
    pub role_name: String,
    /// Disambiguates role names shared by several domains.
    pub domain: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EvaluateRequest {
    pub dataset_path: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub dataset_source: String,
    #[serde(flatten)]
    pub report: EvaluationReport,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/match
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchOutcome>, AppError> {
    require_resume_text("resume_text", &request.resume_text)?;
    let top_k = request.top_k.unwrap_or(state.config.default_top_k);
    if top_k == 0 {
        return Err(AppError::Validation("top_k must be at least 1".to_string()));
    }

    Ok(Json(state.matcher.rank(&request.resume_text, top_k)))
}

/// POST /api/v1/match/explain
pub async fn handle_explain(
    State(state): State<AppState>,
    Json(request): Json<ExplainRequest>,
) -> Result<Json<RoleExplanation>, AppError> {
    require_resume_text("resume_text", &request.resume_text)?;
    if request.role_name.trim().is_empty() {
        return Err(AppError::Validation("role_name cannot be empty".to_string()));
    }

    state
        .matcher
        .explain(
            &request.resume_text,
            &request.role_name,
            request.domain.as_deref(),
        )
        .map(Json)
        .ok_or_else(|| {
            let scope = request
                .domain
                .map(|d| format!(" in domain '{d}'"))
                .unwrap_or_default();
            AppError::NotFound(format!("Role '{}'{scope} not found", request.role_name))
        })
}

/// GET /api/v1/match/demo
///
/// Runs the matcher over a handful of built-in sample resumes.
pub async fn handle_demo(State(state): State<AppState>) -> Json<DemoReport> {
    Json(demo_predictions(&state.matcher))
}

/// POST /api/v1/match/evaluate
///
/// Scores the matcher against a labelled dataset. Runs on a blocking thread; the full
/// public dataset takes a few seconds.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<EvaluateResponse>, AppError> {
    let request: EvaluateRequest = optional_json(&body)?;
    let dataset_path = request.dataset_path.or_else(|| state.config.dataset_path.clone());
    let matcher = state.matcher.clone();

    let response = tokio::task::spawn_blocking(move || -> Result<EvaluateResponse, AppError> {
        let dataset = load_dataset(dataset_path.as_deref())?;
        Ok(EvaluateResponse {
            dataset_source: dataset.source.to_string(),
            report: evaluate(&matcher, &dataset.records),
        })
    })
    .await??;

    Ok(Json(response))
}
