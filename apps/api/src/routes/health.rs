use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
/// Service banner with the endpoint list.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "GET /health",
            "domains": "GET /api/v1/domains",
            "domain_roles": "GET /api/v1/domains/:domain/roles",
            "role": "GET /api/v1/roles/:role",
            "match": "POST /api/v1/match",
            "explain": "POST /api/v1/match/explain",
            "demo": "GET /api/v1/match/demo",
            "evaluate": "POST /api/v1/match/evaluate",
            "train": "POST /api/v1/model/train",
            "model_status": "GET /api/v1/model/status",
            "predict": "POST /api/v1/model/predict",
            "analyze": "POST /api/v1/analyze/resume",
            "upload": "POST /api/v1/analyze/upload",
            "batch": "POST /api/v1/analyze/batch"
        }
    }))
}

/// GET /health
/// Returns service status, whether a classifier is loaded, and catalogue size.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let model_trained = state.classifier.read().await.is_some();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": env!("CARGO_PKG_NAME"),
        "model_trained": model_trained,
        "domains_loaded": state.catalogue.domains.len(),
        "roles_loaded": state.catalogue.role_count(),
        "scorer": state.matcher.scorer_backend()
    }))
}
