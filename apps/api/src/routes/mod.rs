pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::catalogue::handlers as catalogue;
use crate::classifier::handlers as model;
use crate::matching::handlers as matching;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Catalogue
        .route("/api/v1/domains", get(catalogue::handle_list_domains))
        .route(
            "/api/v1/domains/:domain/roles",
            get(catalogue::handle_domain_roles),
        )
        .route("/api/v1/roles/:role", get(catalogue::handle_role_detail))
        // Role matching
        .route("/api/v1/match", post(matching::handle_match))
        .route("/api/v1/match/explain", post(matching::handle_explain))
        .route("/api/v1/match/demo", get(matching::handle_demo))
        .route("/api/v1/match/evaluate", post(matching::handle_evaluate))
        // Domain classifier
        .route("/api/v1/model/train", post(model::handle_train))
        .route("/api/v1/model/status", get(model::handle_model_status))
        .route("/api/v1/model/predict", post(model::handle_predict))
        // Full analysis
        .route("/api/v1/analyze/resume", post(analysis::handle_analyze_resume))
        .route("/api/v1/analyze/upload", post(analysis::handle_analyze_upload))
        .route("/api/v1/analyze/batch", post(analysis::handle_analyze_batch))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
