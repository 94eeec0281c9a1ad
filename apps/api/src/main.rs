mod analysis;
mod catalogue;
mod classifier;
mod config;
mod errors;
mod extraction;
mod matching;
mod routes;
mod state;
mod text;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalogue::Catalogue;
use crate::classifier::handlers::train_classifier;
use crate::classifier::DomainClassifier;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SmartHire API v{}", env!("CARGO_PKG_VERSION"));

    // Role catalogue (built-in unless CATALOGUE_PATH is set)
    let catalogue = match &config.catalogue_path {
        Some(path) => Catalogue::from_path(path)
            .with_context(|| format!("failed to load catalogue from {}", path.display()))?,
        None => Catalogue::builtin().context("built-in catalogue is invalid")?,
    };
    info!(
        domains = catalogue.domains.len(),
        roles = catalogue.role_count(),
        "Role catalogue loaded"
    );

    let recommendations =
        Catalogue::recommendation_table().context("built-in recommendation table is invalid")?;

    let classifier = initial_classifier(&config).await?;

    let state = AppState::new(config.clone(), catalogue, recommendations, classifier);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Loads the persisted classifier from `MODEL_PATH`, or trains one when
/// `TRAIN_ON_STARTUP` is set. A missing or unreadable model file is not fatal.
async fn initial_classifier(config: &Config) -> Result<Option<DomainClassifier>> {
    if let Some(path) = config.model_path.as_ref().filter(|p| p.is_file()) {
        match DomainClassifier::load(path) {
            Ok(classifier) => return Ok(Some(classifier)),
            Err(e) => warn!(path = %path.display(), error = %e, "Ignoring unreadable model file"),
        }
    }

    if !config.train_on_startup {
        info!("No trained classifier; POST /api/v1/model/train to train one");
        return Ok(None);
    }

    let classifier = train_classifier(config.dataset_path.clone())
        .await
        .map_err(|e| anyhow::anyhow!("startup training failed: {e}"))?;
    if let Some(path) = &config.model_path {
        if let Err(e) = classifier.save(path) {
            warn!(path = %path.display(), error = %e, "Failed to persist startup model");
        }
    }
    Ok(Some(classifier))
}
