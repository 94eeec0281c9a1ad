use std::sync::Arc;

use tokio::sync::RwLock;

use crate::analysis::recommend::RoleRecommender;
use crate::catalogue::Catalogue;
use crate::classifier::DomainClassifier;
use crate::config::Config;
use crate::errors::AppError;
use crate::matching::ranker::RoleMatcher;
use crate::matching::scorer::KeywordRoleScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub catalogue: Arc<Catalogue>,
    /// Role ranker over `catalogue`. Default scorer: KeywordRoleScorer.
    pub matcher: Arc<RoleMatcher>,
    /// Within-domain role recommender for classifier labels.
    pub recommender: Arc<RoleRecommender>,
    /// `None` until a model is trained or loaded from `MODEL_PATH`. Handlers clone the
    /// inner `Arc` so a retrain never waits on in-flight predictions.
    pub classifier: Arc<RwLock<Option<Arc<DomainClassifier>>>>,
}

impl AppState {
    pub fn new(
        config: Config,
        catalogue: Catalogue,
        recommendations: Catalogue,
        classifier: Option<DomainClassifier>,
    ) -> Self {
        let catalogue = Arc::new(catalogue);
        let matcher = Arc::new(RoleMatcher::new(
            catalogue.clone(),
            Arc::new(KeywordRoleScorer),
        ));
        let recommender = Arc::new(RoleRecommender::new(recommendations, catalogue.clone()));
        Self {
            config,
            catalogue,
            matcher,
            recommender,
            classifier: Arc::new(RwLock::new(classifier.map(Arc::new))),
        }
    }

    /// The current trained classifier, or `ModelNotTrained`.
    pub async fn trained_classifier(&self) -> Result<Arc<DomainClassifier>, AppError> {
        self.classifier
            .read()
            .await
            .clone()
            .ok_or(AppError::ModelNotTrained)
    }
}
