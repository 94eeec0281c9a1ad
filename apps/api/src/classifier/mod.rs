//! Resume domain classifier: TF-IDF word/bigram features feeding multinomial Naive Bayes.
//!
//! Default hyper-parameters: 2500 features, English stop words, (1, 2)-grams,
//! min_df 2, max_df 0.95, sublinear TF, alpha 0.1, stratified 80/20 split with seed 42.

pub mod dataset;
pub mod handlers;
pub mod model;
pub mod naive_bayes;
pub mod sample;
pub mod split;
pub mod tfidf;

use thiserror::Error;

pub use model::{DomainClassifier, DomainPrediction, TrainingOptions, TrainingReport};

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("training data is empty")]
    EmptyDataset,

    #[error("need at least 2 domains to train, found {0}")]
    TooFewDomains(usize),

    #[error("no terms survived vocabulary pruning")]
    EmptyVocabulary,

    #[error("invalid training configuration: {0}")]
    InvalidConfig(String),

    #[error("saved model is inconsistent: {0}")]
    Corrupt(String),

    #[error("model file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("model serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}
