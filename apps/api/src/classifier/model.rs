use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::classifier::dataset::LabelledResume;
use crate::classifier::naive_bayes::MultinomialNb;
use crate::classifier::split::stratified_split;
use crate::classifier::tfidf::{SparseVector, TfidfConfig, TfidfVectorizer};
use crate::classifier::ClassifierError;
use crate::matching::ranker::round2;
use crate::text::clean_for_classifier;

/// Number of ranked domains returned with each prediction.
pub const TOP_DOMAINS: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingOptions {
    pub tfidf: TfidfConfig,
    pub alpha: f64,
    pub test_fraction: f64,
    pub seed: u64,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self {
            tfidf: TfidfConfig::default(),
            alpha: 0.1,
            test_fraction: 0.2,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    pub run_id: Uuid,
    pub total_resumes: usize,
    pub domains: Vec<String>,
    pub domain_counts: BTreeMap<String, usize>,
    /// Held-out accuracy, four decimals. Measured on the training rows when the split
    /// leaves no test rows.
    pub accuracy: f64,
    pub training_samples: usize,
    pub testing_samples: usize,
    pub vocabulary_size: usize,
    pub dataset_source: String,
    pub trained_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DomainScore {
    pub domain: String,
    /// Percentage, two decimals.
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainPrediction {
    pub primary_domain: String,
    pub confidence: f64,
    pub top_domains: Vec<DomainScore>,
}

/// TF-IDF features feeding a multinomial Naive Bayes over resume domains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainClassifier {
    /// Sorted domain labels; index = class id.
    labels: Vec<String>,
    vectorizer: TfidfVectorizer,
    model: MultinomialNb,
    report: TrainingReport,
}

impl DomainClassifier {
    pub fn train(
        records: &[LabelledResume],
        options: &TrainingOptions,
        dataset_source: &str,
    ) -> Result<Self, ClassifierError> {
        if records.is_empty() {
            return Err(ClassifierError::EmptyDataset);
        }

        let mut domain_counts: BTreeMap<String, usize> = BTreeMap::new();
        for record in records {
            *domain_counts.entry(record.domain.clone()).or_insert(0) += 1;
        }
        if domain_counts.len() < 2 {
            return Err(ClassifierError::TooFewDomains(domain_counts.len()));
        }

        // BTreeMap keys are already sorted, so label ids are stable
        let labels: Vec<String> = domain_counts.keys().cloned().collect();
        let label_ids: HashMap<&str, usize> = domain_counts
            .keys()
            .enumerate()
            .map(|(id, label)| (label.as_str(), id))
            .collect();
        let encoded: Vec<usize> = records
            .iter()
            .map(|r| label_ids[r.domain.as_str()])
            .collect();

        let documents: Vec<String> = records
            .iter()
            .map(|r| clean_for_classifier(&r.text))
            .collect();

        info!(
            resumes = records.len(),
            domains = labels.len(),
            "Training domain classifier"
        );

        let vectorizer = TfidfVectorizer::fit(options.tfidf.clone(), &documents)?;
        let rows: Vec<SparseVector> = documents.iter().map(|d| vectorizer.transform(d)).collect();

        let (train_idx, test_idx) = stratified_split(&encoded, options.test_fraction, options.seed);
        let train_rows: Vec<&SparseVector> = train_idx.iter().map(|&i| &rows[i]).collect();
        let train_labels: Vec<usize> = train_idx.iter().map(|&i| encoded[i]).collect();

        let model = MultinomialNb::fit(
            &train_rows,
            &train_labels,
            labels.len(),
            vectorizer.vocabulary_len(),
            options.alpha,
        )?;

        let eval_idx = if test_idx.is_empty() { &train_idx } else { &test_idx };
        let correct = eval_idx
            .iter()
            .filter(|&&i| model.predict(&rows[i]) == encoded[i])
            .count();
        let accuracy = (correct as f64 / eval_idx.len() as f64 * 10_000.0).round() / 10_000.0;

        let report = TrainingReport {
            run_id: Uuid::new_v4(),
            total_resumes: records.len(),
            domains: labels.clone(),
            domain_counts,
            accuracy,
            training_samples: train_idx.len(),
            testing_samples: test_idx.len(),
            vocabulary_size: vectorizer.vocabulary_len(),
            dataset_source: dataset_source.to_string(),
            trained_at: Utc::now(),
        };

        info!(
            run_id = %report.run_id,
            accuracy = report.accuracy,
            training_samples = report.training_samples,
            testing_samples = report.testing_samples,
            vocabulary = report.vocabulary_size,
            "Domain classifier trained"
        );

        Ok(Self {
            labels,
            vectorizer,
            model,
            report,
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn report(&self) -> &TrainingReport {
        &self.report
    }

    pub fn predict(&self, text: &str) -> DomainPrediction {
        let row = self.vectorizer.transform(&clean_for_classifier(text));
        let proba = self.model.predict_proba(&row);

        let mut ranked: Vec<(usize, f64)> = proba.into_iter().enumerate().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let top_domains: Vec<DomainScore> = ranked
            .iter()
            .take(TOP_DOMAINS)
            .map(|&(i, p)| DomainScore {
                domain: self.labels[i].clone(),
                confidence: round2(p * 100.0),
            })
            .collect();

        let (primary_domain, confidence) = top_domains
            .first()
            .map(|d| (d.domain.clone(), d.confidence))
            .unwrap_or_default();

        DomainPrediction {
            primary_domain,
            confidence,
            top_domains,
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ClassifierError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec(self)?;
        std::fs::write(path, json)?;
        info!(path = %path.display(), run_id = %self.report.run_id, "Saved domain classifier");
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let raw = std::fs::read(path)?;
        let classifier: Self = serde_json::from_slice(&raw)?;
        if classifier.labels.len() != classifier.model.n_classes() {
            return Err(ClassifierError::Corrupt(format!(
                "{} labels but {} classes",
                classifier.labels.len(),
                classifier.model.n_classes()
            )));
        }
        info!(
            path = %path.display(),
            run_id = %classifier.report.run_id,
            domains = classifier.labels.len(),
            "Loaded domain classifier"
        );
        Ok(classifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::dataset::Dataset;

    fn trained() -> DomainClassifier {
        let dataset = Dataset::sample();
        DomainClassifier::train(&dataset.records, &TrainingOptions::default(), "sample").unwrap()
    }

    #[test]
    fn test_train_on_sample_corpus() {
        let classifier = trained();
        let report = classifier.report();
        assert_eq!(report.total_resumes, 26);
        assert_eq!(report.domains.len(), 8);
        assert_eq!(report.training_samples + report.testing_samples, 26);
        assert!(report.testing_samples > 0);
        assert!((0.0..=1.0).contains(&report.accuracy));
        assert!(report.vocabulary_size > 0);
        assert_eq!(report.domain_counts["INFORMATION-TECHNOLOGY"], 5);
        // labels are sorted
        assert_eq!(classifier.labels()[0], "ACCOUNTANT");
    }

    #[test]
    fn test_predict_shape() {
        let classifier = trained();
        let prediction = classifier.predict(
            "Python developer building REST APIs with Django, AWS cloud infrastructure and Docker",
        );
        assert_eq!(prediction.top_domains.len(), TOP_DOMAINS);
        assert_eq!(prediction.primary_domain, prediction.top_domains[0].domain);
        assert_eq!(prediction.primary_domain, "INFORMATION-TECHNOLOGY");
        assert!(prediction
            .top_domains
            .windows(2)
            .all(|w| w[0].confidence >= w[1].confidence));
        assert!(prediction.confidence > 0.0 && prediction.confidence <= 100.0);
    }

    #[test]
    fn test_labels_encoded_independent_of_row_order() {
        let row = |domain: &str, text: &str| LabelledResume {
            domain: domain.into(),
            text: text.into(),
        };
        // Later-sorting label first, so a wrong id mapping would collapse both onto class 0
        let records = vec![
            row("ZOOLOGY", "zebra giraffe habitat field research"),
            row("ZOOLOGY", "giraffe habitat zebra conservation"),
            row("ZOOLOGY", "zebra habitat giraffe wildlife survey"),
            row("ACCOUNTING", "ledger audit payroll reconciliation"),
            row("ACCOUNTING", "audit ledger payroll tax filing"),
            row("ACCOUNTING", "payroll ledger audit month end close"),
        ];
        let classifier =
            DomainClassifier::train(&records, &TrainingOptions::default(), "t").unwrap();

        assert_eq!(classifier.labels(), ["ACCOUNTING", "ZOOLOGY"]);
        assert_eq!(classifier.report().domain_counts["ZOOLOGY"], 3);
        assert_eq!(
            classifier.predict("zebra and giraffe habitat").primary_domain,
            "ZOOLOGY"
        );
        assert_eq!(
            classifier.predict("payroll ledger audit work").primary_domain,
            "ACCOUNTING"
        );
    }

    #[test]
    fn test_single_domain_rejected() {
        let records = vec![
            LabelledResume {
                domain: "HR".into(),
                text: "recruiter".into(),
            },
            LabelledResume {
                domain: "HR".into(),
                text: "hr manager".into(),
            },
        ];
        let err = DomainClassifier::train(&records, &TrainingOptions::default(), "t").unwrap_err();
        assert!(matches!(err, ClassifierError::TooFewDomains(1)));
        assert!(matches!(
            DomainClassifier::train(&[], &TrainingOptions::default(), "t"),
            Err(ClassifierError::EmptyDataset)
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("models").join("classifier.json");
        let classifier = trained();
        classifier.save(&path).unwrap();

        let loaded = DomainClassifier::load(&path).unwrap();
        assert_eq!(loaded.report().run_id, classifier.report().run_id);
        let text = "Registered nurse in critical care and patient management";
        assert_eq!(
            loaded.predict(text).primary_domain,
            classifier.predict(text).primary_domain
        );
    }

    #[test]
    fn test_load_garbage_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, b"{not json").unwrap();
        assert!(matches!(
            DomainClassifier::load(&path),
            Err(ClassifierError::Serde(_))
        ));
        assert!(matches!(
            DomainClassifier::load(&dir.path().join("missing.json")),
            Err(ClassifierError::Io(_))
        ));
    }
}
