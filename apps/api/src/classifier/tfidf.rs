use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::classifier::ClassifierError;
use crate::text::analyze;

/// Sparse row: `(feature index, value)` pairs sorted by index.
pub type SparseVector = Vec<(usize, f64)>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfConfig {
    pub max_features: usize,
    pub ngram_range: (usize, usize),
    /// Minimum number of documents a term must appear in.
    pub min_df: usize,
    /// Maximum proportion of documents a term may appear in.
    pub max_df: f64,
    pub sublinear_tf: bool,
}

impl Default for TfidfConfig {
    fn default() -> Self {
        Self {
            max_features: 2500,
            ngram_range: (1, 2),
            min_df: 2,
            max_df: 0.95,
            sublinear_tf: true,
        }
    }
}

/// TF-IDF vectorizer over word n-grams with smoothed IDF and L2-normalized rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    config: TfidfConfig,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Learns vocabulary and IDF weights from already-cleaned documents.
    pub fn fit(config: TfidfConfig, documents: &[String]) -> Result<Self, ClassifierError> {
        if documents.is_empty() {
            return Err(ClassifierError::EmptyDataset);
        }
        if config.ngram_range.0 == 0 || config.ngram_range.0 > config.ngram_range.1 {
            return Err(ClassifierError::InvalidConfig(format!(
                "invalid ngram_range {:?}",
                config.ngram_range
            )));
        }
        if !(config.max_df > 0.0 && config.max_df <= 1.0) {
            return Err(ClassifierError::InvalidConfig(format!(
                "max_df must be in (0, 1], got {}",
                config.max_df
            )));
        }

        let n_docs = documents.len();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        let mut term_freq: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let features = analyze(doc, config.ngram_range);
            let mut seen = HashSet::new();
            for feature in features {
                *term_freq.entry(feature.clone()).or_insert(0) += 1;
                if seen.insert(feature.clone()) {
                    *doc_freq.entry(feature).or_insert(0) += 1;
                }
            }
        }

        let max_doc_count = config.max_df * n_docs as f64;
        let mut kept: Vec<(String, usize)> = doc_freq
            .iter()
            .filter(|(_, &df)| df >= config.min_df && (df as f64) <= max_doc_count)
            .map(|(term, _)| (term.clone(), term_freq[term]))
            .collect();

        if kept.len() > config.max_features {
            kept.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            kept.truncate(config.max_features);
        }

        if kept.is_empty() {
            return Err(ClassifierError::EmptyVocabulary);
        }

        // alphabetical feature order keeps indices stable across runs
        let ordered: BTreeMap<String, usize> = kept
            .into_iter()
            .map(|(term, _)| {
                let df = doc_freq[&term];
                (term, df)
            })
            .collect();

        let mut vocabulary = HashMap::with_capacity(ordered.len());
        let mut idf = Vec::with_capacity(ordered.len());
        for (index, (term, df)) in ordered.into_iter().enumerate() {
            idf.push(((1.0 + n_docs as f64) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(term, index);
        }

        Ok(Self {
            config,
            vocabulary,
            idf,
        })
    }

    pub fn vocabulary_len(&self) -> usize {
        self.idf.len()
    }

    /// Vectorizes one already-cleaned document. Unknown terms are ignored; a document
    /// with no known terms yields an empty vector.
    pub fn transform(&self, document: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
        for feature in analyze(document, self.config.ngram_range) {
            if let Some(&index) = self.vocabulary.get(&feature) {
                *counts.entry(index).or_insert(0) += 1;
            }
        }

        let mut row: SparseVector = counts
            .into_iter()
            .map(|(index, count)| {
                let tf = if self.config.sublinear_tf {
                    1.0 + (count as f64).ln()
                } else {
                    count as f64
                };
                (index, tf * self.idf[index])
            })
            .collect();

        let norm = row.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, v) in &mut row {
                *v /= norm;
            }
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn unigram_config() -> TfidfConfig {
        TfidfConfig {
            max_features: 100,
            ngram_range: (1, 1),
            min_df: 1,
            max_df: 1.0,
            sublinear_tf: false,
        }
    }

    #[test]
    fn test_rows_are_l2_normalized() {
        let corpus = docs(&["python django sql", "nursing patient care", "python sql"]);
        let vectorizer = TfidfVectorizer::fit(unigram_config(), &corpus).unwrap();
        let row = vectorizer.transform("python python sql");
        let norm: f64 = row.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_rarer_terms_get_higher_weight() {
        let corpus = docs(&["python django", "python sql", "python nursing"]);
        let vectorizer = TfidfVectorizer::fit(unigram_config(), &corpus).unwrap();
        let row = vectorizer.transform("python django");
        let python = vectorizer.vocabulary["python"];
        let django = vectorizer.vocabulary["django"];
        let weight = |i: usize| row.iter().find(|(j, _)| *j == i).unwrap().1;
        assert!(weight(django) > weight(python));
    }

    #[test]
    fn test_min_df_and_max_df_prune_vocabulary() {
        let corpus = docs(&[
            "python sql common",
            "python nursing common",
            "chef baking common",
        ]);
        let config = TfidfConfig {
            min_df: 2,
            max_df: 0.9,
            ..unigram_config()
        };
        let vectorizer = TfidfVectorizer::fit(config, &corpus).unwrap();
        // "common" is in every document, singletons fall under min_df
        assert_eq!(vectorizer.vocabulary_len(), 1);
        assert!(vectorizer.vocabulary.contains_key("python"));
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let corpus = docs(&["alpha alpha alpha beta", "alpha beta gamma"]);
        let config = TfidfConfig {
            max_features: 2,
            ..unigram_config()
        };
        let vectorizer = TfidfVectorizer::fit(config, &corpus).unwrap();
        assert_eq!(vectorizer.vocabulary_len(), 2);
        assert!(vectorizer.vocabulary.contains_key("alpha"));
        assert!(vectorizer.vocabulary.contains_key("beta"));
    }

    #[test]
    fn test_bigrams_are_features() {
        let corpus = docs(&["machine learning", "machine learning models"]);
        let config = TfidfConfig {
            ngram_range: (1, 2),
            ..unigram_config()
        };
        let vectorizer = TfidfVectorizer::fit(config, &corpus).unwrap();
        assert!(vectorizer.vocabulary.contains_key("machine learning"));
    }

    #[test]
    fn test_unknown_document_is_empty_vector() {
        let corpus = docs(&["python sql", "python django"]);
        let vectorizer = TfidfVectorizer::fit(unigram_config(), &corpus).unwrap();
        assert!(vectorizer.transform("zzz qqq").is_empty());
    }

    #[test]
    fn test_empty_vocabulary_is_error() {
        let corpus = docs(&["the and", "of to"]);
        let err = TfidfVectorizer::fit(unigram_config(), &corpus).unwrap_err();
        assert!(matches!(err, ClassifierError::EmptyVocabulary));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let corpus = docs(&["python"]);
        let config = TfidfConfig {
            ngram_range: (2, 1),
            ..unigram_config()
        };
        assert!(matches!(
            TfidfVectorizer::fit(config, &corpus),
            Err(ClassifierError::InvalidConfig(_))
        ));
        assert!(matches!(
            TfidfVectorizer::fit(unigram_config(), &[]),
            Err(ClassifierError::EmptyDataset)
        ));
    }
}
