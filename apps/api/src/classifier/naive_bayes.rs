use serde::{Deserialize, Serialize};

use crate::classifier::tfidf::SparseVector;
use crate::classifier::ClassifierError;

/// Multinomial Naive Bayes over non-negative (TF-IDF) features with additive smoothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultinomialNb {
    alpha: f64,
    class_log_prior: Vec<f64>,
    /// `[class][feature]`
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    /// `labels[i]` is the class index of `rows[i]`; classes are `0..n_classes`.
    pub fn fit(
        rows: &[&SparseVector],
        labels: &[usize],
        n_classes: usize,
        n_features: usize,
        alpha: f64,
    ) -> Result<Self, ClassifierError> {
        if rows.is_empty() {
            return Err(ClassifierError::EmptyDataset);
        }
        if rows.len() != labels.len() {
            return Err(ClassifierError::InvalidConfig(format!(
                "{} rows but {} labels",
                rows.len(),
                labels.len()
            )));
        }
        if alpha <= 0.0 {
            return Err(ClassifierError::InvalidConfig(format!(
                "alpha must be positive, got {alpha}"
            )));
        }

        let mut class_counts = vec![0usize; n_classes];
        let mut feature_counts = vec![vec![0.0_f64; n_features]; n_classes];

        for (row, &label) in rows.iter().zip(labels) {
            if label >= n_classes {
                return Err(ClassifierError::InvalidConfig(format!(
                    "label {label} out of range for {n_classes} classes"
                )));
            }
            class_counts[label] += 1;
            for &(feature, value) in row.iter() {
                feature_counts[label][feature] += value;
            }
        }

        let total = rows.len() as f64;
        // classes absent from the training split keep a finite but negligible prior
        let class_log_prior = class_counts
            .iter()
            .map(|&c| {
                if c == 0 {
                    (0.5 / total).ln() - total.ln()
                } else {
                    (c as f64 / total).ln()
                }
            })
            .collect();

        let feature_log_prob = feature_counts
            .into_iter()
            .map(|counts| {
                let denom = counts.iter().sum::<f64>() + alpha * n_features as f64;
                counts
                    .into_iter()
                    .map(|c| ((c + alpha) / denom).ln())
                    .collect()
            })
            .collect();

        Ok(Self {
            alpha,
            class_log_prior,
            feature_log_prob,
        })
    }

    pub fn n_classes(&self) -> usize {
        self.class_log_prior.len()
    }

    /// Posterior class probabilities for one row; sums to 1.
    pub fn predict_proba(&self, row: &SparseVector) -> Vec<f64> {
        let joint: Vec<f64> = self
            .class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, flp)| {
                prior
                    + row
                        .iter()
                        .map(|&(feature, value)| value * flp[feature])
                        .sum::<f64>()
            })
            .collect();

        let max = joint.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exp: Vec<f64> = joint.iter().map(|j| (j - max).exp()).collect();
        let sum: f64 = exp.iter().sum();
        exp.into_iter().map(|e| e / sum).collect()
    }

    pub fn predict(&self, row: &SparseVector) -> usize {
        self.predict_proba(row)
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fit_two_class() -> MultinomialNb {
        // feature 0 ~ class 0, feature 1 ~ class 1
        let rows: Vec<SparseVector> = vec![
            vec![(0, 1.0)],
            vec![(0, 0.9), (2, 0.1)],
            vec![(1, 1.0)],
            vec![(1, 0.8), (2, 0.2)],
        ];
        let refs: Vec<&SparseVector> = rows.iter().collect();
        MultinomialNb::fit(&refs, &[0, 0, 1, 1], 2, 3, 0.1).unwrap()
    }

    #[test]
    fn test_predicts_dominant_feature_class() {
        let nb = fit_two_class();
        assert_eq!(nb.predict(&vec![(0, 1.0)]), 0);
        assert_eq!(nb.predict(&vec![(1, 1.0)]), 1);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let nb = fit_two_class();
        let proba = nb.predict_proba(&vec![(0, 0.5), (1, 0.5), (2, 0.7)]);
        assert_eq!(proba.len(), 2);
        assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(proba.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn test_empty_row_falls_back_to_priors() {
        let rows: Vec<SparseVector> = vec![vec![(0, 1.0)], vec![(0, 1.0)], vec![(1, 1.0)]];
        let refs: Vec<&SparseVector> = rows.iter().collect();
        let nb = MultinomialNb::fit(&refs, &[0, 0, 1], 2, 2, 0.1).unwrap();
        let proba = nb.predict_proba(&vec![]);
        assert!((proba[0] - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_bad_input() {
        let rows: Vec<SparseVector> = vec![vec![(0, 1.0)]];
        let refs: Vec<&SparseVector> = rows.iter().collect();
        assert!(MultinomialNb::fit(&[], &[], 2, 2, 0.1).is_err());
        assert!(MultinomialNb::fit(&refs, &[0, 1], 2, 2, 0.1).is_err());
        assert!(MultinomialNb::fit(&refs, &[5], 2, 2, 0.1).is_err());
        assert!(MultinomialNb::fit(&refs, &[0], 2, 2, 0.0).is_err());
    }
}
