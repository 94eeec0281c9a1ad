use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalogue::domain_key;
use crate::classifier::dataset::LabelledResume;
use crate::matching::ranker::RoleMatcher;

/// The ranker is evaluated with this many roles per resume, and top-k accuracy is
/// reported for every k up to it.
pub const EVALUATION_TOP_K: usize = 3;
const PROGRESS_EVERY: usize = 100;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AccuracyStat {
    pub accuracy: f64,
    pub correct: usize,
    pub total: usize,
}

impl AccuracyStat {
    fn record(&mut self, hit: bool) {
        self.total += 1;
        if hit {
            self.correct += 1;
        }
        self.accuracy = self.correct as f64 / self.total as f64;
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformanceSummary {
    /// accuracy ≥ 0.8
    pub high: usize,
    /// 0.6 – 0.8
    pub medium: usize,
    /// < 0.6
    pub low: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub total_resumes: usize,
    pub total_job_roles: usize,
    pub total_domains: usize,
    pub overall_accuracy: f64,
    /// keys: "top_1", "top_2", "top_3"
    pub top_k_accuracy: BTreeMap<String, AccuracyStat>,
    pub domain_accuracy: BTreeMap<String, AccuracyStat>,
    pub performance_summary: PerformanceSummary,
}

/// Runs the ranker over a labelled dataset and measures how often the inferred domain
/// agrees with the label.
pub fn evaluate(matcher: &RoleMatcher, records: &[LabelledResume]) -> EvaluationReport {
    let mut overall = AccuracyStat::default();
    let mut per_domain: BTreeMap<String, AccuracyStat> = BTreeMap::new();
    let mut top_k: Vec<AccuracyStat> = vec![AccuracyStat::default(); EVALUATION_TOP_K];

    for (idx, record) in records.iter().enumerate() {
        let outcome = matcher.rank(&record.text, EVALUATION_TOP_K);
        let label = domain_key(&record.domain);
        let hit = domain_key(&outcome.predicted_domain) == label;

        overall.record(hit);
        per_domain.entry(record.domain.clone()).or_default().record(hit);

        let ranked_domains: Vec<String> = outcome
            .top_roles
            .iter()
            .map(|r| domain_key(&r.domain))
            .collect();
        for (k, stat) in top_k.iter_mut().enumerate() {
            let window = &ranked_domains[..ranked_domains.len().min(k + 1)];
            stat.record(window.contains(&label));
        }

        if (idx + 1) % PROGRESS_EVERY == 0 {
            info!(
                processed = idx + 1,
                total = records.len(),
                accuracy = overall.accuracy,
                "Evaluation progress"
            );
        }
    }

    let mut summary = PerformanceSummary::default();
    for stat in per_domain.values() {
        if stat.accuracy >= 0.8 {
            summary.high += 1;
        } else if stat.accuracy >= 0.6 {
            summary.medium += 1;
        } else {
            summary.low += 1;
        }
    }

    info!(
        resumes = overall.total,
        accuracy = overall.accuracy,
        "Evaluation complete"
    );

    EvaluationReport {
        total_resumes: overall.total,
        total_job_roles: matcher.catalogue().role_count(),
        total_domains: matcher.catalogue().domains.len(),
        overall_accuracy: overall.accuracy,
        top_k_accuracy: top_k
            .into_iter()
            .enumerate()
            .map(|(k, stat)| (format!("top_{}", k + 1), stat))
            .collect(),
        domain_accuracy: per_domain,
        performance_summary: summary,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::catalogue::Catalogue;
    use crate::matching::scorer::KeywordRoleScorer;

    fn record(domain: &str, text: &str) -> LabelledResume {
        LabelledResume {
            domain: domain.to_string(),
            text: text.to_string(),
        }
    }

    fn matcher() -> RoleMatcher {
        RoleMatcher::new(
            Arc::new(Catalogue::builtin().unwrap()),
            Arc::new(KeywordRoleScorer),
        )
    }

    #[test]
    fn test_accuracy_counts_uppercase_labels() {
        let records = vec![
            record(
                "INFORMATION-TECHNOLOGY",
                "Python developer with django flask rest api sql git numpy pandas",
            ),
            record(
                "HR",
                "HR manager with talent acquisition recruitment and employee relations",
            ),
            record("CHEF", "pilot with flight operations aviation safety navigation"),
        ];
        let report = evaluate(&matcher(), &records);

        assert_eq!(report.total_resumes, 3);
        assert!((report.overall_accuracy - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(report.domain_accuracy["HR"].correct, 1);
        assert_eq!(report.domain_accuracy["CHEF"].correct, 0);
        assert_eq!(report.performance_summary.high, 2);
        assert_eq!(report.performance_summary.low, 1);
        assert_eq!(report.total_job_roles, 240);
    }

    #[test]
    fn test_top_k_is_monotonic() {
        let records = vec![
            record("SALES", "Sales executive with lead generation client acquisition and negotiation skills"),
            record("FINANCE", "Financial analyst with excel financial modeling and forecasting experience"),
        ];
        let report = evaluate(&matcher(), &records);
        let top1 = report.top_k_accuracy["top_1"].correct;
        let top2 = report.top_k_accuracy["top_2"].correct;
        let top3 = report.top_k_accuracy["top_3"].correct;
        assert!(top1 <= top2 && top2 <= top3);
        assert_eq!(report.top_k_accuracy.len(), EVALUATION_TOP_K);
    }

    #[test]
    fn test_short_resume_counts_as_miss() {
        let report = evaluate(&matcher(), &[record("HR", "hr")]);
        assert_eq!(report.overall_accuracy, 0.0);
        assert_eq!(report.top_k_accuracy["top_3"].correct, 0);
    }

    #[test]
    fn test_empty_dataset() {
        let report = evaluate(&matcher(), &[]);
        assert_eq!(report.total_resumes, 0);
        assert_eq!(report.overall_accuracy, 0.0);
        assert!(report.domain_accuracy.is_empty());
    }
}
