use serde::{Deserialize, Serialize};

/// Explanations list at most this many keywords.
pub const MAX_EXPLAINED_FEATURES: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureImpact {
    pub feature: String,
    pub impact: f64,
    pub normalized_impact: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explanation {
    pub method: String,
    pub explanations: Vec<FeatureImpact>,
    pub total_impact: f64,
}

/// Builds a keyword explanation for one role.
///
/// Keywords earlier in the role's list count as more important:
/// `impact = (1 / matched) × (1 − position / len × 0.5)`, then impacts are normalized
/// to sum to one.
pub fn explain_keywords(keywords: &[String], matched: &[usize]) -> Explanation {
    let mut explanations = Vec::new();

    if !matched.is_empty() && !keywords.is_empty() {
        let total = keywords.len() as f64;
        let per_keyword = 1.0 / matched.len() as f64;

        for &index in matched.iter().take(MAX_EXPLAINED_FEATURES) {
            let Some(keyword) = keywords.get(index) else {
                continue;
            };
            let importance = 1.0 - (index as f64 / total) * 0.5;
            let impact = per_keyword * importance;
            explanations.push(FeatureImpact {
                feature: keyword.clone(),
                impact,
                normalized_impact: impact,
            });
        }

        let sum: f64 = explanations.iter().map(|e| e.impact).sum();
        if sum > 0.0 {
            for e in &mut explanations {
                e.normalized_impact = e.impact / sum;
            }
        }
    }

    let total_impact = if explanations.is_empty() { 0.0 } else { 1.0 };
    Explanation {
        method: "Keyword Matching".to_string(),
        explanations,
        total_impact,
    }
}
