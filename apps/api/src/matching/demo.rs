use serde::{Deserialize, Serialize};

use crate::matching::ranker::{MatchOutcome, RoleMatcher};

pub const DEMO_RESUMES: &[&str] = &[
    "Python developer with django flask experience and machine learning data science pandas numpy",
    "Graphic designer with adobe photoshop illustrator and UI UX design skills",
    "HR manager with talent acquisition recruitment and employee relations experience",
    "Sales executive with lead generation client acquisition and negotiation skills",
    "Financial analyst with excel financial modeling and data analysis experience",
];

const SAMPLE_PREVIEW_CHARS: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoPrediction {
    pub demo_id: usize,
    pub resume_sample: String,
    pub predicted_domain: String,
    pub top_role: String,
    pub top_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoReport {
    pub demo_predictions: Vec<DemoPrediction>,
    pub domains: usize,
    pub roles: usize,
}

pub fn demo_predictions(matcher: &RoleMatcher) -> DemoReport {
    let demo_predictions = DEMO_RESUMES
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let MatchOutcome {
                predicted_domain,
                top_roles,
                ..
            } = matcher.rank(text, 3);
            let preview: String = text.chars().take(SAMPLE_PREVIEW_CHARS).collect();
            DemoPrediction {
                demo_id: i + 1,
                resume_sample: format!("{preview}..."),
                predicted_domain,
                top_role: top_roles
                    .first()
                    .map(|r| r.job_role.clone())
                    .unwrap_or_else(|| "None".to_string()),
                top_score: top_roles.first().map(|r| r.match_score).unwrap_or(0.0),
            }
        })
        .collect();

    DemoReport {
        demo_predictions,
        domains: matcher.catalogue().domains.len(),
        roles: matcher.catalogue().role_count(),
    }
}
