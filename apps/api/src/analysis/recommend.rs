use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalogue::{Catalogue, DomainEntry};
use crate::matching::ranker::round2;
use crate::text::{clean_for_matching, ResumeTokens};

pub const KEYWORD_POINTS: f64 = 3.0;
pub const ROLE_MENTION_BONUS: f64 = 10.0;
pub const MAX_RECOMMENDATIONS: usize = 3;
const MIN_CONFIDENCE: f64 = 40.0;
const MAX_CONFIDENCE: f64 = 95.0;
const NO_SIGNAL_CONFIDENCE: f64 = 60.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoleRecommendation {
    pub role: String,
    pub confidence: f64,
    pub matched_skills: Vec<String>,
    pub total_skills_matched: usize,
    pub total_skills_required: usize,
}

/// Resolves a classifier label to a role list and ranks the roles in it.
///
/// The weighted table wins when it knows the label; any other label falls back to the
/// matching catalogue, whose roles carry unit weights unless the file says otherwise.
pub struct RoleRecommender {
    weighted: Catalogue,
    catalogue: Arc<Catalogue>,
}

impl RoleRecommender {
    pub fn new(weighted: Catalogue, catalogue: Arc<Catalogue>) -> Self {
        Self {
            weighted,
            catalogue,
        }
    }

    pub fn domain_for(&self, label: &str) -> Option<&DomainEntry> {
        self.weighted
            .find_domain(label)
            .or_else(|| self.catalogue.find_domain(label))
    }

    /// Empty when neither table knows `label`.
    pub fn recommend(&self, label: &str, resume_text: &str) -> Vec<RoleRecommendation> {
        self.domain_for(label)
            .map(|domain| recommend_roles(domain, resume_text))
            .unwrap_or_default()
    }
}

/// Recommends the best roles inside one domain.
///
/// A role earns 3 points per keyword found (scaled by the role weight) plus 10 if the
/// role title itself appears. Confidence is relative to the best of the kept roles and
/// clamped to 40–95.
pub fn recommend_roles(domain: &DomainEntry, resume_text: &str) -> Vec<RoleRecommendation> {
    let cleaned = clean_for_matching(resume_text);
    let tokens = ResumeTokens::new(&cleaned);

    let mut scored: Vec<(f64, RoleRecommendation)> = domain
        .roles
        .iter()
        .map(|role| {
            let matched_skills: Vec<String> = role
                .keywords
                .iter()
                .filter(|k| tokens.contains_phrase(&clean_for_matching(k)))
                .cloned()
                .collect();

            let mut score = matched_skills.len() as f64 * KEYWORD_POINTS * role.weight;
            if tokens.contains_phrase(&clean_for_matching(&role.name)) {
                score += ROLE_MENTION_BONUS;
            }

            (
                score,
                RoleRecommendation {
                    role: role.name.clone(),
                    confidence: 0.0,
                    total_skills_matched: matched_skills.len(),
                    total_skills_required: role.keywords.len(),
                    matched_skills,
                },
            )
        })
        .collect();

    // stable: ties keep catalogue order
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.truncate(MAX_RECOMMENDATIONS);

    let max_score = scored.iter().map(|(s, _)| *s).fold(0.0, f64::max);
    scored
        .into_iter()
        .map(|(score, mut rec)| {
            let confidence = if max_score > 0.0 {
                (score / max_score.max(1.0) * 100.0).min(MAX_CONFIDENCE)
            } else {
                NO_SIGNAL_CONFIDENCE
            };
            rec.confidence = round2(confidence.max(MIN_CONFIDENCE));
            rec
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::RoleEntry;

    fn role(name: &str, keywords: &[&str], weight: f64) -> RoleEntry {
        RoleEntry {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            weight,
        }
    }

    fn hr_domain() -> DomainEntry {
        DomainEntry {
            name: "HR".to_string(),
            roles: vec![
                role(
                    "HR Manager",
                    &["human resources", "recruitment", "employee relations"],
                    1.0,
                ),
                role(
                    "Technical Recruiter",
                    &["recruitment", "talent acquisition", "sourcing"],
                    0.9,
                ),
                role("Payroll Specialist", &["payroll", "compensation"], 1.0),
                role("Trainer", &["training"], 1.0),
            ],
        }
    }

    #[test]
    fn test_ranks_and_scales_confidence() {
        let recs = recommend_roles(
            &hr_domain(),
            "Recruitment lead: talent acquisition and sourcing for engineering teams",
        );
        assert_eq!(recs.len(), MAX_RECOMMENDATIONS);
        assert_eq!(recs[0].role, "Technical Recruiter");
        assert_eq!(recs[0].total_skills_matched, 3);
        assert_eq!(recs[0].total_skills_required, 3);
        // best role is capped at 95
        assert_eq!(recs[0].confidence, 95.0);
        // 3 / 8.1 * 100 = 37.04 → floored at 40
        assert_eq!(recs[1].role, "HR Manager");
        assert_eq!(recs[1].confidence, 40.0);
    }

    #[test]
    fn test_lower_weight_loses_equal_hits() {
        let domain = DomainEntry {
            name: "IT".to_string(),
            roles: vec![
                role("DevOps Engineer", &["linux", "docker"], 0.8),
                role("Platform Engineer", &["linux", "docker"], 1.0),
            ],
        };
        let recs = recommend_roles(&domain, "Built docker images on linux build hosts");
        assert_eq!(recs[0].role, "Platform Engineer");
        assert_eq!(recs[1].role, "DevOps Engineer");
        assert_eq!(recs[0].total_skills_matched, recs[1].total_skills_matched);
        // 4.8 / 6.0 * 100
        assert_eq!(recs[1].confidence, 80.0);
    }

    #[test]
    fn test_recommender_prefers_weighted_table() {
        let recommender = RoleRecommender::new(
            Catalogue::recommendation_table().unwrap(),
            Arc::new(Catalogue::builtin().unwrap()),
        );

        let it = recommender.domain_for("INFORMATION-TECHNOLOGY").unwrap();
        assert_eq!(it.roles.len(), 5);
        assert_eq!(it.roles[3].weight, 0.85);

        let recs = recommender.recommend(
            "MARKETING",
            "Digital marketing lead owning SEO, SEM and social media with Google Analytics",
        );
        assert_eq!(recs[0].role, "Digital Marketing Manager");
        assert_eq!(recs[0].total_skills_matched, 5);

        // labels missing from the weighted table use the catalogue
        assert_eq!(recommender.domain_for("CHEF").unwrap().name, "Chef");
        assert!(recommender.recommend("ASTROLOGY", "reads charts daily").is_empty());
    }

    #[test]
    fn test_role_title_bonus() {
        let recs = recommend_roles(&hr_domain(), "Experienced trainer running workshops");
        assert_eq!(recs[0].role, "Trainer");
        assert_eq!(recs[0].matched_skills, Vec::<String>::new());
        assert_eq!(recs[0].confidence, 95.0);
    }

    #[test]
    fn test_no_signal_gives_flat_confidence() {
        let recs = recommend_roles(&hr_domain(), "Pastry chef with baking experience");
        assert_eq!(recs.len(), 3);
        assert!(recs.iter().all(|r| r.confidence == 60.0));
        // ties keep catalogue order
        assert_eq!(recs[0].role, "HR Manager");
    }
}
