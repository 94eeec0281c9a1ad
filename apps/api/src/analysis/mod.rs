//! Full resume analysis: classifier domain, recommended roles inside that domain, and
//! a skill inventory.

pub mod handlers;
pub mod recommend;
pub mod skills;

use serde::{Deserialize, Serialize};

use crate::classifier::{DomainClassifier, DomainPrediction};

use recommend::{RoleRecommendation, RoleRecommender};
use skills::{analyze_skills, SkillsAnalysis};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    pub domain_prediction: DomainPrediction,
    /// Empty when no role table knows the predicted domain.
    pub role_recommendations: Vec<RoleRecommendation>,
    pub skills_analysis: SkillsAnalysis,
}

pub fn full_analysis(
    classifier: &DomainClassifier,
    recommender: &RoleRecommender,
    text: &str,
) -> ResumeAnalysis {
    let domain_prediction = classifier.predict(text);
    let role_recommendations = recommender.recommend(&domain_prediction.primary_domain, text);

    ResumeAnalysis {
        domain_prediction,
        role_recommendations,
        skills_analysis: analyze_skills(text),
    }
}
