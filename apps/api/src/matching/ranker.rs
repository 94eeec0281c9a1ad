use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalogue::{Catalogue, RoleRef};
use crate::matching::explain::{explain_keywords, Explanation};
use crate::matching::scorer::{KeywordScore, RoleScorer};
use crate::text::{clean_for_matching, ResumeTokens};

/// Resumes with fewer cleaned words than this are not ranked.
pub const MIN_RESUME_WORDS: usize = 5;
pub const UNKNOWN_DOMAIN: &str = "Unknown";
/// How many matched keywords a ranked role reports.
pub const MAX_MATCHING_KEYWORDS: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedRole {
    pub job_role: String,
    pub domain: String,
    /// Percentage, two decimals.
    pub match_score: f64,
    pub matching_keywords: Vec<String>,
    pub explanation: Explanation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub predicted_domain: String,
    pub top_roles: Vec<RankedRole>,
    pub scorer_backend: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleExplanation {
    pub role_name: String,
    pub domain: String,
    pub match_score: f64,
    pub explanation: Explanation,
}

/// A catalogue role with its keywords pre-cleaned, indices aligned with the
/// catalogue keyword list.
struct PreparedRole {
    domain: usize,
    role: usize,
    phrases: Vec<String>,
}

/// Ranks every catalogue role against a resume and infers a domain from the top hits.
pub struct RoleMatcher {
    catalogue: Arc<Catalogue>,
    prepared: Vec<PreparedRole>,
    scorer: Arc<dyn RoleScorer>,
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl RoleMatcher {
    pub fn new(catalogue: Arc<Catalogue>, scorer: Arc<dyn RoleScorer>) -> Self {
        let prepared = catalogue
            .domains
            .iter()
            .enumerate()
            .flat_map(|(d, domain)| {
                domain.roles.iter().enumerate().map(move |(r, role)| PreparedRole {
                    domain: d,
                    role: r,
                    phrases: role.keywords.iter().map(|k| clean_for_matching(k)).collect(),
                })
            })
            .collect();

        Self {
            catalogue,
            prepared,
            scorer,
        }
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn scorer_backend(&self) -> &'static str {
        self.scorer.backend()
    }

    fn role_ref(&self, prepared: &PreparedRole) -> RoleRef<'_> {
        let domain = &self.catalogue.domains[prepared.domain];
        RoleRef {
            domain: domain.name.as_str(),
            role: &domain.roles[prepared.role],
        }
    }

    /// Ranks all roles for `resume_text` and keeps the best `top_k`
    /// (clamped to `1..=role_count`).
    pub fn rank(&self, resume_text: &str, top_k: usize) -> MatchOutcome {
        let cleaned = clean_for_matching(resume_text);
        let tokens = ResumeTokens::new(&cleaned);

        if tokens.word_count() < MIN_RESUME_WORDS {
            debug!(words = tokens.word_count(), "Resume too short to rank");
            return MatchOutcome {
                predicted_domain: UNKNOWN_DOMAIN.to_string(),
                top_roles: Vec::new(),
                scorer_backend: self.scorer_backend().to_string(),
            };
        }

        let mut scored: Vec<(&PreparedRole, KeywordScore)> = self
            .prepared
            .iter()
            .map(|p| (p, self.scorer.score(&tokens, &p.phrases)))
            .collect();

        // stable: equal scores keep catalogue order
        scored.sort_by(|a, b| b.1.score.total_cmp(&a.1.score));

        let k = top_k.clamp(1, self.prepared.len().max(1));
        let top_roles: Vec<RankedRole> = scored
            .into_iter()
            .take(k)
            .map(|(prepared, score)| {
                let role = self.role_ref(prepared);
                RankedRole {
                    job_role: role.role.name.clone(),
                    domain: role.domain.to_string(),
                    match_score: round2(score.score * 100.0),
                    matching_keywords: score
                        .matched
                        .iter()
                        .take(MAX_MATCHING_KEYWORDS)
                        .map(|&i| role.role.keywords[i].clone())
                        .collect(),
                    explanation: explain_keywords(&role.role.keywords, &score.matched),
                }
            })
            .collect();

        let predicted_domain = predict_domain_from_roles(&top_roles);
        debug!(
            predicted_domain = %predicted_domain,
            top_k = k,
            "Ranked catalogue roles"
        );

        MatchOutcome {
            predicted_domain,
            top_roles,
            scorer_backend: self.scorer_backend().to_string(),
        }
    }

    /// Explains how a single named role scores against the resume. When the role name
    /// exists in several domains and `domain` is not given, the first occurrence wins.
    pub fn explain(
        &self,
        resume_text: &str,
        role_name: &str,
        domain: Option<&str>,
    ) -> Option<RoleExplanation> {
        let wanted_role = role_name.trim().to_lowercase();
        let wanted_domain = domain.and_then(|d| self.catalogue.find_domain(d));
        if domain.is_some() && wanted_domain.is_none() {
            return None;
        }

        let prepared = self.prepared.iter().find(|p| {
            let role = self.role_ref(p);
            role.role.name.to_lowercase() == wanted_role
                && wanted_domain.map_or(true, |d| d.name == role.domain)
        })?;

        let cleaned = clean_for_matching(resume_text);
        let tokens = ResumeTokens::new(&cleaned);
        let score = self.scorer.score(&tokens, &prepared.phrases);
        let role = self.role_ref(prepared);

        Some(RoleExplanation {
            role_name: role.role.name.clone(),
            domain: role.domain.to_string(),
            match_score: round2(score.score * 100.0),
            explanation: explain_keywords(&role.role.keywords, &score.matched),
        })
    }
}

/// Majority vote over the domains of the ranked roles. Ties go to the domain that
/// appears first in rank order.
pub fn predict_domain_from_roles(roles: &[RankedRole]) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for role in roles {
        if role.domain.is_empty() {
            continue;
        }
        match counts.iter_mut().find(|(d, _)| *d == role.domain) {
            Some((_, n)) => *n += 1,
            None => counts.push((role.domain.as_str(), 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (domain, count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((domain, count));
        }
    }

    best.map(|(d, _)| d.to_string())
        .unwrap_or_else(|| UNKNOWN_DOMAIN.to_string())
}
