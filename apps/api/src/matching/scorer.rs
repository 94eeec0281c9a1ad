//! Role scoring: a pluggable scorer measuring how well a cleaned resume covers a role's
//! keyword list.
//!
//! Default: `KeywordRoleScorer` (Jaccard overlap blended with keyword coverage).
//! The matcher holds an `Arc<dyn RoleScorer>`, so a different backend can be swapped in
//! at startup without touching the ranker or the handlers.

use crate::text::ResumeTokens;

/// Weight of the Jaccard term in the blended score; coverage takes the rest.
pub const JACCARD_WEIGHT: f64 = 0.4;
pub const COVERAGE_WEIGHT: f64 = 0.6;

/// Score of one role against one resume.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordScore {
    /// 0.0 – 1.0
    pub score: f64,
    /// Indices into the role's keyword list, in list order.
    pub matched: Vec<usize>,
}

impl KeywordScore {
    pub fn zero() -> Self {
        Self {
            score: 0.0,
            matched: Vec::new(),
        }
    }
}

pub trait RoleScorer: Send + Sync {
    /// Short label reported alongside results.
    fn backend(&self) -> &'static str;

    /// `keywords` are already cleaned with the same rules as the resume text.
    fn score(&self, resume: &ResumeTokens<'_>, keywords: &[String]) -> KeywordScore;
}

/// Keyword-overlap scorer.
///
/// Algorithm:
/// 1. matched = keywords found in the resume as whole-word phrases
/// 2. jaccard = |matched| / (|resume words| + |keywords| - |matched|)
/// 3. coverage = |matched| / |keywords|
/// 4. score = min(0.4 × jaccard + 0.6 × coverage, 1.0)
pub struct KeywordRoleScorer;

impl RoleScorer for KeywordRoleScorer {
    fn backend(&self) -> &'static str {
        "keyword"
    }

    fn score(&self, resume: &ResumeTokens<'_>, keywords: &[String]) -> KeywordScore {
        if resume.is_empty() || keywords.is_empty() {
            return KeywordScore::zero();
        }

        let matched: Vec<usize> = keywords
            .iter()
            .enumerate()
            .filter(|(_, k)| resume.contains_phrase(k))
            .map(|(i, _)| i)
            .collect();

        let hits = matched.len() as f64;
        let union = (resume.unique_count() + keywords.len()) as f64 - hits;
        if union <= 0.0 {
            return KeywordScore::zero();
        }

        let jaccard = hits / union;
        let coverage = hits / keywords.len() as f64;
        let score = (JACCARD_WEIGHT * jaccard + COVERAGE_WEIGHT * coverage).min(1.0);

        KeywordScore { score, matched }
    }
}
