//! Keyword role matching: ranks every catalogue role against a resume, infers a domain
//! from the top hits, and explains which keywords drove each score.
//!
//! Default scorer: `KeywordRoleScorer`. Default top-K: 3 (`DEFAULT_TOP_K`).

pub mod demo;
pub mod evaluation;
pub mod explain;
pub mod handlers;
pub mod ranker;
pub mod scorer;
