//! Skill inventories.
//!
//! Two fixed taxonomies: a coarse four-bucket summary used in the analysis report, and
//! the finer ten-category list reported when a file is parsed. Skills are matched as
//! whole words or contiguous phrases, so `java` does not match inside `javascript`.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::text::ResumeTokens;

pub const ANALYSIS_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Technical Skills",
        &[
            "python",
            "java",
            "javascript",
            "sql",
            "aws",
            "docker",
            "react",
            "node.js",
            "machine learning",
        ],
    ),
    (
        "Soft Skills",
        &[
            "leadership",
            "communication",
            "teamwork",
            "problem solving",
            "project management",
        ],
    ),
    (
        "Tools & Technologies",
        &["git", "jenkins", "tableau", "power bi", "jira", "confluence"],
    ),
    (
        "Domain Knowledge",
        &[
            "financial analysis",
            "medical",
            "legal",
            "marketing",
            "engineering design",
        ],
    ),
];

pub const PARSER_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "programming",
        &[
            "python", "java", "javascript", "c++", "c#", "sql", "html", "css", "react", "angular",
            "vue", "node", "typescript",
        ],
    ),
    (
        "data_science",
        &[
            "machine learning",
            "data analysis",
            "statistics",
            "tensorflow",
            "pytorch",
            "pandas",
            "numpy",
            "sql",
            "tableau",
            "power bi",
        ],
    ),
    (
        "cloud_devops",
        &[
            "aws",
            "azure",
            "google cloud",
            "docker",
            "kubernetes",
            "jenkins",
            "terraform",
            "ci/cd",
            "devops",
        ],
    ),
    (
        "databases",
        &["mysql", "postgresql", "mongodb", "redis", "oracle", "sql server"],
    ),
    (
        "tools",
        &["git", "jira", "confluence", "slack", "docker", "jenkins"],
    ),
    (
        "soft_skills",
        &[
            "leadership",
            "communication",
            "teamwork",
            "problem solving",
            "project management",
            "agile",
            "scrum",
        ],
    ),
    (
        "finance",
        &[
            "financial analysis",
            "accounting",
            "cpa",
            "gaap",
            "quickbooks",
            "tax preparation",
            "auditing",
        ],
    ),
    (
        "healthcare",
        &[
            "patient care",
            "medical",
            "nursing",
            "healthcare",
            "clinical",
            "pharmacy",
            "healthcare administration",
        ],
    ),
    (
        "marketing",
        &[
            "digital marketing",
            "seo",
            "sem",
            "social media",
            "content marketing",
            "google analytics",
        ],
    ),
    (
        "design",
        &[
            "ui/ux",
            "figma",
            "adobe creative suite",
            "graphic design",
            "web design",
        ],
    ),
];

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SkillsAnalysis {
    pub total_skills_identified: usize,
    pub skill_categories: BTreeMap<String, Vec<String>>,
}

fn skill_noise() -> &'static Regex {
    static NOISE: OnceLock<Regex> = OnceLock::new();
    NOISE.get_or_init(|| Regex::new(r"[^a-z0-9+#./\s]").expect("valid skill noise pattern"))
}

/// Lowercases and tokenizes while keeping the symbols skill names use (`c++`, `c#`,
/// `node.js`, `ci/cd`). Slash compounds are also emitted as their separate parts.
pub fn clean_for_skills(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = skill_noise().replace_all(&lowered, " ");

    let mut out: Vec<&str> = Vec::new();
    for token in stripped.split_whitespace() {
        let token = token.trim_matches('.');
        if token.is_empty() {
            continue;
        }
        out.push(token);
        if token.contains('/') {
            out.extend(token.split('/').filter(|p| !p.is_empty()));
        }
    }
    out.join(" ")
}

fn match_categories(
    text: &str,
    categories: &[(&str, &[&str])],
    present: impl Fn(&str) -> String,
) -> BTreeMap<String, Vec<String>> {
    let cleaned = clean_for_skills(text);
    let tokens = ResumeTokens::new(&cleaned);

    categories
        .iter()
        .filter_map(|(category, skills)| {
            let found: Vec<String> = skills
                .iter()
                .filter(|skill| tokens.contains_phrase(skill))
                .map(|skill| present(skill))
                .collect();
            (!found.is_empty()).then(|| (category.to_string(), found))
        })
        .collect()
}

pub fn analyze_skills(text: &str) -> SkillsAnalysis {
    let skill_categories = match_categories(text, ANALYSIS_CATEGORIES, str::to_string);
    SkillsAnalysis {
        total_skills_identified: skill_categories.values().map(Vec::len).sum(),
        skill_categories,
    }
}

/// Skills found per parser category, Title Cased. Empty categories are omitted.
pub fn extract_skills(text: &str) -> BTreeMap<String, Vec<String>> {
    match_categories(text, PARSER_CATEGORIES, title_case)
}

/// Uppercases the first letter of every alphabetic run: `node.js` → `Node.Js`,
/// `ui/ux` → `Ui/Ux`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
