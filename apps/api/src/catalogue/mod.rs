//! Role catalogue: the static (domain, role, keywords) table the matcher ranks against.
//!
//! The default table ships inside the binary (`data/roles.json`). Deployments may point
//! `CATALOGUE_PATH` at another file with the same shape.
//!
//! A second, smaller table in the same shape (`data/domain_roles.json`) carries the
//! weighted roles the within-domain recommender prefers for the classifier's labels.

pub mod handlers;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::text::clean_for_matching;

const BUILTIN_CATALOGUE: &str = include_str!("../../data/roles.json");
const BUILTIN_RECOMMENDATIONS: &str = include_str!("../../data/domain_roles.json");

#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("failed to read catalogue file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid catalogue JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid catalogue: {0}")]
    Invalid(String),
}

fn default_weight() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleEntry {
    pub name: String,
    pub keywords: Vec<String>,
    /// Multiplier applied by the within-domain recommender.
    #[serde(default = "default_weight")]
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEntry {
    pub name: String,
    pub roles: Vec<RoleEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalogue {
    pub domains: Vec<DomainEntry>,
}

/// A role together with the domain it belongs to. Role names repeat across domains,
/// so the pair is the identity.
#[derive(Debug, Clone, Copy)]
pub struct RoleRef<'a> {
    pub domain: &'a str,
    pub role: &'a RoleEntry,
}

/// Canonical form used to compare domain labels coming from different sources
/// ("INFORMATION-TECHNOLOGY", "Information Technology", "information_technology").
pub fn domain_key(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

impl Catalogue {
    /// The catalogue compiled into the binary.
    pub fn builtin() -> Result<Self, CatalogueError> {
        Self::from_json(BUILTIN_CATALOGUE)
    }

    /// Weighted roles keyed by classifier label, compiled into the binary.
    pub fn recommendation_table() -> Result<Self, CatalogueError> {
        Self::from_json(BUILTIN_RECOMMENDATIONS)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogueError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogueError> {
        let mut catalogue: Catalogue = serde_json::from_str(raw)?;
        for domain in &mut catalogue.domains {
            for role in &mut domain.roles {
                for keyword in &mut role.keywords {
                    *keyword = keyword.trim().to_lowercase();
                }
            }
        }
        catalogue.validate()?;
        Ok(catalogue)
    }

    pub fn validate(&self) -> Result<(), CatalogueError> {
        if self.domains.is_empty() {
            return Err(CatalogueError::Invalid("no domains defined".to_string()));
        }

        let mut seen = std::collections::HashSet::new();
        for domain in &self.domains {
            if domain.name.trim().is_empty() {
                return Err(CatalogueError::Invalid("domain with empty name".to_string()));
            }
            if domain.roles.is_empty() {
                return Err(CatalogueError::Invalid(format!(
                    "domain '{}' has no roles",
                    domain.name
                )));
            }
            for role in &domain.roles {
                if !seen.insert((domain_key(&domain.name), role.name.to_lowercase())) {
                    return Err(CatalogueError::Invalid(format!(
                        "duplicate role '{}' in domain '{}'",
                        role.name, domain.name
                    )));
                }
                if role.keywords.is_empty() {
                    return Err(CatalogueError::Invalid(format!(
                        "role '{}' in domain '{}' has no keywords",
                        role.name, domain.name
                    )));
                }
                if let Some(bad) = role
                    .keywords
                    .iter()
                    .find(|k| clean_for_matching(k).is_empty())
                {
                    return Err(CatalogueError::Invalid(format!(
                        "role '{}' has keyword '{bad}' with no letters",
                        role.name
                    )));
                }
                if !(role.weight.is_finite() && role.weight > 0.0) {
                    return Err(CatalogueError::Invalid(format!(
                        "role '{}' has non-positive weight",
                        role.name
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn domain_names(&self) -> Vec<&str> {
        self.domains.iter().map(|d| d.name.as_str()).collect()
    }

    pub fn find_domain(&self, name: &str) -> Option<&DomainEntry> {
        let key = domain_key(name);
        if key.is_empty() {
            return None;
        }
        self.domains.iter().find(|d| domain_key(&d.name) == key)
    }

    /// Every occurrence of a role name (case-insensitive), in catalogue order.
    pub fn find_role(&self, name: &str) -> Vec<RoleRef<'_>> {
        let wanted = name.trim().to_lowercase();
        self.iter_roles()
            .filter(|r| r.role.name.to_lowercase() == wanted)
            .collect()
    }

    pub fn iter_roles(&self) -> impl Iterator<Item = RoleRef<'_>> {
        self.domains.iter().flat_map(|d| {
            d.roles.iter().map(move |role| RoleRef {
                domain: d.name.as_str(),
                role,
            })
        })
    }

    pub fn role_count(&self) -> usize {
        self.domains.iter().map(|d| d.roles.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalogue_loads() {
        let catalogue = Catalogue::builtin().unwrap();
        assert_eq!(catalogue.domains.len(), 24);
        assert_eq!(catalogue.role_count(), 240);
        assert!(catalogue.domains.iter().all(|d| d.roles.len() == 10));
    }

    #[test]
    fn test_recommendation_table_loads() {
        let table = Catalogue::recommendation_table().unwrap();
        assert_eq!(table.domains.len(), 7);
        let it = table.find_domain("INFORMATION-TECHNOLOGY").unwrap();
        assert_eq!(it.roles[0].name, "Software Engineer");
        assert_eq!(it.roles[0].weight, 1.0);
        assert_eq!(it.roles[1].weight, 0.9);
        assert_eq!(it.roles[4].name, "DevOps Engineer");
        assert_eq!(it.roles[4].weight, 0.8);
        let marketing = table.find_domain("MARKETING").unwrap();
        assert_eq!(marketing.roles[0].name, "Digital Marketing Manager");
    }

    #[test]
    fn test_find_domain_normalizes_labels() {
        let catalogue = Catalogue::builtin().unwrap();
        let domain = catalogue.find_domain("INFORMATION-TECHNOLOGY").unwrap();
        assert_eq!(domain.name, "Information-Technology");
        assert!(catalogue.find_domain("information technology").is_some());
        assert!(catalogue.find_domain("Astrology").is_none());
        assert!(catalogue.find_domain("--").is_none());
    }

    #[test]
    fn test_duplicate_role_names_are_kept_per_domain() {
        let catalogue = Catalogue::builtin().unwrap();
        let refs = catalogue.find_role("operations manager");
        let domains: Vec<&str> = refs.iter().map(|r| r.domain).collect();
        assert_eq!(domains, vec!["Business-Development", "BPO", "Banking"]);
    }

    #[test]
    fn test_iter_roles_in_catalogue_order() {
        let catalogue = Catalogue::builtin().unwrap();
        let first = catalogue.iter_roles().next().unwrap();
        assert_eq!(first.domain, "HR");
        assert_eq!(first.role.name, "HR Manager");
        assert_eq!(catalogue.iter_roles().count(), catalogue.role_count());
    }

    #[test]
    fn test_weight_defaults_to_one() {
        let catalogue = Catalogue::from_json(
            r#"{"domains":[{"name":"X","roles":[{"name":"R","keywords":["Rust"]}]}]}"#,
        )
        .unwrap();
        assert_eq!(catalogue.domains[0].roles[0].weight, 1.0);
        assert_eq!(catalogue.domains[0].roles[0].keywords, vec!["rust"]);
    }

    #[test]
    fn test_rejects_duplicate_roles() {
        let err = Catalogue::from_json(
            r#"{"domains":[{"name":"X","roles":[
                {"name":"R","keywords":["a"]},
                {"name":"r","keywords":["b"]}
            ]}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate role"));
    }

    #[test]
    fn test_rejects_empty_keywords_and_domains() {
        assert!(Catalogue::from_json(r#"{"domains":[]}"#).is_err());
        assert!(Catalogue::from_json(
            r#"{"domains":[{"name":"X","roles":[{"name":"R","keywords":[]}]}]}"#
        )
        .is_err());
        assert!(Catalogue::from_json(
            r#"{"domains":[{"name":"X","roles":[{"name":"R","keywords":["123"]}]}]}"#
        )
        .is_err());
    }

    #[test]
    fn test_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roles.json");
        std::fs::write(
            &path,
            r#"{"domains":[{"name":"Ops","roles":[{"name":"SRE","keywords":["linux"],"weight":0.8}]}]}"#,
        )
        .unwrap();
        let catalogue = Catalogue::from_path(&path).unwrap();
        assert_eq!(catalogue.role_count(), 1);
        assert_eq!(catalogue.domains[0].roles[0].weight, 0.8);
    }
}
