//! Axum route handlers for browsing the role catalogue.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DomainsResponse {
    /// Catalogue domain names, in catalogue order.
    pub domains: Vec<String>,
    pub total_domains: usize,
    pub total_roles: usize,
    /// Labels known to the trained classifier; empty until a model is trained.
    pub classifier_domains: Vec<String>,
    pub available_roles: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct DomainRolesResponse {
    pub domain: String,
    pub roles: Vec<String>,
    pub total_roles: usize,
}

#[derive(Debug, Serialize)]
pub struct RoleOccurrence {
    pub domain: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RoleDetailResponse {
    pub role_name: String,
    /// A role name may exist in several domains.
    pub occurrences: Vec<RoleOccurrence>,
}

/// GET /api/v1/domains
pub async fn handle_list_domains(State(state): State<AppState>) -> Json<DomainsResponse> {
    let catalogue = &state.catalogue;
    let classifier_domains = state
        .classifier
        .read()
        .await
        .as_ref()
        .map(|c| c.labels().to_vec())
        .unwrap_or_default();

    Json(DomainsResponse {
        domains: catalogue.domain_names().into_iter().map(String::from).collect(),
        total_domains: catalogue.domains.len(),
        total_roles: catalogue.role_count(),
        classifier_domains,
        available_roles: catalogue
            .domains
            .iter()
            .map(|d| {
                (
                    d.name.clone(),
                    d.roles.iter().map(|r| r.name.clone()).collect(),
                )
            })
            .collect(),
    })
}

/// GET /api/v1/domains/:domain/roles
///
/// Domain lookup ignores case and punctuation, so `information-technology` works.
pub async fn handle_domain_roles(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> Result<Json<DomainRolesResponse>, AppError> {
    let entry = state
        .catalogue
        .find_domain(&domain)
        .ok_or_else(|| AppError::NotFound(format!("Domain '{domain}' not found")))?;

    let roles: Vec<String> = entry.roles.iter().map(|r| r.name.clone()).collect();
    Ok(Json(DomainRolesResponse {
        domain: entry.name.clone(),
        total_roles: roles.len(),
        roles,
    }))
}

/// GET /api/v1/roles/:role
pub async fn handle_role_detail(
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> Result<Json<RoleDetailResponse>, AppError> {
    let found = state.catalogue.find_role(&role);
    let first = found
        .first()
        .ok_or_else(|| AppError::NotFound(format!("Role '{role}' not found")))?;

    Ok(Json(RoleDetailResponse {
        role_name: first.role.name.clone(),
        occurrences: found
            .iter()
            .map(|r| RoleOccurrence {
                domain: r.domain.to_string(),
                keywords: r.role.keywords.clone(),
            })
            .collect(),
    }))
}
