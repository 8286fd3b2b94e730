use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use serde_json::json;
use shared::client::RoleQuery;
use shared::models::{Company, CompanyCreate, CompanyUpdate};
use shared::util::today;

use super::{ListQuery, Reply, created, not_found, ok, to_values};
use crate::state::MockState;

pub async fn list(State(state): State<Arc<MockState>>, Query(query): Query<ListQuery>) -> Reply {
    let store = state.store.read().await;
    let companies = query.apply(store.companies.clone(), |c| c.company_name.clone().unwrap_or_default());
    ok(json!({ "data": to_values(&companies), "success": true }))
}

pub async fn create(State(state): State<Arc<MockState>>, Json(req): Json<CompanyCreate>) -> Reply {
    let mut store = state.store.write().await;
    let company = Company {
        id: Some(store.next_id()),
        company_name: Some(req.company_name),
        company_code: Some(req.company_code),
        email: Some(req.email),
        address: Some(req.address),
        no_of_employee: Some(req.no_of_employee),
        no_of_restraunt: req.no_of_restraunt.trim().parse().ok(),
        roleid: Some(req.roleid),
        status: Some("active".to_string()),
        createddate: Some(today()),
        updateddate: None,
    };
    store.companies.push(company.clone());
    created(json!({ "message": "Company created", "data": company }))
}

pub async fn update(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    Json(req): Json<CompanyUpdate>,
) -> Reply {
    let mut store = state.store.write().await;
    let Some(company) = store
        .companies
        .iter_mut()
        .find(|c| c.id.as_deref() == Some(id.as_str()))
    else {
        return not_found("Company");
    };
    if req.name.is_some() {
        company.company_name = req.name;
    }
    if req.email.is_some() {
        company.email = req.email;
    }
    company.updateddate = Some(today());
    ok(json!({ "message": "Company updated", "success": true }))
}

/// `{ "roles": [...] }`; the body's `params` window the list
pub async fn roles(State(state): State<Arc<MockState>>, Json(req): Json<RoleQuery>) -> Reply {
    let store = state.store.read().await;
    let query = ListQuery {
        start: Some(req.params.start as usize),
        limit: Some(req.params.limit as usize),
        search: Some(req.params.search),
    };
    let roles = query.apply(store.roles.clone(), |r| r.role_name.clone().unwrap_or_default());
    ok(json!({ "roles": to_values(&roles) }))
}
