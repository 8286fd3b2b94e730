use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use serde_json::json;
use shared::models::{User, UserCreate, UserProfileUpdate};
use shared::util::today;

use super::{ListQuery, Reply, created, not_found, ok, to_values};
use crate::state::MockState;

fn matches(user: &User, id: &str) -> bool {
    user.key() == Some(id)
}

pub async fn list(State(state): State<Arc<MockState>>, Query(query): Query<ListQuery>) -> Reply {
    let store = state.store.read().await;
    let users = query.apply(store.users.clone(), |u| u.name.clone().unwrap_or_default());
    ok(json!({ "data": to_values(&users) }))
}

pub async fn list_by_company(State(state): State<Arc<MockState>>, Path(company_id): Path<String>) -> Reply {
    let store = state.store.read().await;
    let users: Vec<User> = store
        .users
        .iter()
        .filter(|u| u.companyid.as_deref() == Some(company_id.as_str()))
        .cloned()
        .collect();
    ok(json!({ "data": to_values(&users) }))
}

pub async fn create(State(state): State<Arc<MockState>>, Json(req): Json<UserCreate>) -> Reply {
    let mut store = state.store.write().await;
    let user = User {
        user_id: Some(store.next_id()),
        name: Some(req.name),
        email: Some(req.email),
        phonenumber: Some(req.phonenumber),
        empid: Some(req.empid),
        address: Some(req.address),
        companyid: Some(req.companyid),
        wallet_balance: Some(0.0),
        status: Some("active".to_string()),
        createddate: Some(today()),
        ..Default::default()
    };
    store.users.push(user.clone());
    created(json!({ "message": "User created", "data": user }))
}

pub async fn update_profile(
    State(state): State<Arc<MockState>>,
    Path(user_id): Path<String>,
    Json(req): Json<UserProfileUpdate>,
) -> Reply {
    let mut store = state.store.write().await;
    let Some(user) = store.users.iter_mut().find(|u| matches(u, &user_id)) else {
        return not_found("User");
    };
    if req.name.is_some() {
        user.name = req.name;
    }
    if req.phonenumber.is_some() {
        user.phonenumber = req.phonenumber;
    }
    if req.address.is_some() {
        user.address = req.address;
    }
    ok(json!({ "message": "Profile updated", "success": true }))
}

pub async fn remove(State(state): State<Arc<MockState>>, Path(user_id): Path<String>) -> Reply {
    let mut store = state.store.write().await;
    let before = store.users.len();
    store.users.retain(|u| !matches(u, &user_id));
    if store.users.len() == before {
        return not_found("User");
    }
    ok(json!({ "message": "User deleted", "success": true }))
}
