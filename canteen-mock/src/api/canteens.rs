use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use serde_json::{Value, json};
use shared::models::{Canteen, CanteenCreate, CanteenUpdate};
use shared::util::today;

use super::{ListQuery, Reply, created, not_found, ok, to_values};
use crate::state::MockState;

async fn page(state: &MockState, query: &ListQuery) -> Vec<Value> {
    let store = state.store.read().await;
    let canteens = query.apply(store.canteens.clone(), |c| c.canteen_name.clone().unwrap_or_default());
    to_values(&canteens)
}

/// `{ "data": [...] }`
pub async fn list(State(state): State<Arc<MockState>>, Query(query): Query<ListQuery>) -> Reply {
    ok(json!({ "data": page(&state, &query).await }))
}

/// Bare array
pub async fn list_bare(State(state): State<Arc<MockState>>, Query(query): Query<ListQuery>) -> Reply {
    ok(Value::Array(page(&state, &query).await))
}

pub async fn create(State(state): State<Arc<MockState>>, Json(req): Json<CanteenCreate>) -> Reply {
    let mut store = state.store.write().await;
    let id = store.next_id();
    let canteen = Canteen {
        canteenid: Some(id.clone()),
        canteen_name: Some(req.canteen_name),
        email: Some(req.email),
        address: Some(req.address),
        slug: Some(req.slug),
        roleid: Some(req.roleid),
        is_active: Some(true),
        createddate: Some(today()),
        ..Default::default()
    };
    store.canteens.push(canteen.clone());
    created(json!({ "message": "Canteen created", "canteenid": id, "data": canteen }))
}

pub async fn update(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    Json(req): Json<CanteenUpdate>,
) -> Reply {
    let mut store = state.store.write().await;
    let Some(canteen) = store
        .canteens
        .iter_mut()
        .find(|c| c.canteenid.as_deref() == Some(id.as_str()))
    else {
        return not_found("Canteen");
    };
    if req.canteen_name.is_some() {
        canteen.canteen_name = req.canteen_name;
    }
    if req.email.is_some() {
        canteen.email = req.email;
    }
    if req.address.is_some() {
        canteen.address = req.address;
    }
    if req.phone.is_some() {
        canteen.phone = req.phone;
    }
    if req.is_active.is_some() {
        canteen.is_active = req.is_active;
    }
    canteen.updateddate = Some(today());
    ok(json!({ "message": "Canteen updated", "success": true }))
}

pub async fn remove(State(state): State<Arc<MockState>>, Path(id): Path<String>) -> Reply {
    let mut store = state.store.write().await;
    let before = store.canteens.len();
    store.canteens.retain(|c| c.canteenid.as_deref() != Some(id.as_str()));
    if store.canteens.len() == before {
        return not_found("Canteen");
    }
    ok(json!({ "message": "Canteen deleted", "success": true }))
}
