use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use serde_json::json;
use shared::models::{MenuItem, MenuItemWrite};
use shared::util::today;

use super::{ListQuery, Reply, created, not_found, ok, to_values};
use crate::state::MockState;

fn apply(item: &mut MenuItem, req: MenuItemWrite) {
    item.name = Some(req.name);
    item.description = Some(req.description);
    item.price = Some(req.price);
    item.image = Some(req.image);
    item.category_id = Some(req.category_id);
    item.subcategory_id = Some(req.subcategory_id);
    item.canteen_id = Some(req.canteen_id);
    item.status = Some(req.status);
}

pub async fn list(State(state): State<Arc<MockState>>, Query(query): Query<ListQuery>) -> Reply {
    let store = state.store.read().await;
    let items = query.apply(store.menu_items.clone(), |m| m.name.clone().unwrap_or_default());
    ok(json!({ "data": to_values(&items) }))
}

pub async fn create(State(state): State<Arc<MockState>>, Json(req): Json<MenuItemWrite>) -> Reply {
    let mut store = state.store.write().await;
    let mut item = MenuItem {
        id: Some(store.next_id()),
        createddate: Some(today()),
        ..Default::default()
    };
    apply(&mut item, req);
    store.menu_items.push(item.clone());
    created(json!({ "message": "Menu item created", "data": item }))
}

pub async fn update(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    Json(req): Json<MenuItemWrite>,
) -> Reply {
    let mut store = state.store.write().await;
    let Some(item) = store
        .menu_items
        .iter_mut()
        .find(|m| m.id.as_deref() == Some(id.as_str()))
    else {
        return not_found("Menu item");
    };
    apply(item, req);
    ok(json!({ "message": "Menu item updated", "success": true }))
}

pub async fn remove(State(state): State<Arc<MockState>>, Path(id): Path<String>) -> Reply {
    let mut store = state.store.write().await;
    let before = store.menu_items.len();
    store.menu_items.retain(|m| m.id.as_deref() != Some(id.as_str()));
    if store.menu_items.len() == before {
        return not_found("Menu item");
    }
    ok(json!({ "message": "Menu item deleted", "success": true }))
}
