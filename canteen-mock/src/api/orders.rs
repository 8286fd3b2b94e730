use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use serde_json::json;
use shared::models::OrderStatusUpdate;

use super::{Reply, not_found, ok, to_values};
use crate::state::MockState;

/// `{ "orders": [...] }`
pub async fn list(State(state): State<Arc<MockState>>, Path(canteen_id): Path<String>) -> Reply {
    let store = state.store.read().await;
    let orders: Vec<_> = store
        .orders
        .iter()
        .filter(|o| o.canteen_id == canteen_id)
        .map(|o| o.record.clone())
        .collect();
    ok(json!({ "orders": to_values(&orders) }))
}

/// `{ "order": {...} }`
pub async fn show(State(state): State<Arc<MockState>>, Path(id): Path<String>) -> Reply {
    let store = state.store.read().await;
    match store.orders.iter().find(|o| o.record.id.as_deref() == Some(id.as_str())) {
        Some(order) => ok(json!({ "order": order.record })),
        None => not_found("Order"),
    }
}

pub async fn update_status(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    Json(req): Json<OrderStatusUpdate>,
) -> Reply {
    let mut store = state.store.write().await;
    let Some(order) = store
        .orders
        .iter_mut()
        .find(|o| o.record.id.as_deref() == Some(id.as_str()))
    else {
        return not_found("Order");
    };
    order.record.status = Some(req.status.as_backend().to_string());
    ok(json!({ "message": "Order status updated", "success": true }))
}
