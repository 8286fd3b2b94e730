//! Mock admin API router
//!
//! Every request passes through [`gate`]: it is recorded, answered with an
//! injected failure if one is set for its path, and rejected with 401 unless
//! it carries a valid bearer token (login and health are open).

mod auth;
mod canteens;
mod catalog;
mod companies;
mod menu;
mod orders;
mod users;

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::{MockState, RecordedRequest};

/// Handler reply
pub type Reply = (StatusCode, Json<Value>);

pub fn ok(body: Value) -> Reply {
    (StatusCode::OK, Json(body))
}

pub fn created(body: Value) -> Reply {
    (StatusCode::CREATED, Json(body))
}

pub fn message(status: StatusCode, text: &str) -> Reply {
    (status, Json(json!({ "success": status.is_success(), "message": text })))
}

pub fn not_found(what: &str) -> Reply {
    message(StatusCode::NOT_FOUND, &format!("{what} not found"))
}

/// `start` / `limit` / `search` query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub start: Option<usize>,
    pub limit: Option<usize>,
    pub search: Option<String>,
}

impl ListQuery {
    /// Filter by `search` against `text`, then window by `start`/`limit`
    pub fn apply<T>(&self, items: Vec<T>, text: impl Fn(&T) -> String) -> Vec<T> {
        let needle = self.search.as_deref().unwrap_or_default().trim().to_lowercase();
        items
            .into_iter()
            .filter(|item| needle.is_empty() || text(item).to_lowercase().contains(&needle))
            .skip(self.start.unwrap_or(0))
            .take(self.limit.unwrap_or(usize::MAX))
            .collect()
    }
}

/// Serialize records, dropping any that fail
pub fn to_values<T: serde::Serialize>(items: &[T]) -> Vec<Value> {
    items.iter().filter_map(|item| serde_json::to_value(item).ok()).collect()
}

const OPEN_PATHS: &[&str] = &["/adminUser/login", "/health"];

async fn gate(State(state): State<Arc<MockState>>, request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .is_some_and(|token| state.verify_token(token).is_some());

    state.record(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        authorized,
    });

    if let Some(status) = state.injected_failure(&path) {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        tracing::debug!(%method, %path, %status, "Injected failure");
        return message(status, "Injected failure").into_response();
    }

    if !authorized && !OPEN_PATHS.contains(&path.as_str()) {
        return message(StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
    }

    next.run(request).await
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/adminUser/login", post(auth::login))
        // Users
        .route("/user/getAllUsers", get(users::list))
        .route("/user/getAllUserByCompanyId/{company_id}", get(users::list_by_company))
        .route("/user/createUser", post(users::create))
        .route("/user/updateUserProfile/{user_id}", put(users::update_profile))
        .route("/user/deleteUser/{user_id}", delete(users::remove))
        // Canteens
        .route("/canteen/getAllCanteens", get(canteens::list))
        .route("/canteens", get(canteens::list_bare))
        .route("/canteen/createCanteen", post(canteens::create))
        .route("/canteen/updateCanteen/{id}", put(canteens::update))
        .route("/canteen/deleteCanteen/{id}", delete(canteens::remove))
        // Companies and roles
        .route("/company/getAllCompanies", get(companies::list))
        .route("/company/createCompany", post(companies::create))
        .route("/company/updateCompany/{id}", put(companies::update))
        .route("/role/getAllRoles", post(companies::roles))
        // Catalog
        .route("/canteen/getCategoriesByCanteenId/{canteen_id}", get(catalog::list_categories))
        .route("/canteen/createCategory", post(catalog::create_category))
        .route("/canteen/updateCategory/{id}", put(catalog::update_category))
        .route("/canteen/deleteCategory/{id}", delete(catalog::delete_category))
        .route("/canteen/getSubCategoryByCanteenId/{canteen_id}", get(catalog::list_subcategories))
        .route("/canteen/createSubCategory", post(catalog::create_subcategory))
        .route("/canteen/deleteSubCategory/{id}", delete(catalog::delete_subcategory))
        .route(
            "/canteen/getAllcategoriesSubTypesByCanteenId/{canteen_id}",
            get(catalog::list_subtypes),
        )
        .route("/canteen/createCategoriesSubTypeItem", post(catalog::create_subtype))
        .route("/canteen/updateSubTypesBySubCategoryTypeId/{id}", put(catalog::update_subtype))
        // Menu
        .route("/menu/getAllMenuItems", get(menu::list))
        .route("/menu/createMenuItem", post(menu::create))
        .route("/menu/updateMenuItem/{id}", put(menu::update))
        .route("/menu/deleteMenuItem/{id}", delete(menu::remove))
        // Orders
        .route("/cart/getAllOrderByCanteenId/{canteen_id}", get(orders::list))
        .route("/cart/getOrderByOrderId/{id}", get(orders::show))
        .route("/cart/updateOrderStatus/{id}", put(orders::update_status))
        .layer(middleware::from_fn_with_state(state.clone(), gate))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_search_and_window() {
        let items = vec!["North", "South", "Northeast", "West"];
        let query = ListQuery {
            start: Some(1),
            limit: Some(1),
            search: Some("north".into()),
        };
        assert_eq!(query.apply(items.clone(), |s| s.to_string()), vec!["Northeast"]);
        assert_eq!(ListQuery::default().apply(items, |s| s.to_string()).len(), 4);
    }
}
