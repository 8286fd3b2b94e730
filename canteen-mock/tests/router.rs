// In-process router tests (tower oneshot, no socket)

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use canteen_mock::{MockState, api, seed};
use chrono::Duration;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> (Arc<MockState>, Router) {
    let state = Arc::new(MockState::seeded());
    (state.clone(), api::router(state))
}

async fn call(app: &Router, method: &str, path: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn canteen_token(state: &MockState) -> String {
    state.issue_token(seed::CANTEEN_ID, seed::CANTEEN_ADMIN_EMAIL, Duration::hours(1))
}

#[tokio::test]
async fn test_login_issues_token_with_role() {
    let (_, app) = app();
    let (status, body) = call(
        &app,
        "POST",
        "/adminUser/login",
        None,
        Some(json!({"email": seed::COMPANY_ADMIN_EMAIL, "password": seed::COMPANY_ADMIN_PASSWORD})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"]["name"], "company admin");
    assert!(body["user"]["token"].as_str().unwrap().split('.').count() == 3);

    let (status, _) = call(
        &app,
        "POST",
        "/adminUser/login",
        None,
        Some(json!({"email": seed::COMPANY_ADMIN_EMAIL, "password": "wrong"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_routes_need_a_valid_token() {
    let (state, app) = app();
    let (status, _) = call(&app, "GET", "/canteen/getAllCanteens", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let expired = state.issue_token("1", seed::CANTEEN_ADMIN_EMAIL, Duration::hours(-2));
    let (status, _) = call(&app, "GET", "/canteen/getAllCanteens", Some(&expired), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = canteen_token(&state);
    let (status, body) = call(&app, "GET", "/canteen/getAllCanteens?start=0&limit=10&search=", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let recorded = state.requests();
    assert_eq!(recorded.len(), 3);
    assert!(recorded[2].authorized);
    assert!(!recorded[0].authorized);
}

#[tokio::test]
async fn test_response_shapes_per_endpoint() {
    let (state, app) = app();
    let token = canteen_token(&state);

    let (_, bare) = call(&app, "GET", "/canteens", Some(&token), None).await;
    assert!(bare.is_array());

    let (_, orders) = call(&app, "GET", "/cart/getAllOrderByCanteenId/1", Some(&token), None).await;
    assert_eq!(orders["orders"].as_array().unwrap().len(), 2);

    let (_, subtypes) = call(&app, "GET", "/canteen/getAllcategoriesSubTypesByCanteenId/1", Some(&token), None).await;
    assert_eq!(subtypes["subTypes"][0]["itemName"], "South Indian");

    let (_, subs) = call(&app, "GET", "/canteen/getSubCategoryByCanteenId/1", Some(&token), None).await;
    assert_eq!(subs["subCategories"][0]["CanteenCategoriesSubType"]["CanteenCategory"]["itemName"], "Breakfast");

    let (_, roles) = call(
        &app,
        "POST",
        "/role/getAllRoles",
        Some(&token),
        Some(json!({"params": {"start": 0, "limit": 10, "search": ""}})),
    )
    .await;
    assert_eq!(roles["roles"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_injected_failure_applies_to_one_path() {
    let (state, app) = app();
    let token = canteen_token(&state);
    state.fail_path("/canteen/getAllCanteens", 500);

    let (status, _) = call(&app, "GET", "/canteen/getAllCanteens", Some(&token), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let (status, _) = call(&app, "GET", "/canteens", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state.count("GET", "/canteen/getAllCanteens"), 1);
}

#[tokio::test]
async fn test_order_status_update_persists() {
    let (state, app) = app();
    let token = canteen_token(&state);

    let (status, _) = call(
        &app,
        "PUT",
        "/cart/updateOrderStatus/1",
        Some(&token),
        Some(json!({"status": "completed"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = call(&app, "GET", "/cart/getOrderByOrderId/1", Some(&token), None).await;
    assert_eq!(body["order"]["status"], "completed");

    let (status, _) = call(
        &app,
        "PUT",
        "/cart/updateOrderStatus/999",
        Some(&token),
        Some(json!({"status": "completed"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
