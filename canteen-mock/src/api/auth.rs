use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::Duration;
use serde_json::json;
use shared::client::LoginRequest;

use super::{Reply, message, ok};
use crate::state::{MockState, TOKEN_TTL_HOURS};

pub async fn login(State(state): State<Arc<MockState>>, Json(req): Json<LoginRequest>) -> Reply {
    let account = {
        let store = state.store.read().await;
        store
            .admins
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(req.email.trim()) && a.password == req.password)
            .cloned()
    };
    let Some(account) = account else {
        return message(StatusCode::UNAUTHORIZED, "Invalid email or password");
    };

    let token = state.issue_token(&account.id, &account.email, Duration::hours(TOKEN_TTL_HOURS));
    tracing::info!(email = %account.email, "Mock login");
    ok(json!({
        "message": "Login successful",
        "user": {
            "id": account.id,
            "email": account.email,
            "company_name": account.name,
            "token": token,
            "role": account.role,
        }
    }))
}
