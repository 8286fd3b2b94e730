//! In-memory backend state
//!
//! Records live in plain vectors behind one `RwLock`. Child records carry the
//! canteen they belong to so the per-canteen list endpoints can filter.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use shared::models::{
    Canteen, Category, Company, MenuItem, Order, Role, RoleSummary, Subcategory, SubcategoryType, User,
};
use tokio::sync::RwLock;

/// Token lifetime for issued admin tokens
pub const TOKEN_TTL_HOURS: i64 = 12;

/// JWT payload issued by the mock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockClaims {
    pub userid: String,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

/// Admin login account
#[derive(Debug, Clone)]
pub struct AdminAccount {
    /// Identity id carried in the token (company id, canteen id, ...)
    pub id: String,
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
}

/// Record owned by a canteen
#[derive(Debug, Clone)]
pub struct Scoped<T> {
    pub canteen_id: String,
    pub record: T,
}

impl<T> Scoped<T> {
    pub fn new(canteen_id: impl Into<String>, record: T) -> Self {
        Self {
            canteen_id: canteen_id.into(),
            record,
        }
    }
}

/// Everything the endpoints read and write
#[derive(Debug, Default)]
pub struct Store {
    pub next_id: u64,
    pub admins: Vec<AdminAccount>,
    pub roles: Vec<RoleSummary>,
    pub companies: Vec<Company>,
    pub canteens: Vec<Canteen>,
    pub users: Vec<User>,
    pub categories: Vec<Category>,
    pub subcategory_types: Vec<Scoped<SubcategoryType>>,
    pub subcategories: Vec<Scoped<Subcategory>>,
    pub menu_items: Vec<MenuItem>,
    pub orders: Vec<Scoped<Order>>,
}

impl Store {
    /// Fresh id, above every seeded one
    pub fn next_id(&mut self) -> String {
        self.next_id += 1;
        self.next_id.to_string()
    }
}

/// One request as seen by the router
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorized: bool,
}

/// Shared mock backend state
#[derive(Debug)]
pub struct MockState {
    pub store: RwLock<Store>,
    jwt_secret: String,
    requests: Mutex<Vec<RecordedRequest>>,
    failures: Mutex<HashMap<String, u16>>,
}

impl MockState {
    pub fn new(store: Store, jwt_secret: impl Into<String>) -> Self {
        Self {
            store: RwLock::new(store),
            jwt_secret: jwt_secret.into(),
            requests: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
        }
    }

    /// Seeded store (see [`crate::seed`])
    pub fn seeded() -> Self {
        Self::new(crate::seed::store(), "canteen-mock-secret")
    }

    /// Issue a token for `userid` that expires `ttl` from now (negative = already expired)
    pub fn issue_token(&self, userid: &str, email: &str, ttl: Duration) -> String {
        let now = Utc::now();
        let claims = MockClaims {
            userid: userid.to_string(),
            email: email.to_string(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .unwrap_or_default()
    }

    /// Verify signature and expiry
    pub fn verify_token(&self, token: &str) -> Option<MockClaims> {
        decode::<MockClaims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .ok()
        .map(|data| data.claims)
    }

    pub fn record(&self, request: RecordedRequest) {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Recorded requests for `method path`
    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    /// Answer every request to `path` with `status` until cleared
    pub fn fail_path(&self, path: impl Into<String>, status: u16) {
        self.failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(path.into(), status);
    }

    pub fn clear_failures(&self) {
        self.failures.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    pub fn injected_failure(&self, path: &str) -> Option<u16> {
        self.failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(path)
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip_and_expiry() {
        let state = MockState::seeded();
        let token = state.issue_token("1", "canteen@acme.test", Duration::hours(1));
        let claims = state.verify_token(&token).unwrap();
        assert_eq!(claims.userid, "1");

        let expired = state.issue_token("1", "canteen@acme.test", Duration::hours(-1));
        assert!(state.verify_token(&expired).is_none());
        assert!(state.verify_token("junk").is_none());
    }

    #[test]
    fn test_failure_injection() {
        let state = MockState::seeded();
        state.fail_path("/canteens", 503);
        assert_eq!(state.injected_failure("/canteens"), Some(503));
        state.clear_failures();
        assert!(state.injected_failure("/canteens").is_none());
    }
}
