//! Canteen Client - typed client for the canteen admin API
//!
//! Provides the HTTP transport, the injected session, the auth context and
//! one call per backend endpoint.

pub mod api;
pub mod auth;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod session;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use api::ApiClient;
pub use auth::AuthContext;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, SessionStoreError};
pub use http::{ApiRequest, HttpTransport, Method, NetworkHttpClient};
pub use session::{AuthUser, Session, SessionData, SessionStore};

// Re-export shared types for convenience
pub use shared::client::{ListParams, LoginResponse};
