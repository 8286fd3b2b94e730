//! Shared types for the canteen admin workspace
//!
//! API records, response normalization, token claims and the permission
//! predicate. Used by the API client, the admin front end and the mock backend.

pub mod claims;
pub mod client;
pub mod models;
pub mod permission;
pub mod response;
pub mod util;

// Re-exports
pub use claims::{ClaimsError, TokenClaims, decode_claims};
pub use permission::has_permission;
pub use response::{ApiMessage, decode_list, extract_list};
pub use serde::{Deserialize, Serialize};
