//! Client-related types shared between the API client and the mock backend
//!
//! Request/response DTOs that are not entity records.

use serde::{Deserialize, Serialize};

use crate::models::Role;
use crate::util::{lenient_id, lenient_string};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub user: LoginUser,
}

/// Identity block of a login response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginUser {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub role: Option<Role>,
}

impl LoginUser {
    /// `company_name`, falling back to `name`
    pub fn display_name(&self) -> Option<&str> {
        self.company_name.as_deref().or(self.name.as_deref())
    }
}

// =============================================================================
// Query parameters
// =============================================================================

/// Paging/search parameters passed through to list endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    pub start: u32,
    pub limit: u32,
    pub search: String,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            start: 0,
            limit: 10,
            search: String::new(),
        }
    }
}

impl ListParams {
    pub fn new(start: u32, limit: u32) -> Self {
        Self {
            start,
            limit,
            search: String::new(),
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Query pairs in wire order
    pub fn to_query(&self) -> Vec<(String, String)> {
        vec![
            ("start".to_string(), self.start.to_string()),
            ("limit".to_string(), self.limit.to_string()),
            ("search".to_string(), self.search.clone()),
        ]
    }
}

/// Body of `POST /role/getAllRoles`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleQuery {
    pub params: ListParams,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permission::has_permission;
    use serde_json::json;

    #[test]
    fn test_login_response_decodes_numeric_id_and_role() {
        let value = json!({
            "message": "Login successful",
            "user": {
                "id": 7,
                "email": "ops@acme.test",
                "name": "Acme",
                "token": "a.b.c",
                "role": {"id": 2, "name": "company admin", "permissions": []}
            }
        });
        let resp: LoginResponse = serde_json::from_value(value).unwrap();
        assert_eq!(resp.user.id.as_deref(), Some("7"));
        assert_eq!(resp.user.display_name(), Some("Acme"));
        assert_eq!(resp.user.role.unwrap().name, "company admin");
    }

    #[test]
    fn test_login_with_null_permission_lists_denies() {
        let value = json!({
            "user": {
                "id": 3,
                "email": "ops@acme.test",
                "token": "a.b.c",
                "role": {
                    "id": 2,
                    "name": "company admin",
                    "permissions": [
                        {"serviceName": "UserService", "api_permissions": null},
                        {
                            "serviceName": "CanteenService",
                            "api_permissions": [{"api": "/canteen/getAllCanteens", "methods": null, "allowed": true}]
                        }
                    ]
                }
            }
        });
        let resp: LoginResponse = serde_json::from_value(value).unwrap();
        let role = resp.user.role.unwrap();
        assert!(role.permissions[0].api_permissions.is_empty());
        assert!(role.permissions[1].api_permissions[0].methods.is_empty());

        let email = resp.user.email.as_deref();
        assert!(!has_permission(Some(&role), email, "UserService", Some("/user/getAllUsers"), Some("GET")));
        assert!(!has_permission(
            Some(&role),
            email,
            "CanteenService",
            Some("/canteen/getAllCanteens"),
            Some("GET")
        ));

        let bare: LoginResponse =
            serde_json::from_value(json!({"user": {"token": "t", "role": {"name": null, "permissions": null}}})).unwrap();
        assert!(bare.user.role.unwrap().permissions.is_empty());
    }

    #[test]
    fn test_list_params_query() {
        let params = ListParams::new(0, 100).with_search("north");
        let query = params.to_query();
        assert_eq!(query[1], ("limit".to_string(), "100".to_string()));
        assert_eq!(query[2].1, "north");
        assert_eq!(
            serde_json::to_value(RoleQuery::default()).unwrap(),
            json!({"params": {"start": 0, "limit": 10, "search": ""}})
        );
    }
}
