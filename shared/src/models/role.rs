//! Role Model

use serde::{Deserialize, Serialize};

use crate::util::{lenient_id, lenient_string, lenient_vec, null_as_default};

/// One API grant under a service (e.g. `GET /user/getAllUsers`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiPermission {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    /// Path or colon pattern, e.g. `/canteen/updateCanteen/:id`
    #[serde(default, deserialize_with = "null_as_default")]
    pub api: String,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub methods: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub allowed: bool,
}

/// Grants for one backend service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServicePermission {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(rename = "serviceName", default, deserialize_with = "null_as_default")]
    pub service_name: String,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub api_permissions: Vec<ApiPermission>,
}

/// Role attached to the logged-in identity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Role {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub permissions: Vec<ServicePermission>,
}

/// Role as listed by the role picker
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleSummary {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub role_name: Option<String>,
}
