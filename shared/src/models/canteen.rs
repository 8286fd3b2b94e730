//! Canteen Model

use serde::{Deserialize, Serialize};

use crate::util::{lenient_bool, lenient_id, lenient_string};

/// Canteen entity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Canteen {
    #[serde(default, deserialize_with = "lenient_id")]
    pub canteenid: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub canteen_name: Option<String>,
    /// Manager login email
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub companyid: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub roleid: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub createddate: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub updateddate: Option<String>,
}

/// Create canteen payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanteenCreate {
    pub canteen_name: String,
    pub email: String,
    pub password: String,
    pub address: String,
    pub slug: String,
    /// Canteen manager role, fixed by the backend's role table
    pub roleid: String,
}

/// Update canteen payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanteenUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canteen_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Created-canteen response; the backend echoes the record or wraps it in `data`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CanteenCreated {
    #[serde(default, deserialize_with = "lenient_id")]
    pub canteenid: Option<String>,
    #[serde(default)]
    pub data: Option<Canteen>,
}

impl CanteenCreated {
    /// Id of the new canteen, wherever the backend put it
    pub fn id(&self) -> Option<String> {
        self.canteenid
            .clone()
            .or_else(|| self.data.as_ref().and_then(|c| c.canteenid.clone()))
    }
}
