//! Category Model (canteen menu category)

use serde::{Deserialize, Serialize};

use crate::util::{lenient_bool, lenient_id, lenient_string};

/// Category entity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub canteenid: Option<String>,
    #[serde(rename = "itemName", default, deserialize_with = "lenient_string")]
    pub item_name: Option<String>,
    #[serde(rename = "catImg", default, deserialize_with = "lenient_string")]
    pub cat_img: Option<String>,
    /// Backend spelling
    #[serde(rename = "discription", default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_available: Option<bool>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub createddate: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub updateddate: Option<String>,
}

/// Create category payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub canteenid: String,
    #[serde(rename = "itemName")]
    pub item_name: String,
    #[serde(rename = "discription")]
    pub description: String,
    pub is_available: bool,
}

/// Update category payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryUpdate {
    #[serde(rename = "itemName", skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    #[serde(rename = "discription", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}
