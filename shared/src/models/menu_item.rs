//! Menu Item Model

use serde::{Deserialize, Serialize};

use crate::util::{lenient_f64, lenient_id, lenient_string};

/// Menu item entity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub category_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub subcategory_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub subcategory_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub canteen_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub canteen_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(rename = "createddate", default, deserialize_with = "lenient_string")]
    pub createddate: Option<String>,
}

/// Create/update menu item payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemWrite {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub category_id: String,
    pub subcategory_id: String,
    pub canteen_id: String,
    pub status: String,
}
