//! Subcategory Type Model

use serde::{Deserialize, Serialize};

use super::Category;
use crate::util::{lenient_bool, lenient_id, lenient_string};

/// Subcategory type entity (groups subcategories under a category)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubcategoryType {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub canteencategoriesid: Option<String>,
    #[serde(rename = "itemName", default, deserialize_with = "lenient_string")]
    pub item_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub slug: Option<String>,
    #[serde(rename = "subCatTypeImg", default, deserialize_with = "lenient_string")]
    pub sub_cat_type_img: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_available: Option<bool>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub createddate: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub updateddate: Option<String>,
    #[serde(rename = "CanteenCategory", default)]
    pub category: Option<Category>,
}

impl SubcategoryType {
    /// Label for pickers: item name, then name, then slug, then id
    pub fn label(&self) -> String {
        self.item_name
            .clone()
            .or_else(|| self.name.clone())
            .or_else(|| self.slug.clone())
            .or_else(|| self.id.clone())
            .unwrap_or_default()
    }
}

/// Create/update subcategory type payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubcategoryTypeWrite {
    pub canteencategoriesid: String,
    #[serde(rename = "itemName")]
    pub item_name: String,
    #[serde(rename = "subCatTypeImg")]
    pub sub_cat_type_img: String,
    pub is_available: bool,
}
