//! Subcategory Model (orderable dish)

use serde::{Deserialize, Serialize};

use super::SubcategoryType;
use crate::util::{lenient_bool, lenient_f64, lenient_i64, lenient_id, lenient_string};

/// Subcategory entity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Subcategory {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(rename = "canteenTypeCategoriesid", default, deserialize_with = "lenient_id")]
    pub subcategory_type_id: Option<String>,
    #[serde(rename = "itemName", default, deserialize_with = "lenient_string")]
    pub item_name: Option<String>,
    #[serde(rename = "subCatImg", default, deserialize_with = "lenient_string")]
    pub image: Option<String>,
    #[serde(rename = "discription", default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub counter_number: Option<i64>,
    #[serde(rename = "mealType", default, deserialize_with = "lenient_string")]
    pub meal_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_available: Option<bool>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
    #[serde(rename = "totalProtein", default, deserialize_with = "lenient_f64")]
    pub total_protein: Option<f64>,
    #[serde(rename = "dietaryFibre", default, deserialize_with = "lenient_f64")]
    pub dietary_fibre: Option<f64>,
    #[serde(rename = "totalCarbohydrate", default, deserialize_with = "lenient_f64")]
    pub total_carbohydrate: Option<f64>,
    #[serde(rename = "totalFat", default, deserialize_with = "lenient_f64")]
    pub total_fat: Option<f64>,
    #[serde(rename = "totalCalories", default, deserialize_with = "lenient_f64")]
    pub total_calories: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub createddate: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub updateddate: Option<String>,
    #[serde(rename = "CanteenCategoriesSubType", default)]
    pub subcategory_type: Option<SubcategoryType>,
}

impl Subcategory {
    /// Name of the owning subcategory type, if embedded
    pub fn type_name(&self) -> Option<&str> {
        self.subcategory_type.as_ref()?.item_name.as_deref()
    }

    /// Name of the owning category, if embedded two levels down
    pub fn category_name(&self) -> Option<&str> {
        self.subcategory_type
            .as_ref()?
            .category
            .as_ref()?
            .item_name
            .as_deref()
    }
}

/// Create subcategory payload
///
/// Empty form numbers are sent as `null`, not `0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubcategoryCreate {
    #[serde(rename = "canteenTypeCategoriesid")]
    pub subcategory_type_id: i64,
    #[serde(rename = "itemName")]
    pub item_name: String,
    pub price: Option<f64>,
    pub is_available: bool,
    #[serde(rename = "discription")]
    pub description: String,
    #[serde(rename = "subCatImg")]
    pub image: String,
    pub counter_number: Option<i64>,
}
