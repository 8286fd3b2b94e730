//! Subcategories screen (canteen-scoped)
//!
//! The list and the subtype picker load together and both must succeed.

use std::collections::BTreeMap;

use canteen_client::ApiClient;
use serde::Serialize;
use shared::models::{Availability, Subcategory, SubcategoryCreate, SubcategoryType};
use shared::util::display_date;
use validator::Validate;

use super::categories::MSG_NO_CANTEEN;
use super::{
    LocalIds, MSG_NO_SERVER_ID, Modal, Searchable, field_errors, filter_rows, is_local_id, or_placeholder,
};
use crate::notice::Notices;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubcategoryRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Option<f64>,
    pub status: Availability,
    pub type_name: String,
    pub category_name: String,
    pub created_at: String,
}

impl SubcategoryRow {
    pub fn from_api(sub: &Subcategory, local_ids: &mut LocalIds) -> Self {
        Self {
            id: sub.id.clone().unwrap_or_else(|| local_ids.issue()),
            name: or_placeholder(sub.item_name.as_deref(), "Unnamed"),
            description: sub.description.clone().unwrap_or_default(),
            price: sub.price,
            status: Availability::from_flag(sub.is_available),
            type_name: or_placeholder(sub.type_name(), "No subtype"),
            category_name: or_placeholder(sub.category_name(), "No category"),
            created_at: display_date(sub.createddate.as_deref()),
        }
    }

    /// Price for display, `-` when unset
    pub fn price_label(&self) -> String {
        self.price.map(|p| format!("{p:.2}")).unwrap_or_else(|| "-".to_string())
    }
}

impl Searchable for SubcategoryRow {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.description.as_str(),
            self.category_name.as_str(),
            self.type_name.as_str(),
        ]
    }
}

/// Subtype picker entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubtypeOption {
    pub id: String,
    pub label: String,
}

impl SubtypeOption {
    fn from_api(subtype: &SubcategoryType) -> Option<Self> {
        Some(Self {
            id: subtype.id.clone()?,
            label: subtype.label(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct SubcategoryForm {
    #[validate(length(min = 1, message = "Sub type is required"))]
    pub subcategory_type_id: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub item_name: String,
    pub price: String,
    pub is_available: bool,
    pub description: String,
    pub image: String,
    pub counter_number: String,
}

impl Default for SubcategoryForm {
    fn default() -> Self {
        Self {
            subcategory_type_id: String::new(),
            item_name: String::new(),
            price: String::new(),
            is_available: true,
            description: String::new(),
            image: String::new(),
            counter_number: String::new(),
        }
    }
}

fn optional_number<T: std::str::FromStr>(raw: &str) -> Result<Option<T>, ()> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(|_| ())
}

impl SubcategoryForm {
    /// Build the create payload, or the per-field errors
    pub fn to_create(&self) -> Result<SubcategoryCreate, BTreeMap<String, String>> {
        let trimmed = Self {
            subcategory_type_id: self.subcategory_type_id.trim().to_string(),
            item_name: self.item_name.trim().to_string(),
            ..self.clone()
        };
        let mut errors = match trimmed.validate() {
            Ok(()) => BTreeMap::new(),
            Err(e) => field_errors(&e),
        };

        let subtype_id = trimmed.subcategory_type_id.parse::<i64>();
        if subtype_id.is_err() && !errors.contains_key("subcategory_type_id") {
            errors.insert("subcategory_type_id".into(), "Sub type is invalid".into());
        }
        let price = optional_number::<f64>(&self.price);
        if price.is_err() {
            errors.insert("price".into(), "Price must be a number".into());
        }
        let counter = optional_number::<i64>(&self.counter_number);
        if counter.is_err() {
            errors.insert("counter_number".into(), "Counter number must be a whole number".into());
        }

        match (subtype_id, price, counter) {
            (Ok(subcategory_type_id), Ok(price), Ok(counter_number)) if errors.is_empty() => {
                Ok(SubcategoryCreate {
                    subcategory_type_id,
                    item_name: trimmed.item_name,
                    price,
                    is_available: self.is_available,
                    description: self.description.trim().to_string(),
                    image: self.image.trim().to_string(),
                    counter_number,
                })
            }
            _ => Err(errors),
        }
    }
}

#[derive(Debug)]
pub struct SubcategoriesView {
    api: ApiClient,
    canteen_id: Option<String>,
    pub rows: Vec<SubcategoryRow>,
    pub subtype_options: Vec<SubtypeOption>,
    pub search: String,
    pub error: Option<String>,
    pub form: SubcategoryForm,
    pub form_errors: BTreeMap<String, String>,
    pub create_modal: Modal,
    pub delete_dialog: Modal,
    pub selected: Option<SubcategoryRow>,
    pub is_loading: bool,
    pub is_submitting: bool,
    pub notices: Notices,
    local_ids: LocalIds,
}

impl SubcategoriesView {
    pub fn new(api: ApiClient, canteen_id: Option<String>) -> Self {
        Self {
            api,
            canteen_id,
            rows: Vec::new(),
            subtype_options: Vec::new(),
            search: String::new(),
            error: None,
            form: SubcategoryForm::default(),
            form_errors: BTreeMap::new(),
            create_modal: Modal::Closed,
            delete_dialog: Modal::Closed,
            selected: None,
            is_loading: false,
            is_submitting: false,
            notices: Notices::default(),
            local_ids: LocalIds::default(),
        }
    }

    fn set_rows(&mut self, subcategories: &[Subcategory]) {
        self.rows = subcategories
            .iter()
            .map(|s| SubcategoryRow::from_api(s, &mut self.local_ids))
            .collect();
    }

    /// Load the list and the subtype picker together
    pub async fn load(&mut self) {
        let Some(canteen_id) = self.canteen_id.clone() else {
            self.error = Some(MSG_NO_CANTEEN.to_string());
            return;
        };

        self.is_loading = true;
        let joined = tokio::try_join!(
            self.api.list_subcategories(&canteen_id),
            self.api.list_subcategory_types(&canteen_id),
        );
        match joined {
            Ok((subcategories, subtypes)) => {
                self.error = None;
                self.set_rows(&subcategories);
                self.subtype_options = subtypes.iter().filter_map(SubtypeOption::from_api).collect();
            }
            Err(e) => {
                tracing::error!(canteen_id = %canteen_id, error = %e, "Initialization error");
                self.error = Some(e.to_string());
            }
        }
        self.is_loading = false;
    }

    /// Re-read the list only
    pub async fn refresh(&mut self) {
        let Some(canteen_id) = self.canteen_id.clone() else {
            return;
        };
        self.is_loading = true;
        match self.api.list_subcategories(&canteen_id).await {
            Ok(subcategories) => self.set_rows(&subcategories),
            Err(e) => tracing::error!(error = %e, "Refresh subcategories failed"),
        }
        self.is_loading = false;
    }

    pub fn filtered(&self) -> Vec<&SubcategoryRow> {
        filter_rows(&self.rows, &self.search)
    }

    pub fn open_create(&mut self) {
        self.form = SubcategoryForm::default();
        self.form_errors.clear();
        self.create_modal.open();
    }

    pub fn close_create(&mut self) {
        self.create_modal.close();
        self.form = SubcategoryForm::default();
        self.form_errors.clear();
    }

    pub async fn submit_create(&mut self) -> bool {
        if self.canteen_id.is_none() {
            self.notices.error(MSG_NO_CANTEEN);
            return false;
        }
        let payload = match self.form.to_create() {
            Ok(payload) => payload,
            Err(errors) => {
                self.form_errors = errors;
                return false;
            }
        };
        self.form_errors.clear();

        self.is_submitting = true;
        let result = self.api.create_subcategory(&payload).await;
        self.is_submitting = false;
        match result {
            Ok(_) => {
                self.close_create();
                self.notices.success("Subcategory created successfully!");
                self.refresh().await;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Create subcategory failed");
                self.notices.error("Failed to create subcategory. Please try again.");
                false
            }
        }
    }

    pub fn request_delete(&mut self, id: &str) -> bool {
        let Some(row) = self.rows.iter().find(|r| r.id == id).cloned() else {
            return false;
        };
        self.selected = Some(row);
        self.delete_dialog.open();
        true
    }

    pub fn cancel_delete(&mut self) {
        self.delete_dialog.close();
        self.selected = None;
    }

    pub async fn confirm_delete(&mut self) -> bool {
        self.delete_dialog.close();
        let Some(selected) = self.selected.take() else {
            return false;
        };
        if is_local_id(&selected.id) {
            tracing::warn!(id = %selected.id, "Refusing to delete subcategory without server id");
            self.notices.error(MSG_NO_SERVER_ID);
            return false;
        }
        match self.api.delete_subcategory(&selected.id).await {
            Ok(_) => {
                self.notices.success("Subcategory deleted successfully!");
                self.refresh().await;
                true
            }
            Err(e) => {
                tracing::error!(id = %selected.id, error = %e, "Delete subcategory failed");
                self.notices.error("Failed to delete subcategory. Please try again.");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canteen_client::Method;
    use canteen_client::testing::RecordingTransport;
    use serde_json::json;
    use std::sync::Arc;

    const LIST: &str = "/canteen/getSubCategoryByCanteenId/1";
    const SUBTYPES: &str = "/canteen/getAllcategoriesSubTypesByCanteenId/1";

    fn view(transport: &Arc<RecordingTransport>) -> SubcategoriesView {
        SubcategoriesView::new(ApiClient::new(transport.clone()), Some("1".into()))
    }

    #[test]
    fn test_create_payload_nulls_empty_numbers() {
        let form = SubcategoryForm {
            subcategory_type_id: "4".into(),
            item_name: "  Idli ".into(),
            description: " soft ".into(),
            ..Default::default()
        };
        let payload = form.to_create().unwrap();
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "canteenTypeCategoriesid": 4,
                "itemName": "Idli",
                "price": null,
                "is_available": true,
                "discription": "soft",
                "subCatImg": "",
                "counter_number": null
            })
        );
    }

    #[test]
    fn test_create_payload_errors() {
        let errors = SubcategoryForm {
            price: "abc".into(),
            counter_number: "1.5".into(),
            ..Default::default()
        }
        .to_create()
        .unwrap_err();
        assert_eq!(errors["subcategory_type_id"], "Sub type is required");
        assert_eq!(errors["item_name"], "Name is required");
        assert_eq!(errors["price"], "Price must be a number");
        assert!(errors.contains_key("counter_number"));
    }

    #[tokio::test]
    async fn test_load_fills_rows_and_picker() {
        let transport = Arc::new(RecordingTransport::new());
        transport
            .respond(
                Method::Get,
                LIST,
                json!({"subCategories": [{
                    "id": 1, "itemName": "Idli", "price": "40",
                    "CanteenCategoriesSubType": {"itemName": "South Indian", "CanteenCategory": {"itemName": "Breakfast"}}
                }]}),
            )
            .respond(Method::Get, SUBTYPES, json!({"data": [{"id": 4, "slug": "south"}, {"name": "no id"}]}));
        let mut v = view(&transport);
        v.load().await;

        assert!(v.error.is_none());
        assert_eq!(v.rows[0].type_name, "South Indian");
        assert_eq!(v.rows[0].category_name, "Breakfast");
        assert_eq!(v.rows[0].price_label(), "40.00");
        assert_eq!(v.subtype_options, vec![SubtypeOption { id: "4".into(), label: "south".into() }]);

        v.search = "breakf".into();
        assert_eq!(v.filtered().len(), 1);
    }

    #[tokio::test]
    async fn test_load_needs_both_requests() {
        let transport = Arc::new(RecordingTransport::new());
        transport
            .respond(Method::Get, LIST, json!({"subCategories": [{"id": 1}]}))
            .fail(Method::Get, SUBTYPES, 500);
        let mut v = view(&transport);
        v.load().await;
        assert!(v.error.is_some());
        assert!(v.rows.is_empty());
    }

    #[tokio::test]
    async fn test_create_closes_and_refetches() {
        let transport = Arc::new(RecordingTransport::new());
        transport
            .respond(Method::Post, "/canteen/createSubCategory", json!({"message": "ok"}))
            .respond(Method::Get, LIST, json!({"subCategories": [{"id": 7}]}));
        let mut v = view(&transport);
        v.open_create();
        v.form.subcategory_type_id = "4".into();
        v.form.item_name = "Vada".into();
        v.form.price = "25".into();
        assert!(v.submit_create().await);
        assert!(!v.create_modal.is_open());
        assert_eq!(v.form, SubcategoryForm::default());
        assert_eq!(v.rows.len(), 1);
        assert_eq!(transport.calls(Method::Post, "/canteen/createSubCategory").len(), 1);
    }

    #[tokio::test]
    async fn test_delete_of_row_without_id_is_refused() {
        let transport = Arc::new(RecordingTransport::new());
        transport
            .respond(Method::Get, LIST, json!({"subCategories": [{"itemName": "Idli"}, {"id": 2, "itemName": "Vada"}]}))
            .respond(Method::Get, SUBTYPES, json!({"data": []}));
        let mut v = view(&transport);
        v.load().await;
        assert_eq!(v.rows[0].id, "local-0");

        transport.clear_requests();
        assert!(v.request_delete("local-0"));
        assert!(!v.confirm_delete().await);
        assert_eq!(v.notices.last().unwrap().message, MSG_NO_SERVER_ID);
        assert!(transport.requests().is_empty());
    }
}
