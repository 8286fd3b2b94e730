//! Categories screen (canteen-scoped)

use std::collections::BTreeMap;

use canteen_client::ApiClient;
use serde::Serialize;
use shared::models::{Availability, Category, CategoryCreate, CategoryUpdate};
use shared::util::display_date;
use validator::Validate;

use super::{LocalIds, MSG_NO_SERVER_ID, Modal, Searchable, field_errors, filter_rows, is_local_id, or_placeholder};
use crate::notice::Notices;

pub const MSG_NO_CANTEEN: &str = "canteenId not found in token payload";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: Availability,
    pub created_at: String,
}

impl CategoryRow {
    pub fn from_api(category: &Category, local_ids: &mut LocalIds) -> Self {
        Self {
            id: category.id.clone().unwrap_or_else(|| local_ids.issue()),
            name: or_placeholder(category.item_name.as_deref(), "Unnamed Category"),
            description: or_placeholder(category.description.as_deref(), "No description"),
            status: Availability::from_flag(category.is_available),
            created_at: display_date(category.createddate.as_deref()),
        }
    }
}

impl Searchable for CategoryRow {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str()]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct CategoryForm {
    #[validate(length(min = 1, message = "Category name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub status: Availability,
}

impl CategoryForm {
    fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            status: self.status,
        }
    }

    pub fn check(&self) -> BTreeMap<String, String> {
        match self.trimmed().validate() {
            Ok(()) => BTreeMap::new(),
            Err(e) => field_errors(&e),
        }
    }

    pub fn to_create(&self, canteen_id: &str) -> CategoryCreate {
        let form = self.trimmed();
        CategoryCreate {
            canteenid: canteen_id.to_string(),
            item_name: form.name,
            description: form.description,
            is_available: form.status.is_active(),
        }
    }

    pub fn to_update(&self) -> CategoryUpdate {
        let form = self.trimmed();
        CategoryUpdate {
            item_name: Some(form.name),
            description: Some(form.description),
            is_available: Some(form.status.is_active()),
        }
    }
}

#[derive(Debug)]
pub struct CategoriesView {
    api: ApiClient,
    canteen_id: Option<String>,
    pub rows: Vec<CategoryRow>,
    pub search: String,
    pub error: Option<String>,
    pub form: CategoryForm,
    pub form_errors: BTreeMap<String, String>,
    pub add_modal: Modal,
    pub edit_modal: Modal,
    pub delete_dialog: Modal,
    pub selected: Option<CategoryRow>,
    pub is_loading: bool,
    pub notices: Notices,
    local_ids: LocalIds,
}

impl CategoriesView {
    pub fn new(api: ApiClient, canteen_id: Option<String>) -> Self {
        Self {
            api,
            canteen_id,
            rows: Vec::new(),
            search: String::new(),
            error: None,
            form: CategoryForm::default(),
            form_errors: BTreeMap::new(),
            add_modal: Modal::Closed,
            edit_modal: Modal::Closed,
            delete_dialog: Modal::Closed,
            selected: None,
            is_loading: false,
            notices: Notices::default(),
            local_ids: LocalIds::default(),
        }
    }

    pub async fn load(&mut self) {
        let Some(canteen_id) = self.canteen_id.clone() else {
            self.error = Some(MSG_NO_CANTEEN.to_string());
            return;
        };

        self.is_loading = true;
        match self.api.list_categories(&canteen_id).await {
            Ok(categories) => {
                self.error = None;
                self.rows = categories
                    .iter()
                    .map(|c| CategoryRow::from_api(c, &mut self.local_ids))
                    .collect();
            }
            Err(e) => {
                tracing::error!(canteen_id = %canteen_id, error = %e, "Failed to load categories");
                self.error = Some("Failed to load categories".to_string());
            }
        }
        self.is_loading = false;
    }

    pub fn filtered(&self) -> Vec<&CategoryRow> {
        filter_rows(&self.rows, &self.search)
    }

    pub fn open_add(&mut self) {
        self.form = CategoryForm::default();
        self.form_errors.clear();
        self.add_modal.open();
    }

    pub fn close_add(&mut self) {
        self.add_modal.close();
        self.form = CategoryForm::default();
        self.form_errors.clear();
    }

    pub async fn submit_create(&mut self) -> bool {
        let Some(canteen_id) = self.canteen_id.clone() else {
            self.notices.error(MSG_NO_CANTEEN);
            return false;
        };
        self.form_errors = self.form.check();
        if !self.form_errors.is_empty() {
            return false;
        }

        match self.api.create_category(&self.form.to_create(&canteen_id)).await {
            Ok(_) => {
                self.close_add();
                self.notices.success("Category created successfully!");
                self.load().await;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to create category");
                self.notices.error("Failed to create category. Please try again.");
                false
            }
        }
    }

    pub fn open_edit(&mut self, id: &str) -> bool {
        let Some(row) = self.rows.iter().find(|r| r.id == id).cloned() else {
            return false;
        };
        self.form = CategoryForm {
            name: row.name.clone(),
            description: row.description.clone(),
            status: row.status,
        };
        self.form_errors.clear();
        self.selected = Some(row);
        self.edit_modal.open();
        true
    }

    pub fn close_edit(&mut self) {
        self.edit_modal.close();
        self.selected = None;
        self.form = CategoryForm::default();
    }

    pub async fn submit_update(&mut self) -> bool {
        let Some(selected) = self.selected.clone() else {
            return false;
        };
        self.form_errors = self.form.check();
        if !self.form_errors.is_empty() {
            return false;
        }
        if is_local_id(&selected.id) {
            tracing::warn!(id = %selected.id, "Category has no server id, not updating");
            self.notices.error(MSG_NO_SERVER_ID);
            return false;
        }

        match self.api.update_category(&selected.id, &self.form.to_update()).await {
            Ok(_) => {
                self.close_edit();
                self.notices.success("Category updated successfully!");
                self.load().await;
                true
            }
            Err(e) => {
                tracing::error!(id = %selected.id, error = %e, "Failed to update category");
                self.notices.error("Failed to update category. Please try again.");
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
            tracing::warn!(id = %selected.id, "Category has no server id, not deleting");
            self.notices.error(MSG_NO_SERVER_ID);
            return false;
        }
        match self.api.delete_category(&selected.id).await {
            Ok(_) => {
                self.notices.success("Category deleted successfully!");
                self.load().await;
                true
            }
            Err(e) => {
                tracing::error!(id = %selected.id, error = %e, "Failed to delete category");
                self.notices.error("Failed to delete category. Please try again.");
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

    const LIST: &str = "/canteen/getCategoriesByCanteenId/1";

    #[tokio::test]
    async fn test_load_accepts_any_list_key() {
        let transport = Arc::new(RecordingTransport::new());
        transport.respond(
            Method::Get,
            LIST,
            json!({"subCategories": [{"id": 3, "itemName": "Breakfast", "discription": "Morning", "is_available": false}]}),
        );
        let mut view = CategoriesView::new(ApiClient::new(transport.clone()), Some("1".into()));
        view.load().await;
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].name, "Breakfast");
        assert_eq!(view.rows[0].status, Availability::Inactive);

        view.search = "morn".into();
        assert_eq!(view.filtered().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_canteen_scope() {
        let transport = Arc::new(RecordingTransport::new());
        let mut view = CategoriesView::new(ApiClient::new(transport.clone()), None);
        view.load().await;
        assert_eq!(view.error.as_deref(), Some(MSG_NO_CANTEEN));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_create_then_refetch() {
        let transport = Arc::new(RecordingTransport::new());
        transport
            .respond(Method::Post, "/canteen/createCategory", json!({"message": "created"}))
            .respond(Method::Get, LIST, json!({"data": [{"id": 9, "itemName": "Snacks"}]}));
        let mut view = CategoriesView::new(ApiClient::new(transport.clone()), Some("1".into()));
        view.open_add();
        view.form = CategoryForm {
            name: " Snacks ".into(),
            description: "Evening".into(),
            status: Availability::Active,
        };
        assert!(view.submit_create().await);
        assert!(!view.add_modal.is_open());
        assert_eq!(view.rows[0].id, "9");

        let body = transport.calls(Method::Post, "/canteen/createCategory")[0].body.clone().unwrap();
        assert_eq!(
            body,
            json!({"canteenid": "1", "itemName": "Snacks", "discription": "Evening", "is_available": true})
        );
        assert_eq!(transport.calls(Method::Get, LIST).len(), 1);
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_rows() {
        let transport = Arc::new(RecordingTransport::new());
        transport.fail(Method::Delete, "/canteen/deleteCategory/3", 500);
        let mut view = CategoriesView::new(ApiClient::new(transport.clone()), Some("1".into()));
        view.rows.push(CategoryRow::from_api(
            &Category {
                id: Some("3".into()),
                ..Default::default()
            },
            &mut LocalIds::default(),
        ));
        assert!(view.request_delete("3"));
        assert!(!view.confirm_delete().await);
        assert_eq!(view.rows.len(), 1);
        assert!(!view.delete_dialog.is_open());
        assert!(transport.calls(Method::Get, LIST).is_empty());
    }

    #[tokio::test]
    async fn test_rows_without_server_id_are_never_sent() {
        let transport = Arc::new(RecordingTransport::new());
        transport.respond(Method::Get, LIST, json!({"data": [{"itemName": "Breakfast"}, {"itemName": "Lunch"}]}));
        let mut view = CategoriesView::new(ApiClient::new(transport.clone()), Some("1".into()));
        view.load().await;
        assert_eq!(view.rows[0].id, "local-0");
        assert_eq!(view.rows[1].id, "local-1");

        assert!(view.request_delete("local-0"));
        assert!(!view.confirm_delete().await);
        assert!(view.open_edit("local-1"));
        assert!(!view.submit_update().await);

        assert_eq!(view.notices.last().unwrap().message, MSG_NO_SERVER_ID);
        assert_eq!(view.rows.len(), 2);
        assert_eq!(transport.requests().len(), 1);
    }
}
