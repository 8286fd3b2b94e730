//! Canteens screen
//!
//! Listing tries three endpoints in turn (primary, alternate, alternate with
//! query) and settles for an empty list only when all of them fail.

use std::collections::BTreeMap;

use canteen_client::{ApiClient, ClientResult, ListParams};
use serde::Serialize;
use shared::models::{Availability, Canteen, CanteenCreate, CanteenUpdate};
use shared::util::{display_date, today};
use validator::Validate;

use super::{LocalIds, Modal, Searchable, field_errors, filter_rows, is_local_id, non_blank, or_placeholder};
use crate::notice::Notices;

/// Role the backend assigns to canteen managers
pub const CANTEEN_ROLE_ID: &str = "4";

pub const MSG_CREATED: &str = "Canteen created successfully!";
pub const MSG_CREATE_FAILED: &str = "Failed to create canteen. Please try again.";
pub const MSG_UPDATED: &str = "Canteen updated successfully!";
pub const MSG_UPDATE_FAILED: &str = "Failed to update canteen. Please try again.";
pub const MSG_DELETED: &str = "Canteen deleted successfully!";
pub const MSG_DELETE_FAILED: &str = "Failed to delete canteen. Please try again.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanteenRow {
    pub id: String,
    pub name: String,
    pub location: String,
    pub manager: String,
    pub phone: String,
    pub status: Availability,
    pub created_at: String,
}

impl CanteenRow {
    /// Map an API record; a missing id is issued from `local_ids`
    pub fn from_api(canteen: &Canteen, local_ids: &mut LocalIds) -> Self {
        Self {
            id: canteen.canteenid.clone().unwrap_or_else(|| local_ids.issue()),
            name: or_placeholder(canteen.canteen_name.as_deref(), "Unnamed Canteen"),
            location: or_placeholder(canteen.address.as_deref(), "No location"),
            manager: or_placeholder(canteen.email.as_deref(), "No manager"),
            phone: or_placeholder(canteen.phone.as_deref(), "No phone"),
            status: Availability::from_flag(canteen.is_active),
            created_at: display_date(canteen.createddate.as_deref()),
        }
    }

    pub fn is_local(&self) -> bool {
        is_local_id(&self.id)
    }
}

impl Searchable for CanteenRow {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.location.as_str(), self.manager.as_str()]
    }
}

/// Add/edit form
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct CanteenForm {
    #[validate(length(min = 1, message = "Canteen name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    #[validate(email(message = "Manager must be a valid email"))]
    pub manager: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[validate(length(min = 1, message = "Slug is required"))]
    pub slug: String,
    pub status: Availability,
}

impl CanteenForm {
    fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            location: self.location.trim().to_string(),
            manager: self.manager.trim().to_string(),
            phone: self.phone.trim().to_string(),
            password: self.password.clone(),
            slug: self.slug.trim().to_string(),
            status: self.status,
        }
    }

    fn from_row(row: &CanteenRow) -> Self {
        Self {
            name: row.name.clone(),
            location: row.location.clone(),
            manager: row.manager.clone(),
            phone: row.phone.clone(),
            password: String::new(),
            slug: String::new(),
            status: row.status,
        }
    }

    /// Field errors for the add form
    pub fn check_create(&self) -> BTreeMap<String, String> {
        match self.trimmed().validate() {
            Ok(()) => BTreeMap::new(),
            Err(e) => field_errors(&e),
        }
    }

    /// Field errors for the edit form (password and slug are not editable)
    pub fn check_update(&self) -> BTreeMap<String, String> {
        let mut errors = self.check_create();
        errors.remove("password");
        errors.remove("slug");
        errors
    }

    pub fn to_create(&self) -> CanteenCreate {
        let form = self.trimmed();
        CanteenCreate {
            canteen_name: form.name,
            email: form.manager,
            password: form.password,
            address: form.location,
            slug: form.slug,
            roleid: CANTEEN_ROLE_ID.to_string(),
        }
    }

    pub fn to_update(&self) -> CanteenUpdate {
        CanteenUpdate {
            canteen_name: non_blank(&self.name),
            email: non_blank(&self.manager),
            address: non_blank(&self.location),
            phone: non_blank(&self.phone),
            is_active: Some(self.status.is_active()),
        }
    }

    fn apply_to(&self, row: &mut CanteenRow) {
        let form = self.trimmed();
        row.name = form.name;
        row.location = form.location;
        row.manager = form.manager;
        row.phone = form.phone;
        row.status = form.status;
    }
}

#[derive(Debug)]
pub struct CanteensView {
    api: ApiClient,
    pub rows: Vec<CanteenRow>,
    pub search: String,
    pub params: ListParams,
    pub form: CanteenForm,
    pub form_errors: BTreeMap<String, String>,
    pub add_modal: Modal,
    pub edit_modal: Modal,
    pub delete_dialog: Modal,
    pub selected: Option<CanteenRow>,
    pub is_loading: bool,
    pub notices: Notices,
    local_ids: LocalIds,
}

impl CanteensView {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            rows: Vec::new(),
            search: String::new(),
            params: ListParams::new(0, 10),
            form: CanteenForm::default(),
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

    async fn fetch_with_fallback(&self) -> ClientResult<Vec<Canteen>> {
        match self.api.list_canteens(&self.params).await {
            Ok(canteens) => return Ok(canteens),
            Err(e) => tracing::warn!(error = %e, "Primary canteen list failed, trying alternate"),
        }
        match self.api.list_canteens_alt().await {
            Ok(canteens) => return Ok(canteens),
            Err(e) => tracing::warn!(error = %e, "Alternate canteen list failed, trying query form"),
        }
        self.api.list_canteens_query(&self.params).await
    }

    pub async fn load(&mut self) {
        self.is_loading = true;
        self.rows = match self.fetch_with_fallback().await {
            Ok(canteens) => canteens
                .iter()
                .map(|c| CanteenRow::from_api(c, &mut self.local_ids))
                .collect(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to load canteens");
                Vec::new()
            }
        };
        self.is_loading = false;
    }

    pub fn filtered(&self) -> Vec<&CanteenRow> {
        filter_rows(&self.rows, &self.search)
    }

    fn reset_form(&mut self) {
        self.form = CanteenForm::default();
        self.form_errors.clear();
    }

    pub fn open_add(&mut self) {
        self.reset_form();
        self.add_modal.open();
    }

    pub fn close_add(&mut self) {
        self.add_modal.close();
        self.reset_form();
    }

    /// Validate and create. `true` when the canteen was created.
    pub async fn submit_create(&mut self) -> bool {
        self.form_errors = self.form.check_create();
        if !self.form_errors.is_empty() {
            self.notices.error("Please fill in all required fields.");
            return false;
        }

        match self.api.create_canteen(&self.form.to_create()).await {
            Ok(created) => {
                let form = self.form.trimmed();
                self.rows.push(CanteenRow {
                    id: created.id().unwrap_or_else(|| self.local_ids.issue()),
                    name: form.name,
                    location: form.location,
                    manager: form.manager,
                    phone: form.phone,
                    status: form.status,
                    created_at: today(),
                });
                self.add_modal.close();
                self.reset_form();
                self.notices.success(MSG_CREATED);
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to create canteen");
                self.notices.error(MSG_CREATE_FAILED);
                false
            }
        }
    }

    pub fn open_edit(&mut self, id: &str) -> bool {
        let Some(row) = self.rows.iter().find(|r| r.id == id).cloned() else {
            return false;
        };
        self.form = CanteenForm::from_row(&row);
        self.form_errors.clear();
        self.selected = Some(row);
        self.edit_modal.open();
        true
    }

    pub fn close_edit(&mut self) {
        self.edit_modal.close();
        self.selected = None;
        self.reset_form();
    }

    pub async fn submit_update(&mut self) -> bool {
        let Some(selected) = self.selected.clone() else {
            return false;
        };
        self.form_errors = self.form.check_update();
        if !self.form_errors.is_empty() {
            self.notices.error("Please fill in all required fields.");
            return false;
        }

        if !selected.is_local()
            && let Err(e) = self.api.update_canteen(&selected.id, &self.form.to_update()).await
        {
            tracing::error!(id = %selected.id, error = %e, "Failed to update canteen");
            self.notices.error(MSG_UPDATE_FAILED);
            return false;
        }

        if let Some(row) = self.rows.iter_mut().find(|r| r.id == selected.id) {
            self.form.apply_to(row);
        }
        self.close_edit();
        self.notices.success(MSG_UPDATED);
        true
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
        let Some(selected) = self.selected.take() else {
            self.delete_dialog.close();
            return false;
        };
        self.delete_dialog.close();

        if !selected.is_local()
            && let Err(e) = self.api.delete_canteen(&selected.id).await
        {
            tracing::error!(id = %selected.id, error = %e, "Failed to delete canteen");
            self.notices.error(MSG_DELETE_FAILED);
            return false;
        }

        self.rows.retain(|r| r.id != selected.id);
        self.notices.success(MSG_DELETED);
        true
    }
}
