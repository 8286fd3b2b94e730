//! Users screen (company admin)

use std::collections::BTreeMap;

use canteen_client::ApiClient;
use serde::Serialize;
use shared::models::{Availability, User, UserCreate, UserProfileUpdate};
use shared::util::{display_date, today};
use validator::Validate;

use super::{LocalIds, Modal, Searchable, field_errors, filter_rows, is_local_id, non_blank, or_placeholder};
use crate::notice::Notices;

pub const MSG_CREATED: &str = "User created successfully!";
pub const MSG_CREATE_FAILED: &str = "Failed to create user";
pub const MSG_FETCH_FAILED: &str = "Failed to fetch users";
pub const MSG_NO_COMPANY: &str = "Company id not found for the current login";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub empid: String,
    pub address: String,
    pub wallet_balance: f64,
    pub company: String,
    pub status: Availability,
    pub created_at: String,
}

impl UserRow {
    pub fn from_api(user: &User, local_ids: &mut LocalIds) -> Self {
        Self {
            id: user
                .key()
                .map(str::to_string)
                .unwrap_or_else(|| local_ids.issue()),
            name: or_placeholder(user.name.as_deref(), "Unnamed User"),
            email: or_placeholder(user.email.as_deref(), "No email"),
            phone: or_placeholder(user.phonenumber.as_deref(), "No phone"),
            empid: or_placeholder(user.empid.as_deref(), "-"),
            address: or_placeholder(user.address.as_deref(), "No address"),
            wallet_balance: user.wallet_balance.unwrap_or(0.0),
            company: or_placeholder(
                user.company.as_ref().and_then(|c| c.company_name.as_deref()),
                "-",
            ),
            status: Availability::from_status(user.status.as_deref()),
            created_at: display_date(user.createddate.as_deref()),
        }
    }
}

impl Searchable for UserRow {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str()]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct UserForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phonenumber: String,
    #[validate(length(min = 1, message = "Employee id is required"))]
    pub empid: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
}

impl UserForm {
    fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            phonenumber: self.phonenumber.trim().to_string(),
            empid: self.empid.trim().to_string(),
            address: self.address.trim().to_string(),
        }
    }

    pub fn check(&self) -> BTreeMap<String, String> {
        match self.trimmed().validate() {
            Ok(()) => BTreeMap::new(),
            Err(e) => field_errors(&e),
        }
    }

    pub fn to_create(&self, company_id: &str) -> UserCreate {
        let form = self.trimmed();
        UserCreate {
            name: form.name,
            email: form.email,
            password: form.password,
            phonenumber: form.phonenumber,
            empid: form.empid,
            companyid: company_id.to_string(),
            address: form.address,
        }
    }
}

/// Editable profile fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub name: String,
    pub phonenumber: String,
    pub address: String,
}

impl ProfileForm {
    pub fn to_update(&self) -> UserProfileUpdate {
        UserProfileUpdate {
            name: non_blank(&self.name),
            phonenumber: non_blank(&self.phonenumber),
            address: non_blank(&self.address),
        }
    }

    fn apply_to(&self, row: &mut UserRow) {
        let update = self.to_update();
        if let Some(name) = update.name {
            row.name = name;
        }
        if let Some(phone) = update.phonenumber {
            row.phone = phone;
        }
        if let Some(address) = update.address {
            row.address = address;
        }
    }
}

#[derive(Debug)]
pub struct UsersView {
    api: ApiClient,
    company_id: Option<String>,
    pub rows: Vec<UserRow>,
    pub search: String,
    pub error: Option<String>,
    pub form: UserForm,
    pub form_errors: BTreeMap<String, String>,
    pub add_modal: Modal,
    pub profile: ProfileForm,
    pub edit_modal: Modal,
    pub delete_dialog: Modal,
    pub selected: Option<UserRow>,
    pub is_loading: bool,
    pub notices: Notices,
    local_ids: LocalIds,
}

impl UsersView {
    /// `company_id` is the id of the logged-in company admin
    pub fn new(api: ApiClient, company_id: Option<String>) -> Self {
        Self {
            api,
            company_id,
            rows: Vec::new(),
            search: String::new(),
            error: None,
            form: UserForm::default(),
            form_errors: BTreeMap::new(),
            add_modal: Modal::Closed,
            profile: ProfileForm::default(),
            edit_modal: Modal::Closed,
            delete_dialog: Modal::Closed,
            selected: None,
            is_loading: false,
            notices: Notices::default(),
            local_ids: LocalIds::default(),
        }
    }

    pub async fn load(&mut self) {
        let Some(company_id) = self.company_id.clone() else {
            self.error = Some(MSG_NO_COMPANY.to_string());
            return;
        };

        self.is_loading = true;
        self.error = None;
        match self.api.list_users_by_company(&company_id).await {
            Ok(users) => {
                self.rows = users
                    .iter()
                    .map(|u| UserRow::from_api(u, &mut self.local_ids))
                    .collect();
            }
            Err(e) => {
                tracing::error!(company_id = %company_id, error = %e, "Failed to fetch users");
                self.error = Some(MSG_FETCH_FAILED.to_string());
            }
        }
        self.is_loading = false;
    }

    pub fn filtered(&self) -> Vec<&UserRow> {
        filter_rows(&self.rows, &self.search)
    }

    pub fn open_add(&mut self) {
        self.form = UserForm::default();
        self.form_errors.clear();
        self.add_modal.open();
    }

    pub fn close_add(&mut self) {
        self.add_modal.close();
        self.form = UserForm::default();
        self.form_errors.clear();
    }

    pub async fn submit_create(&mut self) -> bool {
        let Some(company_id) = self.company_id.clone() else {
            self.notices.error(MSG_NO_COMPANY);
            return false;
        };
        self.form_errors = self.form.check();
        if !self.form_errors.is_empty() {
            return false;
        }

        let payload = self.form.to_create(&company_id);
        match self.api.create_user(&payload).await {
            Ok(created) => {
                let row = match created {
                    Some(user) if user.key().is_some() => UserRow::from_api(&user, &mut self.local_ids),
                    _ => UserRow {
                        id: self.local_ids.issue(),
                        name: payload.name,
                        email: payload.email,
                        phone: payload.phonenumber,
                        empid: payload.empid,
                        address: payload.address,
                        wallet_balance: 0.0,
                        company: "-".to_string(),
                        status: Availability::Active,
                        created_at: today(),
                    },
                };
                self.rows.push(row);
                self.close_add();
                self.notices.success(MSG_CREATED);
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to add user");
                self.notices.error(MSG_CREATE_FAILED);
                false
            }
        }
    }

    pub fn open_edit(&mut self, id: &str) -> bool {
        let Some(row) = self.rows.iter().find(|r| r.id == id).cloned() else {
            return false;
        };
        self.profile = ProfileForm {
            name: row.name.clone(),
            phonenumber: row.phone.clone(),
            address: row.address.clone(),
        };
        self.selected = Some(row);
        self.edit_modal.open();
        true
    }

    pub fn close_edit(&mut self) {
        self.edit_modal.close();
        self.selected = None;
        self.profile = ProfileForm::default();
    }

    pub async fn submit_update(&mut self) -> bool {
        let Some(selected) = self.selected.clone() else {
            return false;
        };
        if !is_local_id(&selected.id)
            && let Err(e) = self
                .api
                .update_user_profile(&selected.id, &self.profile.to_update())
                .await
        {
            tracing::error!(id = %selected.id, error = %e, "Update failed");
            self.notices.error("Failed to update user");
            return false;
        }

        if let Some(row) = self.rows.iter_mut().find(|r| r.id == selected.id) {
            self.profile.apply_to(row);
        }
        self.close_edit();
        self.notices.success("User updated successfully!");
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
        self.delete_dialog.close();
        let Some(selected) = self.selected.take() else {
            return false;
        };
        if !is_local_id(&selected.id)
            && let Err(e) = self.api.delete_user(&selected.id).await
        {
            tracing::error!(id = %selected.id, error = %e, "Failed to delete user");
            self.notices.error("Failed to delete user");
            return false;
        }
        self.rows.retain(|r| r.id != selected.id);
        self.notices.success("User deleted successfully!");
        true
    }
}
