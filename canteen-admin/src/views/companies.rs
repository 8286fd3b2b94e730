//! Companies screen (super admin)

use std::borrow::Cow;
use std::collections::BTreeMap;

use canteen_client::{ApiClient, ClientError, ListParams};
use serde::Serialize;
use shared::models::{Company, CompanyCreate, CompanyUpdate, RoleSummary};
use shared::util::display_date;
use validator::{Validate, ValidateEmail, ValidationError};

use super::{
    LocalIds, MSG_NO_SERVER_ID, Modal, Searchable, field_errors, filter_rows, is_local_id, non_blank,
    or_placeholder,
};
use crate::notice::Notices;

pub const MSG_CREATED: &str = "Company created successfully!";
pub const MSG_CREATE_FAILED: &str = "Failed to create company. Please try again.";
pub const MSG_UPDATED: &str = "Company updated successfully";
pub const MSG_UPDATE_FAILED: &str = "Failed to update company. Please try again.";
pub const MSG_NO_CHANGES: &str = "No changes to save";

const PAGE_LIMIT: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyRow {
    pub id: String,
    pub name: String,
    pub code: String,
    pub email: String,
    pub address: String,
    pub employees: String,
    pub restaurants: i64,
    pub status: String,
    pub created_at: String,
}

impl CompanyRow {
    pub fn from_api(company: &Company, local_ids: &mut LocalIds) -> Self {
        Self {
            id: company.id.clone().unwrap_or_else(|| local_ids.issue()),
            name: or_placeholder(company.company_name.as_deref(), "Unnamed Company"),
            code: or_placeholder(company.company_code.as_deref(), "N/A"),
            email: or_placeholder(company.email.as_deref(), "No email"),
            address: or_placeholder(company.address.as_deref(), "No address"),
            employees: or_placeholder(company.no_of_employee.as_deref(), "Unknown"),
            restaurants: company.no_of_restraunt.unwrap_or(0),
            status: or_placeholder(company.status.as_deref(), "Active"),
            created_at: display_date(company.createddate.as_deref()),
        }
    }
}

impl Searchable for CompanyRow {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.code.as_str(),
            self.email.as_str(),
            self.address.as_str(),
        ]
    }
}

/// Role picker entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleOption {
    pub id: String,
    pub name: String,
}

impl RoleOption {
    fn from_api(role: &RoleSummary) -> Option<Self> {
        let id = role.id.clone()?;
        Some(Self {
            name: role.role_name.clone().unwrap_or_else(|| id.clone()),
            id,
        })
    }
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn required_email(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(invalid("required", "Email is required"))
    } else if !value.trim().validate_email() {
        Err(invalid("email", "Email is invalid"))
    } else {
        Ok(())
    }
}

fn strong_enough_password(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        Err(invalid("required", "Password is required"))
    } else if value.chars().count() < 6 {
        Err(invalid("length", "Password must be at least 6 characters"))
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct CompanyForm {
    #[validate(length(min = 1, message = "Company name is required"))]
    pub company_name: String,
    #[validate(custom(function = "required_email"))]
    pub email: String,
    #[validate(custom(function = "strong_enough_password"))]
    pub password: String,
    #[validate(length(min = 1, message = "Company code is required"))]
    pub company_code: String,
    #[validate(length(min = 1, message = "Number of employees is required"))]
    pub no_of_employee: String,
    #[validate(length(min = 1, message = "Number of restaurants is required"))]
    pub no_of_restraunt: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "Role is required"))]
    pub roleid: String,
}

impl CompanyForm {
    fn trimmed(&self) -> Self {
        Self {
            company_name: self.company_name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            company_code: self.company_code.trim().to_string(),
            no_of_employee: self.no_of_employee.trim().to_string(),
            no_of_restraunt: self.no_of_restraunt.trim().to_string(),
            address: self.address.trim().to_string(),
            roleid: self.roleid.trim().to_string(),
        }
    }

    pub fn check(&self) -> BTreeMap<String, String> {
        match self.trimmed().validate() {
            Ok(()) => BTreeMap::new(),
            Err(e) => field_errors(&e),
        }
    }

    pub fn to_create(&self) -> CompanyCreate {
        let form = self.trimmed();
        CompanyCreate {
            company_name: form.company_name,
            email: form.email,
            password: form.password,
            company_code: form.company_code,
            no_of_employee: form.no_of_employee,
            no_of_restraunt: form.no_of_restraunt,
            address: form.address,
            roleid: form.roleid,
        }
    }
}

/// Edit form: name, email, password
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyEditForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl CompanyEditForm {
    /// Only the fields that changed against `original` and are not blank
    pub fn changes(&self, original: Option<&CompanyRow>) -> CompanyUpdate {
        let changed = |value: &str, current: Option<&str>| non_blank(value).filter(|v| Some(v.as_str()) != current);
        CompanyUpdate {
            name: changed(&self.name, original.map(|o| o.name.as_str())),
            email: changed(&self.email, original.map(|o| o.email.as_str())),
            password: non_blank(&self.password),
        }
    }
}

fn failure_message(error: &ClientError, fallback: &str) -> String {
    error
        .server_message()
        .map(|m| format!("Error: {m}"))
        .unwrap_or_else(|| fallback.to_string())
}

#[derive(Debug)]
pub struct CompaniesView {
    api: ApiClient,
    pub rows: Vec<CompanyRow>,
    pub search: String,
    pub roles: Vec<RoleOption>,
    pub roles_loading: bool,
    pub form: CompanyForm,
    pub form_errors: BTreeMap<String, String>,
    pub add_modal: Modal,
    pub edit_form: CompanyEditForm,
    pub edit_modal: Modal,
    pub editing_id: Option<String>,
    pub is_loading: bool,
    pub notices: Notices,
    local_ids: LocalIds,
}

impl CompaniesView {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            rows: Vec::new(),
            search: String::new(),
            roles: Vec::new(),
            roles_loading: false,
            form: CompanyForm::default(),
            form_errors: BTreeMap::new(),
            add_modal: Modal::Closed,
            edit_form: CompanyEditForm::default(),
            edit_modal: Modal::Closed,
            editing_id: None,
            is_loading: false,
            notices: Notices::default(),
            local_ids: LocalIds::default(),
        }
    }

    pub async fn load(&mut self) {
        self.is_loading = true;
        self.rows = match self.api.list_companies(&ListParams::new(0, PAGE_LIMIT)).await {
            Ok(companies) => companies
                .iter()
                .map(|c| CompanyRow::from_api(c, &mut self.local_ids))
                .collect(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch companies");
                Vec::new()
            }
        };
        self.is_loading = false;
    }

    pub fn filtered(&self) -> Vec<&CompanyRow> {
        filter_rows(&self.rows, &self.search)
    }

    async fn load_roles(&mut self) {
        self.roles_loading = true;
        self.roles = match self.api.list_roles(&ListParams::new(0, PAGE_LIMIT)).await {
            Ok(roles) => roles.iter().filter_map(RoleOption::from_api).collect(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch roles");
                Vec::new()
            }
        };
        self.roles_loading = false;
    }

    /// Open the add form and fetch the role picker
    pub async fn open_add(&mut self) {
        self.form = CompanyForm::default();
        self.form_errors.clear();
        self.add_modal.open();
        self.load_roles().await;
    }

    pub fn close_add(&mut self) {
        self.add_modal.close();
        self.form = CompanyForm::default();
        self.form_errors.clear();
    }

    /// Forget the error of a field the user is editing
    pub fn clear_error(&mut self, field: &str) {
        self.form_errors.remove(field);
    }

    pub async fn submit_create(&mut self) -> bool {
        self.form_errors = self.form.check();
        if !self.form_errors.is_empty() {
            return false;
        }

        match self.api.create_company(&self.form.to_create()).await {
            Ok(_) => {
                self.notices.success(MSG_CREATED);
                self.close_add();
                self.load().await;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to add company");
                self.notices.error(failure_message(&e, MSG_CREATE_FAILED));
                false
            }
        }
    }

    pub fn open_edit(&mut self, id: &str) -> bool {
        let Some(row) = self.rows.iter().find(|r| r.id == id) else {
            return false;
        };
        self.edit_form = CompanyEditForm {
            name: row.name.clone(),
            email: row.email.clone(),
            password: String::new(),
        };
        self.editing_id = Some(row.id.clone());
        self.edit_modal.open();
        true
    }

    pub fn close_edit(&mut self) {
        self.edit_modal.close();
        self.editing_id = None;
        self.edit_form = CompanyEditForm::default();
    }

    pub async fn submit_update(&mut self) -> bool {
        let Some(id) = self.editing_id.clone() else {
            return false;
        };
        if is_local_id(&id) {
            tracing::warn!(id = %id, "Refusing to update company without server id");
            self.notices.error(MSG_NO_SERVER_ID);
            return false;
        }
        let original = self.rows.iter().find(|r| r.id == id);
        let update = self.edit_form.changes(original);
        if update == CompanyUpdate::default() {
            self.notices.info(MSG_NO_CHANGES);
            return false;
        }

        match self.api.update_company(&id, &update).await {
            Ok(_) => {
                self.notices.success(MSG_UPDATED);
                self.close_edit();
                self.load().await;
                true
            }
            Err(e) => {
                tracing::error!(id = %id, error = %e, "Failed to update company");
                self.notices.error(failure_message(&e, MSG_UPDATE_FAILED));
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

    fn filled() -> CompanyForm {
        CompanyForm {
            company_name: "Globex".into(),
            email: "hr@globex.test".into(),
            password: "secret1".into(),
            company_code: "GLX".into(),
            no_of_employee: "40".into(),
            no_of_restraunt: "2".into(),
            address: "1 Main St".into(),
            roleid: "2".into(),
        }
    }

    #[test]
    fn test_row_placeholders() {
        let row = CompanyRow::from_api(&Company::default(), &mut LocalIds::default());
        assert_eq!(row.id, "local-0");
        assert_eq!(row.name, "Unnamed Company");
        assert_eq!(row.code, "N/A");
        assert_eq!(row.email, "No email");
        assert_eq!(row.address, "No address");
        assert_eq!(row.employees, "Unknown");
        assert_eq!(row.restaurants, 0);
        assert_eq!(row.status, "Active");
    }

    #[test]
    fn test_form_errors_per_field() {
        let errors = CompanyForm::default().check();
        assert_eq!(errors.len(), 8);
        assert_eq!(errors["email"], "Email is required");
        assert_eq!(errors["password"], "Password is required");
        assert_eq!(errors["roleid"], "Role is required");

        let errors = CompanyForm {
            email: "nope".into(),
            password: "123".into(),
            ..filled()
        }
        .check();
        assert_eq!(errors["email"], "Email is invalid");
        assert_eq!(errors["password"], "Password must be at least 6 characters");
        assert!(filled().check().is_empty());
    }

    #[test]
    fn test_edit_sends_only_changes() {
        let row = CompanyRow::from_api(
            &Company {
                id: Some("1".into()),
                company_name: Some("Acme".into()),
                email: Some("a@acme.test".into()),
                ..Default::default()
            },
            &mut LocalIds::default(),
        );
        let form = CompanyEditForm {
            name: "Acme".into(),
            email: " b@acme.test ".into(),
            password: String::new(),
        };
        assert_eq!(
            form.changes(Some(&row)),
            CompanyUpdate {
                name: None,
                email: Some("b@acme.test".into()),
                password: None,
            }
        );
    }

    #[tokio::test]
    async fn test_open_add_fetches_roles_from_any_shape() {
        let transport = Arc::new(RecordingTransport::new());
        transport.respond(
            Method::Post,
            "/role/getAllRoles",
            json!({"roles": [{"id": 2, "role_name": "company admin"}, {"role_name": "orphan"}]}),
        );
        let mut view = CompaniesView::new(ApiClient::new(transport.clone()));
        view.open_add().await;

        assert!(view.add_modal.is_open());
        assert_eq!(view.roles, vec![RoleOption { id: "2".into(), name: "company admin".into() }]);
        let call = &transport.calls(Method::Post, "/role/getAllRoles")[0];
        assert_eq!(call.body, Some(json!({"params": {"start": 0, "limit": 100, "search": ""}})));
    }

    #[tokio::test]
    async fn test_create_refetches_and_reports_server_message() {
        let transport = Arc::new(RecordingTransport::new());
        transport
            .respond(Method::Post, "/company/createCompany", json!({"message": "created"}))
            .respond(Method::Get, "/company/getAllCompanies", json!({"data": [{"id": 1}]}));
        let mut view = CompaniesView::new(ApiClient::new(transport.clone()));
        view.add_modal.open();
        view.form = filled();
        assert!(view.submit_create().await);
        assert!(!view.add_modal.is_open());
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.notices.last().unwrap().message, MSG_CREATED);

        let transport = Arc::new(RecordingTransport::new());
        transport.respond(Method::Post, "/company/createCompany", json!(null));
        let mut view = CompaniesView::new(ApiClient::new(transport.clone()));
        view.form = CompanyForm::default();
        assert!(!view.submit_create().await);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_no_changes_skips_request() {
        let transport = Arc::new(RecordingTransport::new());
        let mut view = CompaniesView::new(ApiClient::new(transport.clone()));
        view.rows.push(CompanyRow::from_api(
            &Company {
                id: Some("1".into()),
                company_name: Some("Acme".into()),
                ..Default::default()
            },
            &mut LocalIds::default(),
        ));
        assert!(view.open_edit("1"));
        assert!(!view.submit_update().await);
        assert_eq!(view.notices.last().unwrap().message, MSG_NO_CHANGES);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_update_of_row_without_id_is_refused() {
        let transport = Arc::new(RecordingTransport::new());
        transport.respond(
            Method::Get,
            "/company/getAllCompanies",
            json!({"data": [{"company_name": "First"}, {"company_name": "Second"}]}),
        );
        let mut view = CompaniesView::new(ApiClient::new(transport.clone()));
        view.load().await;
        assert_eq!(view.rows[0].id, "local-0");
        assert_eq!(view.rows[1].id, "local-1");

        transport.clear_requests();
        assert!(view.open_edit("local-1"));
        view.edit_form.name = "Renamed".into();
        assert!(!view.submit_update().await);
        assert_eq!(view.notices.last().unwrap().message, MSG_NO_SERVER_ID);
        assert!(transport.requests().is_empty());
    }
}
