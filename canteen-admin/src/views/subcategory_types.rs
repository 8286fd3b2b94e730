//! Subcategory types screen (canteen-scoped)
//!
//! Types and the category picker load side by side; either may fail without
//! discarding the other.

use std::collections::BTreeMap;

use canteen_client::ApiClient;
use serde::Serialize;
use shared::models::{Availability, Category, SubcategoryType, SubcategoryTypeWrite};
use shared::util::display_date;
use validator::Validate;

use super::categories::MSG_NO_CANTEEN;
use super::{LocalIds, MSG_NO_SERVER_ID, Modal, field_errors, is_local_id};
use crate::notice::Notices;

pub const MSG_TYPES_FAILED: &str = "Some data failed to load (sub types).";
pub const MSG_CATEGORIES_FAILED: &str = "Some data failed to load (categories).";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubcategoryTypeRow {
    pub id: String,
    pub category_id: String,
    pub name: String,
    pub category_name: String,
    pub image: String,
    pub status: Availability,
    pub created_at: String,
}

impl SubcategoryTypeRow {
    pub fn from_api(
        subtype: &SubcategoryType,
        local_ids: &mut LocalIds,
        categories: &[CategoryOption],
    ) -> Self {
        let category_id = subtype.canteencategoriesid.clone().unwrap_or_default();
        let category_name = subtype
            .category
            .as_ref()
            .and_then(|c| c.item_name.clone())
            .or_else(|| {
                categories
                    .iter()
                    .find(|c| c.id == category_id)
                    .map(|c| c.name.clone())
            })
            .unwrap_or_else(|| "-".to_string());
        Self {
            id: subtype.id.clone().unwrap_or_else(|| local_ids.issue()),
            category_id,
            name: subtype.item_name.clone().unwrap_or_default(),
            category_name,
            image: subtype.sub_cat_type_img.clone().unwrap_or_default(),
            status: Availability::from_flag(subtype.is_available),
            created_at: display_date(subtype.createddate.as_deref()),
        }
    }
}

/// Category picker entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryOption {
    pub id: String,
    pub name: String,
}

impl CategoryOption {
    fn from_api(category: &Category) -> Option<Self> {
        let id = category.id.clone()?;
        Some(Self {
            name: category.item_name.clone().unwrap_or_else(|| id.clone()),
            id,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct SubcategoryTypeForm {
    pub id: Option<String>,
    #[validate(length(min = 1, message = "Category is required"))]
    pub canteencategoriesid: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub item_name: String,
    pub image: String,
    pub is_available: bool,
}

impl Default for SubcategoryTypeForm {
    fn default() -> Self {
        Self {
            id: None,
            canteencategoriesid: String::new(),
            item_name: String::new(),
            image: String::new(),
            is_available: true,
        }
    }
}

impl SubcategoryTypeForm {
    fn from_row(row: &SubcategoryTypeRow) -> Self {
        Self {
            id: Some(row.id.clone()),
            canteencategoriesid: row.category_id.clone(),
            item_name: row.name.clone(),
            image: row.image.clone(),
            is_available: row.status.is_active(),
        }
    }

    pub fn check(&self) -> BTreeMap<String, String> {
        let trimmed = Self {
            canteencategoriesid: self.canteencategoriesid.trim().to_string(),
            item_name: self.item_name.trim().to_string(),
            ..self.clone()
        };
        match trimmed.validate() {
            Ok(()) => BTreeMap::new(),
            Err(e) => field_errors(&e),
        }
    }

    pub fn to_write(&self) -> SubcategoryTypeWrite {
        SubcategoryTypeWrite {
            canteencategoriesid: self.canteencategoriesid.trim().to_string(),
            item_name: self.item_name.trim().to_string(),
            sub_cat_type_img: self.image.trim().to_string(),
            is_available: self.is_available,
        }
    }
}

#[derive(Debug)]
pub struct SubcategoryTypesView {
    api: ApiClient,
    canteen_id: Option<String>,
    pub rows: Vec<SubcategoryTypeRow>,
    pub categories: Vec<CategoryOption>,
    /// Soft load error; rows that did load are still shown
    pub error: Option<String>,
    pub form: SubcategoryTypeForm,
    pub form_errors: BTreeMap<String, String>,
    pub create_modal: Modal,
    pub edit_modal: Modal,
    pub is_loading: bool,
    pub notices: Notices,
    local_ids: LocalIds,
}

impl SubcategoryTypesView {
    pub fn new(api: ApiClient, canteen_id: Option<String>) -> Self {
        Self {
            api,
            canteen_id,
            rows: Vec::new(),
            categories: Vec::new(),
            error: None,
            form: SubcategoryTypeForm::default(),
            form_errors: BTreeMap::new(),
            create_modal: Modal::Closed,
            edit_modal: Modal::Closed,
            is_loading: false,
            notices: Notices::default(),
            local_ids: LocalIds::default(),
        }
    }

    fn set_rows(&mut self, subtypes: &[SubcategoryType]) {
        self.rows = subtypes
            .iter()
            .map(|s| SubcategoryTypeRow::from_api(s, &mut self.local_ids, &self.categories))
            .collect();
    }

    pub async fn load(&mut self) {
        let Some(canteen_id) = self.canteen_id.clone() else {
            self.error = Some(MSG_NO_CANTEEN.to_string());
            return;
        };

        self.is_loading = true;
        self.error = None;
        let (subtypes, categories) = tokio::join!(
            self.api.list_subcategory_types(&canteen_id),
            self.api.list_categories(&canteen_id),
        );

        let mut failed = Vec::new();
        match categories {
            Ok(categories) => {
                self.categories = categories.iter().filter_map(CategoryOption::from_api).collect();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Category picker failed to load");
                failed.push(MSG_CATEGORIES_FAILED);
            }
        }
        match subtypes {
            Ok(subtypes) => self.set_rows(&subtypes),
            Err(e) => {
                tracing::warn!(error = %e, "Sub types failed to load");
                failed.insert(0, MSG_TYPES_FAILED);
            }
        }
        self.error = failed.first().map(|m| m.to_string());
        self.is_loading = false;
    }

    async fn refresh(&mut self, canteen_id: &str) -> canteen_client::ClientResult<()> {
        let subtypes = self.api.list_subcategory_types(canteen_id).await?;
        self.set_rows(&subtypes);
        Ok(())
    }

    pub fn open_create(&mut self) {
        self.form = SubcategoryTypeForm::default();
        self.form_errors.clear();
        self.create_modal.open();
    }

    pub fn open_edit(&mut self, id: &str) -> bool {
        let Some(row) = self.rows.iter().find(|r| r.id == id) else {
            return false;
        };
        self.form = SubcategoryTypeForm::from_row(row);
        self.form_errors.clear();
        self.edit_modal.open();
        true
    }

    pub fn close(&mut self) {
        self.create_modal.close();
        self.edit_modal.close();
        self.form = SubcategoryTypeForm::default();
        self.form_errors.clear();
    }

    /// Create when the form has no id, update otherwise
    pub async fn submit(&mut self) -> bool {
        let Some(canteen_id) = self.canteen_id.clone() else {
            self.notices.error(MSG_NO_CANTEEN);
            return false;
        };
        self.form_errors = self.form.check();
        if !self.form_errors.is_empty() {
            return false;
        }
        if let Some(id) = self.form.id.as_deref()
            && is_local_id(id)
        {
            tracing::warn!(id = %id, "Refusing to update sub type without server id");
            self.notices.error(MSG_NO_SERVER_ID);
            return false;
        }

        let payload = self.form.to_write();
        let result = match self.form.id.clone() {
            Some(id) => self.api.update_subcategory_type(&id, &payload).await,
            None => self.api.create_subcategory_type(&payload).await,
        };
        let verb = if self.form.id.is_some() { "update" } else { "create" };

        let outcome = match result {
            Ok(_) => self.refresh(&canteen_id).await,
            Err(e) => Err(e),
        };
        match outcome {
            Ok(()) => {
                self.close();
                self.notices.success(format!("Sub type {verb}d successfully!"));
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to {verb} sub type");
                self.notices.error(format!("Failed to {verb} sub type. Please try again."));
                false
            }
        }
    }
}
