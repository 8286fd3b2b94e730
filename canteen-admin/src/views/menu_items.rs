//! Menu items screen

use std::collections::{BTreeMap, HashMap};

use canteen_client::{ApiClient, ListParams};
use serde::Serialize;
use shared::models::{Availability, MenuItem, MenuItemWrite};
use shared::util::display_date;
use validator::Validate;

use super::{LocalIds, MSG_NO_SERVER_ID, Modal, Searchable, field_errors, filter_rows, is_local_id, or_placeholder};
use crate::notice::Notices;

/// Image used when an item has none
pub const DEFAULT_IMAGE: &str =
    "https://images.pexels.com/photos/1640777/pexels-photo-1640777.jpeg?auto=compress&cs=tinysrgb&w=300";

/// Id → name tables for records that only carry ids
#[derive(Debug, Clone, Default)]
pub struct NameLookup {
    pub categories: HashMap<String, String>,
    pub subcategories: HashMap<String, String>,
    pub canteens: HashMap<String, String>,
}

fn resolve(name: Option<&str>, id: Option<&str>, table: &HashMap<String, String>) -> String {
    let looked_up = id.and_then(|id| table.get(id)).map(String::as_str);
    or_placeholder(name.filter(|n| !n.trim().is_empty()).or(looked_up), "-")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuItemRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub category_id: String,
    pub category_name: String,
    pub subcategory_id: String,
    pub subcategory_name: String,
    pub canteen_id: String,
    pub canteen_name: String,
    pub status: Availability,
    pub created_at: String,
}

impl MenuItemRow {
    pub fn from_api(item: &MenuItem, local_ids: &mut LocalIds, lookup: &NameLookup) -> Self {
        Self {
            id: item.id.clone().unwrap_or_else(|| local_ids.issue()),
            name: or_placeholder(item.name.as_deref(), "Unnamed Item"),
            description: item.description.clone().unwrap_or_default(),
            price: item.price.filter(|p| p.is_finite()).unwrap_or(0.0),
            image: or_placeholder(item.image.as_deref(), DEFAULT_IMAGE),
            category_id: item.category_id.clone().unwrap_or_default(),
            category_name: resolve(item.category_name.as_deref(), item.category_id.as_deref(), &lookup.categories),
            subcategory_id: item.subcategory_id.clone().unwrap_or_default(),
            subcategory_name: resolve(
                item.subcategory_name.as_deref(),
                item.subcategory_id.as_deref(),
                &lookup.subcategories,
            ),
            canteen_id: item.canteen_id.clone().unwrap_or_default(),
            canteen_name: resolve(item.canteen_name.as_deref(), item.canteen_id.as_deref(), &lookup.canteens),
            status: Availability::from_status(item.status.as_deref()),
            created_at: display_date(item.createddate.as_deref()),
        }
    }
}

impl Searchable for MenuItemRow {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str()]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct MenuItemForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "Price is required"))]
    pub price: String,
    pub image: String,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category_id: String,
    #[validate(length(min = 1, message = "Subcategory is required"))]
    pub subcategory_id: String,
    #[validate(length(min = 1, message = "Canteen is required"))]
    pub canteen_id: String,
    pub status: Availability,
}

impl MenuItemForm {
    fn from_row(row: &MenuItemRow) -> Self {
        Self {
            name: row.name.clone(),
            description: row.description.clone(),
            price: row.price.to_string(),
            image: row.image.clone(),
            category_id: row.category_id.clone(),
            subcategory_id: row.subcategory_id.clone(),
            canteen_id: row.canteen_id.clone(),
            status: row.status,
        }
    }

    /// Build the write payload, or the per-field errors
    pub fn to_write(&self) -> Result<MenuItemWrite, BTreeMap<String, String>> {
        let trimmed = Self {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price: self.price.trim().to_string(),
            image: self.image.trim().to_string(),
            category_id: self.category_id.trim().to_string(),
            subcategory_id: self.subcategory_id.trim().to_string(),
            canteen_id: self.canteen_id.trim().to_string(),
            status: self.status,
        };
        let mut errors = match trimmed.validate() {
            Ok(()) => BTreeMap::new(),
            Err(e) => field_errors(&e),
        };
        let price = trimmed.price.parse::<f64>().ok().filter(|p| p.is_finite() && *p >= 0.0);
        if price.is_none() && !errors.contains_key("price") {
            errors.insert("price".into(), "Price must be a number".into());
        }

        match price {
            Some(price) if errors.is_empty() => Ok(MenuItemWrite {
                name: trimmed.name,
                description: trimmed.description,
                price,
                image: if trimmed.image.is_empty() {
                    DEFAULT_IMAGE.to_string()
                } else {
                    trimmed.image
                },
                category_id: trimmed.category_id,
                subcategory_id: trimmed.subcategory_id,
                canteen_id: trimmed.canteen_id,
                status: trimmed.status.to_string(),
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug)]
pub struct MenuItemsView {
    api: ApiClient,
    pub lookup: NameLookup,
    pub rows: Vec<MenuItemRow>,
    pub search: String,
    pub params: ListParams,
    pub form: MenuItemForm,
    pub form_errors: BTreeMap<String, String>,
    pub add_modal: Modal,
    pub edit_modal: Modal,
    pub delete_dialog: Modal,
    pub selected: Option<MenuItemRow>,
    pub is_loading: bool,
    pub notices: Notices,
    local_ids: LocalIds,
}

impl MenuItemsView {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            lookup: NameLookup::default(),
            rows: Vec::new(),
            search: String::new(),
            params: ListParams::default(),
            form: MenuItemForm::default(),
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

    pub fn with_lookup(mut self, lookup: NameLookup) -> Self {
        self.lookup = lookup;
        self
    }

    pub async fn load(&mut self) {
        self.is_loading = true;
        match self.api.list_menu_items(&self.params).await {
            Ok(items) => {
                self.rows = items
                    .iter()
                    .map(|item| MenuItemRow::from_api(item, &mut self.local_ids, &self.lookup))
                    .collect();
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load menu items");
                self.notices.error("Failed to load menu items");
            }
        }
        self.is_loading = false;
    }

    pub fn filtered(&self) -> Vec<&MenuItemRow> {
        filter_rows(&self.rows, &self.search)
    }

    pub fn open_add(&mut self) {
        self.form = MenuItemForm::default();
        self.form_errors.clear();
        self.add_modal.open();
    }

    pub fn open_edit(&mut self, id: &str) -> bool {
        let Some(row) = self.rows.iter().find(|r| r.id == id).cloned() else {
            return false;
        };
        self.form = MenuItemForm::from_row(&row);
        self.form_errors.clear();
        self.selected = Some(row);
        self.edit_modal.open();
        true
    }

    pub fn close_form(&mut self) {
        self.add_modal.close();
        self.edit_modal.close();
        self.selected = None;
        self.form = MenuItemForm::default();
        self.form_errors.clear();
    }

    fn payload(&mut self) -> Option<MenuItemWrite> {
        match self.form.to_write() {
            Ok(payload) => {
                self.form_errors.clear();
                Some(payload)
            }
            Err(errors) => {
                self.form_errors = errors;
                None
            }
        }
    }

    pub async fn submit_create(&mut self) -> bool {
        let Some(payload) = self.payload() else {
            return false;
        };
        match self.api.create_menu_item(&payload).await {
            Ok(_) => {
                self.close_form();
                self.notices.success("Menu item created successfully!");
                self.load().await;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to create menu item");
                self.notices.error("Failed to create menu item. Please try again.");
                false
            }
        }
    }

    pub async fn submit_update(&mut self) -> bool {
        let Some(selected) = self.selected.clone() else {
            return false;
        };
        let Some(payload) = self.payload() else {
            return false;
        };
        if is_local_id(&selected.id) {
            tracing::warn!(id = %selected.id, "Menu item has no server id, not updating");
            self.notices.error(MSG_NO_SERVER_ID);
            return false;
        }
        match self.api.update_menu_item(&selected.id, &payload).await {
            Ok(_) => {
                self.close_form();
                self.notices.success("Menu item updated successfully!");
                self.load().await;
                true
            }
            Err(e) => {
                tracing::error!(id = %selected.id, error = %e, "Failed to update menu item");
                self.notices.error("Failed to update menu item. Please try again.");
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
            tracing::warn!(id = %selected.id, "Menu item has no server id, not deleting");
            self.notices.error(MSG_NO_SERVER_ID);
            return false;
        }
        match self.api.delete_menu_item(&selected.id).await {
            Ok(_) => {
                self.notices.success("Menu item deleted successfully!");
                self.load().await;
                true
            }
            Err(e) => {
                tracing::error!(id = %selected.id, error = %e, "Failed to delete menu item");
                self.notices.error("Failed to delete menu item. Please try again.");
                false
            }
        }
    }
}
