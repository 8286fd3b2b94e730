//! Screen view-models
//!
//! One module per dashboard screen. A view owns its rows, its form, its
//! modals and a notice queue; it talks to the backend only through
//! [`ApiClient`](canteen_client::ApiClient). Failures never propagate out of a
//! view: they are logged and turned into notices or inline error strings.

pub mod canteens;
pub mod categories;
pub mod companies;
pub mod menu_items;
pub mod orders;
pub mod subcategories;
pub mod subcategory_types;
pub mod users;

use std::collections::BTreeMap;

use validator::{ValidationErrors, ValidationErrorsKind};

pub use canteens::CanteensView;
pub use categories::CategoriesView;
pub use companies::CompaniesView;
pub use menu_items::MenuItemsView;
pub use orders::OrdersView;
pub use subcategories::SubcategoriesView;
pub use subcategory_types::SubcategoryTypesView;
pub use users::UsersView;

/// Dialog state: there is no third state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modal {
    #[default]
    Closed,
    Open,
}

impl Modal {
    pub fn open(&mut self) {
        *self = Self::Open;
    }

    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Prefix of ids handed to rows the backend sent without one
pub const LOCAL_ID_PREFIX: &str = "local-";

/// Ids for rows without a backend id.
///
/// Each view owns one. Values are never reused, so a local id names exactly
/// one row for the life of the view even after rows are removed or reloaded.
#[derive(Debug, Default)]
pub struct LocalIds {
    next: usize,
}

impl LocalIds {
    pub fn issue(&mut self) -> String {
        let id = format!("{LOCAL_ID_PREFIX}{}", self.next);
        self.next += 1;
        id
    }
}

/// Notice for writes aimed at a row the backend never identified
pub const MSG_NO_SERVER_ID: &str = "This record has no id on the server and cannot be changed.";

/// Whether `id` was issued by [`LocalIds`]; such rows are unknown to the backend
pub fn is_local_id(id: &str) -> bool {
    id.starts_with(LOCAL_ID_PREFIX)
}

/// Display rows that take part in the search box
pub trait Searchable {
    /// Fields matched against the search term
    fn search_fields(&self) -> Vec<&str>;

    fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&term))
    }
}

/// Rows matching `term` (case-insensitive substring over the search fields)
pub fn filter_rows<'a, T: Searchable>(rows: &'a [T], term: &str) -> Vec<&'a T> {
    rows.iter().filter(|row| row.matches(term)).collect()
}

/// `value` when present and non-blank, otherwise `placeholder`
pub fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(placeholder)
        .to_string()
}

/// Flatten validator output into `field -> first message`
pub fn field_errors(errors: &ValidationErrors) -> BTreeMap<String, String> {
    errors
        .errors()
        .iter()
        .filter_map(|(field, kind)| match kind {
            ValidationErrorsKind::Field(list) => list.first().map(|e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid"));
                (field.to_string(), message)
            }),
            _ => None,
        })
        .collect()
}

/// Trimmed text, `None` when blank
pub fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    struct Row(&'static str, &'static str);

    impl Searchable for Row {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.0, self.1]
        }
    }

    #[derive(Validate)]
    struct Form {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
        #[validate(email(message = "Enter a valid email"))]
        email: String,
    }

    #[test]
    fn test_local_ids_are_never_reused() {
        let mut ids = LocalIds::default();
        let first = ids.issue();
        let second = ids.issue();
        assert_eq!(first, "local-0");
        assert_eq!(second, "local-1");
        assert_ne!(ids.issue(), first);
        assert!(is_local_id(&second));
        assert!(!is_local_id("5"));
    }

    #[test]
    fn test_modal_transitions() {
        let mut modal = Modal::default();
        assert!(!modal.is_open());
        modal.open();
        modal.open();
        assert_eq!(modal, Modal::Open);
        modal.close();
        assert_eq!(modal, Modal::Closed);
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let rows = [Row("North Canteen", "Block A"), Row("South", "Harbour")];
        assert_eq!(filter_rows(&rows, "NORTH").len(), 1);
        assert_eq!(filter_rows(&rows, "harb").len(), 1);
        assert_eq!(filter_rows(&rows, "  ").len(), 2);
        assert!(filter_rows(&rows, "east").is_empty());
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(or_placeholder(None, "No phone"), "No phone");
        assert_eq!(or_placeholder(Some("  "), "No phone"), "No phone");
        assert_eq!(or_placeholder(Some(" 123 "), "No phone"), "123");
        assert_eq!(non_blank("  x "), Some("x".to_string()));
        assert!(non_blank("").is_none());
    }

    #[test]
    fn test_field_errors_are_flattened() {
        let form = Form {
            name: String::new(),
            email: "nope".into(),
        };
        let errors = field_errors(&form.validate().unwrap_err());
        assert_eq!(errors.get("name").map(String::as_str), Some("Name is required"));
        assert_eq!(errors.get("email").map(String::as_str), Some("Enter a valid email"));
    }
}
