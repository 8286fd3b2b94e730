//! Sidebar entries filtered by the logged-in role

use canteen_client::AuthContext;
use serde::Serialize;

/// A visible navigation entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    pub label: &'static str,
    pub route: &'static str,
}

enum Gate {
    Always,
    SuperAdmin,
    Service {
        name: &'static str,
        api: Option<&'static str>,
        method: Option<&'static str>,
    },
}

const fn service(name: &'static str) -> Gate {
    Gate::Service {
        name,
        api: None,
        method: None,
    }
}

const ENTRIES: &[(MenuEntry, Gate)] = &[
    (MenuEntry { label: "Dashboard", route: "/" }, Gate::Always),
    (
        MenuEntry { label: "Users", route: "/users" },
        Gate::Service {
            name: "UserService",
            api: Some("/user/getAllUsers"),
            method: Some("GET"),
        },
    ),
    (MenuEntry { label: "Companies", route: "/companies" }, Gate::SuperAdmin),
    (MenuEntry { label: "Canteens", route: "/canteens" }, service("CanteenService")),
    (MenuEntry { label: "Categories", route: "/categories" }, service("CategoryService")),
    (MenuEntry { label: "Subcategories", route: "/subcategories" }, service("CategoryService")),
    (MenuEntry { label: "Subcategory Types", route: "/subcategory-types" }, service("CategoryService")),
    (MenuEntry { label: "Menu Items", route: "/menu-items" }, service("MenuService")),
    (MenuEntry { label: "Orders", route: "/orders" }, service("OrderService")),
];

/// Entries the current identity may see, in sidebar order
pub fn menu_items(auth: &AuthContext) -> Vec<MenuEntry> {
    let super_admin = auth.is_super_admin();
    ENTRIES
        .iter()
        .filter(|(_, gate)| match gate {
            Gate::Always => true,
            Gate::SuperAdmin => super_admin,
            Gate::Service { name, api, method } => auth.has_permission(name, *api, *method),
        })
        .map(|(entry, _)| *entry)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use canteen_client::testing::RecordingTransport;
    use canteen_client::{ApiClient, AuthUser, Session};
    use shared::models::{ApiPermission, Role, ServicePermission};
    use std::sync::Arc;

    fn auth_as(email: &str, role: Option<Role>) -> AuthContext {
        let session = Session::new();
        session.set(
            "a.b.c",
            AuthUser {
                id: Some("1".into()),
                email: Some(email.into()),
                name: None,
                role,
            },
        );
        AuthContext::new(ApiClient::new(Arc::new(RecordingTransport::new())), session)
    }

    fn labels(entries: &[MenuEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.label).collect()
    }

    #[test]
    fn test_super_admin_sees_everything() {
        let auth = auth_as("superadmin@gmail.com", None);
        assert_eq!(menu_items(&auth).len(), ENTRIES.len());
    }

    #[test]
    fn test_canteen_admin_sees_granted_services() {
        let role = Role {
            id: Some("3".into()),
            name: "canteen admin".into(),
            permissions: vec![
                ServicePermission {
                    id: None,
                    service_name: "Category Service".into(),
                    api_permissions: vec![],
                },
                ServicePermission {
                    id: None,
                    service_name: "Order Service".into(),
                    api_permissions: vec![],
                },
            ],
        };
        let auth = auth_as("canteen@acme.test", Some(role));
        assert_eq!(
            labels(&menu_items(&auth)),
            vec!["Dashboard", "Categories", "Subcategories", "Subcategory Types", "Orders"]
        );
    }

    #[test]
    fn test_users_entry_needs_the_exact_grant() {
        let grant = |methods: &[&str]| Role {
            id: None,
            name: "company admin".into(),
            permissions: vec![ServicePermission {
                id: None,
                service_name: "UserService".into(),
                api_permissions: vec![ApiPermission {
                    id: None,
                    api: "/user/getAllUsers".into(),
                    methods: methods.iter().map(|m| m.to_string()).collect(),
                    allowed: true,
                }],
            }],
        };
        let auth = auth_as("admin@acme.test", Some(grant(&["GET"])));
        assert!(labels(&menu_items(&auth)).contains(&"Users"));
        let auth = auth_as("admin@acme.test", Some(grant(&["POST"])));
        assert_eq!(labels(&menu_items(&auth)), vec!["Dashboard"]);
    }
}
