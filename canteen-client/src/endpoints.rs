//! Admin API paths
//!
//! Patterns use `:param` segments, the same spelling role grants use, so a
//! constant here can be passed straight to the permission predicate.

pub const LOGIN: &str = "/adminUser/login";

// Users
pub const USERS: &str = "/user/getAllUsers";
pub const USERS_BY_COMPANY: &str = "/user/getAllUserByCompanyId/:companyId";
pub const USER_CREATE: &str = "/user/createUser";
pub const USER_UPDATE_PROFILE: &str = "/user/updateUserProfile/:userId";
pub const USER_DELETE: &str = "/user/deleteUser/:userId";

// Canteens
pub const CANTEENS: &str = "/canteen/getAllCanteens";
pub const CANTEENS_ALT: &str = "/canteens";
pub const CANTEEN_CREATE: &str = "/canteen/createCanteen";
pub const CANTEEN_UPDATE: &str = "/canteen/updateCanteen/:id";
pub const CANTEEN_DELETE: &str = "/canteen/deleteCanteen/:id";

// Companies
pub const COMPANIES: &str = "/company/getAllCompanies";
pub const COMPANY_CREATE: &str = "/company/createCompany";
pub const COMPANY_UPDATE: &str = "/company/updateCompany/:id";

// Roles
pub const ROLES: &str = "/role/getAllRoles";

// Categories
pub const CATEGORIES_BY_CANTEEN: &str = "/canteen/getCategoriesByCanteenId/:canteenId";
pub const CATEGORY_CREATE: &str = "/canteen/createCategory";
pub const CATEGORY_UPDATE: &str = "/canteen/updateCategory/:id";
pub const CATEGORY_DELETE: &str = "/canteen/deleteCategory/:id";

// Subcategories
pub const SUBCATEGORIES_BY_CANTEEN: &str = "/canteen/getSubCategoryByCanteenId/:canteenId";
pub const SUBCATEGORY_CREATE: &str = "/canteen/createSubCategory";
pub const SUBCATEGORY_DELETE: &str = "/canteen/deleteSubCategory/:id";

// Subcategory types
pub const SUBTYPES_BY_CANTEEN: &str = "/canteen/getAllcategoriesSubTypesByCanteenId/:canteenId";
pub const SUBTYPE_CREATE: &str = "/canteen/createCategoriesSubTypeItem";
pub const SUBTYPE_UPDATE: &str = "/canteen/updateSubTypesBySubCategoryTypeId/:id";

// Menu items
pub const MENU_ITEMS: &str = "/menu/getAllMenuItems";
pub const MENU_ITEM_CREATE: &str = "/menu/createMenuItem";
pub const MENU_ITEM_UPDATE: &str = "/menu/updateMenuItem/:id";
pub const MENU_ITEM_DELETE: &str = "/menu/deleteMenuItem/:id";

// Orders
pub const ORDERS_BY_CANTEEN: &str = "/cart/getAllOrderByCanteenId/:canteenId";
pub const ORDER_BY_ID: &str = "/cart/getOrderByOrderId/:orderId";
pub const ORDER_UPDATE_STATUS: &str = "/cart/updateOrderStatus/:orderId";

/// Substitute the single trailing `:param` of `pattern` with `value`
pub fn with_id(pattern: &str, value: &str) -> String {
    match pattern.rfind("/:") {
        Some(idx) => format!("{}/{}", &pattern[..idx], value),
        None => format!("{}/{}", pattern.trim_end_matches('/'), value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::permission::match_api_path;

    #[test]
    fn test_with_id() {
        assert_eq!(with_id(CANTEEN_UPDATE, "7"), "/canteen/updateCanteen/7");
        assert_eq!(with_id(ORDERS_BY_CANTEEN, "12"), "/cart/getAllOrderByCanteenId/12");
        assert_eq!(with_id("/plain", "1"), "/plain/1");
    }

    #[test]
    fn test_substituted_paths_match_their_patterns() {
        for pattern in [USER_DELETE, CATEGORY_UPDATE, SUBTYPE_UPDATE, ORDER_BY_ID, MENU_ITEM_DELETE] {
            assert!(match_api_path(pattern, &with_id(pattern, "42")), "{pattern}");
        }
    }
}
