//! Seed data
//!
//! One company with one canteen, a small catalog, two employees and two
//! orders. Three admin logins cover the three role tiers.

use shared::models::{
    ApiPermission, Canteen, Category, Company, MenuItem, Order, OrderCustomer, OrderLine, Role,
    RoleSummary, ServicePermission, Subcategory, SubcategoryType, User, UserCompany,
};

use crate::state::{AdminAccount, Scoped, Store};

pub const SUPER_ADMIN_EMAIL: &str = "superadmin@gmail.com";
pub const SUPER_ADMIN_PASSWORD: &str = "admin123";
pub const COMPANY_ADMIN_EMAIL: &str = "admin@acme.test";
pub const COMPANY_ADMIN_PASSWORD: &str = "acme123";
pub const CANTEEN_ADMIN_EMAIL: &str = "canteen@acme.test";
pub const CANTEEN_ADMIN_PASSWORD: &str = "canteen123";

pub const COMPANY_ID: &str = "1";
pub const CANTEEN_ID: &str = "1";

const CREATED: &str = "2024-03-01T09:30:00.000Z";

fn grant(api: &str, method: &str) -> ApiPermission {
    ApiPermission {
        id: None,
        api: api.to_string(),
        methods: vec![method.to_string()],
        allowed: true,
    }
}

fn service(name: &str, grants: Vec<ApiPermission>) -> ServicePermission {
    ServicePermission {
        id: None,
        service_name: name.to_string(),
        api_permissions: grants,
    }
}

fn role(id: &str, name: &str, permissions: Vec<ServicePermission>) -> Role {
    Role {
        id: Some(id.to_string()),
        name: name.to_string(),
        permissions,
    }
}

fn company_admin_role() -> Role {
    role(
        "2",
        "company admin",
        vec![
            service(
                "UserService",
                vec![
                    grant("/user/getAllUsers", "GET"),
                    grant("/user/getAllUserByCompanyId/:companyId", "GET"),
                    grant("/user/createUser", "POST"),
                    grant("/user/updateUserProfile/:userId", "PUT"),
                    grant("/user/deleteUser/:userId", "DELETE"),
                ],
            ),
            service(
                "CanteenService",
                vec![
                    grant("/canteen/getAllCanteens", "GET"),
                    grant("/canteen/createCanteen", "POST"),
                    grant("/canteen/updateCanteen/:id", "PUT"),
                    grant("/canteen/deleteCanteen/:id", "DELETE"),
                ],
            ),
        ],
    )
}

fn canteen_admin_role() -> Role {
    role(
        "4",
        "canteen admin",
        vec![
            service(
                "CategoryService",
                vec![
                    grant("/canteen/getCategoriesByCanteenId/:canteenId", "GET"),
                    grant("/canteen/getSubCategoryByCanteenId/:canteenId", "GET"),
                    grant("/canteen/getAllcategoriesSubTypesByCanteenId/:canteenId", "GET"),
                ],
            ),
            service("MenuService", vec![grant("/menu/getAllMenuItems", "GET")]),
            service(
                "Order Service",
                vec![
                    grant("/cart/getAllOrderByCanteenId/:canteenId", "GET"),
                    grant("/cart/updateOrderStatus/:orderId", "PUT"),
                ],
            ),
        ],
    )
}

fn s(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn categories() -> Vec<Category> {
    [("1", "Breakfast", "Morning counter"), ("2", "Lunch", "Noon thali and mains")]
        .into_iter()
        .map(|(id, name, description)| Category {
            id: s(id),
            canteenid: s(CANTEEN_ID),
            item_name: s(name),
            description: s(description),
            is_available: Some(true),
            createddate: s(CREATED),
            ..Default::default()
        })
        .collect()
}

fn subcategory_types(categories: &[Category]) -> Vec<Scoped<SubcategoryType>> {
    [("1", "South Indian", 0), ("2", "Thali", 1)]
        .into_iter()
        .map(|(id, name, category)| {
            let parent = &categories[category];
            Scoped::new(
                CANTEEN_ID,
                SubcategoryType {
                    id: s(id),
                    canteencategoriesid: parent.id.clone(),
                    item_name: s(name),
                    is_available: Some(true),
                    createddate: s(CREATED),
                    category: Some(parent.clone()),
                    ..Default::default()
                },
            )
        })
        .collect()
}

fn subcategories(types: &[Scoped<SubcategoryType>]) -> Vec<Scoped<Subcategory>> {
    [("1", "Idli Vada", 40.0, 0, 3), ("2", "Veg Thali", 120.0, 1, 5)]
        .into_iter()
        .map(|(id, name, price, parent, counter)| {
            let parent = &types[parent].record;
            Scoped::new(
                CANTEEN_ID,
                Subcategory {
                    id: s(id),
                    subcategory_type_id: parent.id.clone(),
                    item_name: s(name),
                    price: Some(price),
                    counter_number: Some(counter),
                    is_available: Some(true),
                    createddate: s(CREATED),
                    subcategory_type: Some(parent.clone()),
                    ..Default::default()
                },
            )
        })
        .collect()
}

fn orders() -> Vec<Scoped<Order>> {
    let order = |id: &str, number: &str, customer: &str, status: &str, lines: Vec<(&str, i64, f64)>| {
        let items: Vec<OrderLine> = lines
            .into_iter()
            .map(|(sub, quantity, price)| OrderLine {
                subcategory_id: s(sub),
                quantity: Some(quantity),
                price: Some(price),
            })
            .collect();
        let total = items
            .iter()
            .map(|l| l.price.unwrap_or_default() * l.quantity.unwrap_or_default() as f64)
            .sum();
        Scoped::new(
            CANTEEN_ID,
            Order {
                id: s(id),
                order_number: s(number),
                total_amount: Some(total),
                status: s(status),
                createddate: s(CREATED),
                items,
                payment_status: s("paid"),
                payment_method: s("wallet"),
                customer: Some(OrderCustomer {
                    name: s(customer),
                    email: None,
                }),
            },
        )
    };
    vec![
        order("1", "ORD-1001", "Priya Nair", "ordered", vec![("1", 2, 40.0)]),
        order("2", "ORD-1002", "Arjun Rao", "preparing", vec![("2", 1, 120.0), ("1", 1, 40.0)]),
    ]
}

/// Seeded store
pub fn store() -> Store {
    let categories = categories();
    let subcategory_types = subcategory_types(&categories);
    let subcategories = subcategories(&subcategory_types);

    Store {
        next_id: 100,
        admins: vec![
            AdminAccount {
                id: "1".to_string(),
                email: SUPER_ADMIN_EMAIL.to_string(),
                password: SUPER_ADMIN_PASSWORD.to_string(),
                name: "Platform".to_string(),
                role: role("1", "Super Admin", Vec::new()),
            },
            AdminAccount {
                id: COMPANY_ID.to_string(),
                email: COMPANY_ADMIN_EMAIL.to_string(),
                password: COMPANY_ADMIN_PASSWORD.to_string(),
                name: "Acme Corp".to_string(),
                role: company_admin_role(),
            },
            AdminAccount {
                id: CANTEEN_ID.to_string(),
                email: CANTEEN_ADMIN_EMAIL.to_string(),
                password: CANTEEN_ADMIN_PASSWORD.to_string(),
                name: "North Canteen".to_string(),
                role: canteen_admin_role(),
            },
        ],
        roles: [("2", "company admin"), ("4", "canteen admin")]
            .into_iter()
            .map(|(id, name)| RoleSummary {
                id: s(id),
                role_name: s(name),
            })
            .collect(),
        companies: vec![Company {
            id: s(COMPANY_ID),
            company_name: s("Acme Corp"),
            company_code: s("ACME"),
            email: s(COMPANY_ADMIN_EMAIL),
            address: s("12 Harbour Road"),
            no_of_employee: s("250"),
            no_of_restraunt: Some(1),
            roleid: s("2"),
            status: s("active"),
            createddate: s(CREATED),
            updateddate: None,
        }],
        canteens: vec![Canteen {
            canteenid: s(CANTEEN_ID),
            canteen_name: s("North Canteen"),
            email: s(CANTEEN_ADMIN_EMAIL),
            address: s("Block A, Ground Floor"),
            phone: s("+91 98450 00000"),
            slug: s("north-canteen"),
            companyid: s(COMPANY_ID),
            roleid: s("4"),
            is_active: Some(true),
            createddate: s(CREATED),
            updateddate: None,
        }],
        users: [("11", "Priya Nair", "priya@acme.test", "E-101"), ("12", "Arjun Rao", "arjun@acme.test", "E-102")]
            .into_iter()
            .map(|(id, name, email, empid)| User {
                user_id: s(id),
                name: s(name),
                email: s(email),
                empid: s(empid),
                wallet_balance: Some(500.0),
                companyid: s(COMPANY_ID),
                status: s("active"),
                createddate: s(CREATED),
                company: Some(UserCompany {
                    company_name: s("Acme Corp"),
                }),
                ..Default::default()
            })
            .collect(),
        categories,
        subcategory_types,
        subcategories,
        menu_items: vec![MenuItem {
            id: s("1"),
            name: s("Masala Dosa"),
            description: s("Crisp dosa with potato filling"),
            price: Some(60.0),
            category_id: s("1"),
            category_name: s("Breakfast"),
            subcategory_id: s("1"),
            subcategory_name: s("Idli Vada"),
            canteen_id: s(CANTEEN_ID),
            canteen_name: s("North Canteen"),
            status: s("active"),
            createddate: s(CREATED),
            ..Default::default()
        }],
        orders: orders(),
    }
}
