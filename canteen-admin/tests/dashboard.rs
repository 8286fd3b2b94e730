// End-to-end screens against the in-process mock backend

use canteen_admin::commands::{self, canteen_scope, company_scope, order_scope};
use canteen_admin::notice::NoticeKind;
use canteen_admin::views::canteens::{CanteenForm, MSG_CREATED, MSG_CREATE_FAILED};
use canteen_admin::views::companies::CompanyForm;
use canteen_admin::views::{
    CanteensView, CompaniesView, OrdersView, SubcategoriesView, SubcategoryTypesView, UsersView,
};
use canteen_admin::{Cli, navigation};
use canteen_client::{ApiClient, AuthContext, AuthUser, ClientConfig, Session, SessionData, SessionStore};
use canteen_mock::{MockServer, seed};
use chrono::Duration;
use clap::Parser;
use shared::models::{Availability, OrderStatus};
use tempfile::TempDir;

async fn logged_in(email: &str, password: &str) -> (MockServer, AuthContext) {
    let server = canteen_mock::spawn().await.unwrap();
    let session = Session::new();
    let api = ApiClient::network(&ClientConfig::new(server.base_url()), session.clone()).unwrap();
    let auth = AuthContext::new(api, session);
    auth.login(email, password).await.unwrap();
    (server, auth)
}

fn canteen_form() -> CanteenForm {
    CanteenForm {
        name: "South Canteen".into(),
        location: "Block C".into(),
        manager: "south@acme.test".into(),
        phone: "98450 11111".into(),
        password: "secret1".into(),
        slug: "south".into(),
        status: Availability::Active,
    }
}

#[tokio::test]
async fn test_create_canteen_posts_exactly_once() {
    let (server, auth) = logged_in(seed::COMPANY_ADMIN_EMAIL, seed::COMPANY_ADMIN_PASSWORD).await;
    let mut view = CanteensView::new(auth.api().clone());
    view.load().await;
    assert_eq!(view.rows.len(), 1);

    view.open_add();
    view.form = canteen_form();
    assert!(view.submit_create().await);

    assert_eq!(server.state.count("POST", "/canteen/createCanteen"), 1);
    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.rows[1].name, "South Canteen");
    assert!(!view.rows[1].is_local());
    assert!(!view.add_modal.is_open());
    let notice = view.notices.last().unwrap();
    assert_eq!((notice.kind, notice.message.as_str()), (NoticeKind::Success, MSG_CREATED));
}

#[tokio::test]
async fn test_create_canteen_failure_leaves_rows() {
    let (server, auth) = logged_in(seed::COMPANY_ADMIN_EMAIL, seed::COMPANY_ADMIN_PASSWORD).await;
    let mut view = CanteensView::new(auth.api().clone());
    view.load().await;

    server.state.fail_path("/canteen/createCanteen", 500);
    view.open_add();
    view.form = canteen_form();
    assert!(!view.submit_create().await);

    assert_eq!(view.rows.len(), 1);
    assert!(view.add_modal.is_open());
    assert_eq!(view.notices.last().unwrap().message, MSG_CREATE_FAILED);
}

#[tokio::test]
async fn test_canteen_list_falls_back_to_alternate_endpoint() {
    let (server, auth) = logged_in(seed::COMPANY_ADMIN_EMAIL, seed::COMPANY_ADMIN_PASSWORD).await;
    server.state.fail_path("/canteen/getAllCanteens", 500);

    let mut view = CanteensView::new(auth.api().clone());
    view.load().await;

    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].name, "North Canteen");
    assert_eq!(server.state.count("GET", "/canteens"), 1);
}

#[tokio::test]
async fn test_order_status_update_patches_one_row() {
    let (server, auth) = logged_in(seed::CANTEEN_ADMIN_EMAIL, seed::CANTEEN_ADMIN_PASSWORD).await;
    let mut view = OrdersView::new(auth.api().clone(), order_scope(&auth));
    view.load().await;
    assert_eq!(view.rows.len(), 2);

    assert!(view.open_update("1"));
    view.selected_status = OrderStatus::Completed;
    assert!(view.submit_status().await);
    assert_eq!(view.rows[0].status, OrderStatus::Completed);
    assert_eq!(view.rows[1].status, OrderStatus::Preparing);
    assert!(!view.update_modal.is_open());

    server.state.fail_path("/cart/updateOrderStatus/2", 500);
    assert!(view.open_update("2"));
    view.selected_status = OrderStatus::Cancelled;
    assert!(!view.submit_status().await);
    assert_eq!(view.rows[1].status, OrderStatus::Preparing);
    assert!(view.update_error.is_some());
}

#[tokio::test]
async fn test_catalog_screens_use_claims_scope() {
    let (server, auth) = logged_in(seed::CANTEEN_ADMIN_EMAIL, seed::CANTEEN_ADMIN_PASSWORD).await;
    assert_eq!(canteen_scope(&auth).as_deref(), Some(seed::CANTEEN_ID));

    let mut subcategories = SubcategoriesView::new(auth.api().clone(), canteen_scope(&auth));
    subcategories.load().await;
    assert!(subcategories.error.is_none());
    assert_eq!(subcategories.rows.len(), 2);
    assert_eq!(subcategories.subtype_options.len(), 2);
    assert_eq!(subcategories.rows[0].category_name, "Breakfast");

    server.state.fail_path("/canteen/getCategoriesByCanteenId/1", 500);
    let mut types = SubcategoryTypesView::new(auth.api().clone(), canteen_scope(&auth));
    types.load().await;
    assert_eq!(types.rows.len(), 2);
    assert_eq!(types.error.as_deref(), Some("Some data failed to load (categories)."));
}

#[tokio::test]
async fn test_users_and_companies_screens() {
    let (_server, auth) = logged_in(seed::COMPANY_ADMIN_EMAIL, seed::COMPANY_ADMIN_PASSWORD).await;
    let mut users = UsersView::new(auth.api().clone(), company_scope(&auth));
    users.load().await;
    assert_eq!(users.rows.len(), 2);

    let (_server, admin) = logged_in(seed::SUPER_ADMIN_EMAIL, seed::SUPER_ADMIN_PASSWORD).await;
    assert_eq!(navigation::menu_items(&admin).len(), 9);
    let mut companies = CompaniesView::new(admin.api().clone());
    companies.open_add().await;
    assert_eq!(companies.roles.len(), 2);
    companies.form = CompanyForm {
        company_name: "Globex".into(),
        email: "hr@globex.test".into(),
        password: "secret1".into(),
        company_code: "GLX".into(),
        no_of_employee: "40".into(),
        no_of_restraunt: "2".into(),
        address: "1 Main St".into(),
        roleid: "2".into(),
    };
    assert!(companies.submit_create().await);
    assert_eq!(companies.rows.len(), 2);
}

#[tokio::test]
async fn test_commands_drive_the_screens() {
    let server = canteen_mock::spawn().await.unwrap();
    let home = TempDir::new().unwrap();
    let session = Session::new();
    let api = ApiClient::network(&ClientConfig::new(server.base_url()), session.clone()).unwrap();
    let auth = AuthContext::new(api, session).with_store(SessionStore::new(home.path()));

    let parse = |args: &[&str]| {
        let mut argv = vec!["canteen-admin"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().command
    };

    let mut out = Vec::new();
    let err = commands::run(parse(&["orders", "list"]), &auth, &mut out).await.unwrap_err();
    assert!(err.to_string().contains("not logged in"));

    commands::run(
        parse(&["login", "--email", seed::CANTEEN_ADMIN_EMAIL, "--password", seed::CANTEEN_ADMIN_PASSWORD]),
        &auth,
        &mut out,
    )
    .await
    .unwrap();
    assert!(SessionStore::new(home.path()).exists());

    commands::run(parse(&["orders", "set-status", "2", "completed"]), &auth, &mut out)
        .await
        .unwrap();
    assert_eq!(server.state.count("PUT", "/cart/updateOrderStatus/2"), 1);

    let mut listed = Vec::new();
    commands::run(parse(&["orders", "list", "--status", "completed"]), &auth, &mut listed)
        .await
        .unwrap();
    let listed = String::from_utf8(listed).unwrap();
    assert!(listed.contains("ORD-1002"));
    assert!(!listed.contains("ORD-1001"));

    let err = commands::run(parse(&["companies", "list"]), &auth, &mut out).await.unwrap_err();
    assert!(err.to_string().contains("super admin"));

    commands::run(parse(&["logout"]), &auth, &mut out).await.unwrap();
    assert!(!SessionStore::new(home.path()).exists());
}

#[tokio::test]
async fn test_expired_session_is_discarded_on_restore() {
    let server = canteen_mock::spawn().await.unwrap();
    let home = TempDir::new().unwrap();
    let store = SessionStore::new(home.path());

    let token = server
        .state
        .issue_token(seed::CANTEEN_ID, seed::CANTEEN_ADMIN_EMAIL, Duration::hours(-1));
    let mut data = SessionData::default();
    data.set_login(token, AuthUser::default());
    store.save(&data).unwrap();

    let session = Session::new();
    let api = ApiClient::network(&ClientConfig::new(server.base_url()), session.clone()).unwrap();
    let auth = AuthContext::new(api, session).with_store(SessionStore::new(home.path()));

    assert!(auth.restore().is_none());
    assert!(!auth.is_logged_in());
    assert!(!store.exists());
}
