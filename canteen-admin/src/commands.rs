//! Command dispatch
//!
//! Each command drives one view the way the dashboard would: load, open a
//! form or dialog, fill it, submit. Output goes to the supplied writer so the
//! same code runs under tests.

use std::collections::BTreeMap;
use std::io::Write;

use anyhow::{Context, bail};
use canteen_client::{AuthContext, AuthUser, ListParams};
use serde::Serialize;

use crate::cli::{
    CanteenCommand, CategoryCommand, Command, CompanyCommand, MenuItemCommand, MenuItemFields, OrderCommand,
    SubcategoryCommand, SubcategoryTypeCommand, UserCommand,
};
use crate::navigation;
use crate::notice::{NoticeKind, Notices};
use crate::views::canteens::CanteenForm;
use crate::views::companies::CompanyForm;
use crate::views::subcategories::SubcategoryForm;
use crate::views::subcategory_types::SubcategoryTypeForm;
use crate::views::users::UserForm;
use crate::views::{
    CanteensView, CategoriesView, CompaniesView, MenuItemsView, OrdersView, SubcategoriesView, SubcategoryTypesView,
    UsersView,
};

/// Company the logged-in admin manages
pub fn company_scope(auth: &AuthContext) -> Option<String> {
    auth.user().and_then(|u| u.id)
}

/// Canteen scope of catalog screens
pub fn canteen_scope(auth: &AuthContext) -> Option<String> {
    auth.claims().and_then(|c| c.canteen_id().map(str::to_string))
}

/// Canteen scope of the orders screen
pub fn order_scope(auth: &AuthContext) -> Option<String> {
    auth.claims().and_then(|c| c.subject_id().map(str::to_string))
}

fn print_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> anyhow::Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

/// Print notices and field errors; fail when the action failed for a reason
/// worth a non-zero exit
fn report<W: Write>(
    out: &mut W,
    notices: &mut Notices,
    form_errors: &BTreeMap<String, String>,
    ok: bool,
    action: &str,
) -> anyhow::Result<()> {
    let drained = notices.drain();
    for notice in &drained {
        writeln!(out, "{notice}")?;
    }
    for (field, message) in form_errors {
        writeln!(out, "  {field}: {message}")?;
    }
    let only_info = !drained.is_empty() && drained.iter().all(|n| n.kind == NoticeKind::Info);
    if ok || (only_info && form_errors.is_empty()) {
        Ok(())
    } else {
        bail!("{action} failed")
    }
}

fn load_error(error: &Option<String>) -> anyhow::Result<()> {
    match error {
        Some(message) => bail!("{message}"),
        None => Ok(()),
    }
}

fn require_login(auth: &AuthContext) -> anyhow::Result<AuthUser> {
    auth.user()
        .filter(|_| auth.is_logged_in())
        .context("not logged in; run `canteen-admin login` first")
}

fn set_if<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

/// Run one command against an (already restored) auth context
pub async fn run<W: Write>(command: Command, auth: &AuthContext, out: &mut W) -> anyhow::Result<()> {
    match command {
        Command::Login { email, password } => {
            let user = auth.login(&email, &password).await.context("login failed")?;
            writeln!(
                out,
                "Logged in as {} ({})",
                user.email.as_deref().unwrap_or(&email),
                user.role_name().unwrap_or("no role")
            )?;
            Ok(())
        }
        Command::Logout => {
            auth.logout();
            writeln!(out, "Logged out")?;
            Ok(())
        }
        Command::Whoami => {
            let user = require_login(auth)?;
            print_json(out, &user)?;
            if let Some(claims) = auth.claims() {
                writeln!(
                    out,
                    "subject: {}  canteen: {}",
                    claims.subject_id().unwrap_or("-"),
                    claims.canteen_id().unwrap_or("-")
                )?;
            }
            Ok(())
        }
        Command::Nav => {
            require_login(auth)?;
            for entry in navigation::menu_items(auth) {
                writeln!(out, "{:<20} {}", entry.label, entry.route)?;
            }
            Ok(())
        }
        Command::Canteens(cmd) => {
            require_login(auth)?;
            canteens(cmd, auth, out).await
        }
        Command::Companies(cmd) => {
            require_login(auth)?;
            if !auth.is_super_admin() {
                bail!("companies are managed by the super admin only");
            }
            companies(cmd, auth, out).await
        }
        Command::Users(cmd) => {
            require_login(auth)?;
            users(cmd, auth, out).await
        }
        Command::Categories(cmd) => {
            require_login(auth)?;
            categories(cmd, auth, out).await
        }
        Command::Subcategories(cmd) => {
            require_login(auth)?;
            subcategories(cmd, auth, out).await
        }
        Command::SubcategoryTypes(cmd) => {
            require_login(auth)?;
            subcategory_types(cmd, auth, out).await
        }
        Command::MenuItems(cmd) => {
            require_login(auth)?;
            menu_items(cmd, auth, out).await
        }
        Command::Orders(cmd) => {
            require_login(auth)?;
            orders(cmd, auth, out).await
        }
    }
}

async fn canteens<W: Write>(cmd: CanteenCommand, auth: &AuthContext, out: &mut W) -> anyhow::Result<()> {
    let mut view = CanteensView::new(auth.api().clone());
    match cmd {
        CanteenCommand::List(args) => {
            view.load().await;
            view.search = args.search;
            print_json(out, &view.filtered())
        }
        CanteenCommand::Create {
            name,
            location,
            manager,
            phone,
            password,
            slug,
            status,
        } => {
            view.open_add();
            view.form = CanteenForm {
                name,
                location,
                manager,
                phone,
                password,
                slug,
                status,
            };
            let ok = view.submit_create().await;
            if ok {
                print_json(out, &view.rows.last())?;
            }
            report(out, &mut view.notices, &view.form_errors, ok, "create canteen")
        }
        CanteenCommand::Update {
            id,
            name,
            location,
            manager,
            phone,
            status,
        } => {
            view.load().await;
            if !view.open_edit(&id) {
                bail!("no canteen with id {id}");
            }
            set_if(&mut view.form.name, name);
            set_if(&mut view.form.location, location);
            set_if(&mut view.form.manager, manager);
            set_if(&mut view.form.phone, phone);
            set_if(&mut view.form.status, status);
            let ok = view.submit_update().await;
            report(out, &mut view.notices, &view.form_errors, ok, "update canteen")
        }
        CanteenCommand::Delete { id } => {
            view.load().await;
            if !view.request_delete(&id) {
                bail!("no canteen with id {id}");
            }
            let ok = view.confirm_delete().await;
            report(out, &mut view.notices, &BTreeMap::new(), ok, "delete canteen")
        }
    }
}

async fn companies<W: Write>(cmd: CompanyCommand, auth: &AuthContext, out: &mut W) -> anyhow::Result<()> {
    let mut view = CompaniesView::new(auth.api().clone());
    match cmd {
        CompanyCommand::List(args) => {
            view.load().await;
            view.search = args.search;
            print_json(out, &view.filtered())
        }
        CompanyCommand::Roles => {
            view.open_add().await;
            print_json(out, &view.roles)
        }
        CompanyCommand::Create {
            name,
            email,
            password,
            code,
            employees,
            restaurants,
            address,
            role,
        } => {
            view.open_add().await;
            view.form = CompanyForm {
                company_name: name,
                email,
                password,
                company_code: code,
                no_of_employee: employees,
                no_of_restraunt: restaurants,
                address,
                roleid: role,
            };
            let ok = view.submit_create().await;
            report(out, &mut view.notices, &view.form_errors, ok, "create company")
        }
        CompanyCommand::Update {
            id,
            name,
            email,
            password,
        } => {
            view.load().await;
            if !view.open_edit(&id) {
                bail!("no company with id {id}");
            }
            set_if(&mut view.edit_form.name, name);
            set_if(&mut view.edit_form.email, email);
            set_if(&mut view.edit_form.password, password);
            let ok = view.submit_update().await;
            report(out, &mut view.notices, &BTreeMap::new(), ok, "update company")
        }
    }
}

async fn users<W: Write>(cmd: UserCommand, auth: &AuthContext, out: &mut W) -> anyhow::Result<()> {
    let mut view = UsersView::new(auth.api().clone(), company_scope(auth));
    match cmd {
        UserCommand::List(args) => {
            view.load().await;
            load_error(&view.error)?;
            view.search = args.search;
            print_json(out, &view.filtered())
        }
        UserCommand::Create {
            name,
            email,
            password,
            phone,
            empid,
            address,
        } => {
            view.open_add();
            view.form = UserForm {
                name,
                email,
                password,
                phonenumber: phone,
                empid,
                address,
            };
            let ok = view.submit_create().await;
            if ok {
                print_json(out, &view.rows.last())?;
            }
            report(out, &mut view.notices, &view.form_errors, ok, "create user")
        }
        UserCommand::Update {
            id,
            name,
            phone,
            address,
        } => {
            view.load().await;
            load_error(&view.error)?;
            if !view.open_edit(&id) {
                bail!("no user with id {id}");
            }
            set_if(&mut view.profile.name, name);
            set_if(&mut view.profile.phonenumber, phone);
            set_if(&mut view.profile.address, address);
            let ok = view.submit_update().await;
            report(out, &mut view.notices, &BTreeMap::new(), ok, "update user")
        }
        UserCommand::Delete { id } => {
            view.load().await;
            load_error(&view.error)?;
            if !view.request_delete(&id) {
                bail!("no user with id {id}");
            }
            let ok = view.confirm_delete().await;
            report(out, &mut view.notices, &BTreeMap::new(), ok, "delete user")
        }
    }
}

async fn categories<W: Write>(cmd: CategoryCommand, auth: &AuthContext, out: &mut W) -> anyhow::Result<()> {
    let mut view = CategoriesView::new(auth.api().clone(), canteen_scope(auth));
    match cmd {
        CategoryCommand::List(args) => {
            view.load().await;
            load_error(&view.error)?;
            view.search = args.search;
            print_json(out, &view.filtered())
        }
        CategoryCommand::Create {
            name,
            description,
            status,
        } => {
            view.open_add();
            view.form.name = name;
            view.form.description = description;
            view.form.status = status;
            let ok = view.submit_create().await;
            report(out, &mut view.notices, &view.form_errors, ok, "create category")
        }
        CategoryCommand::Update {
            id,
            name,
            description,
            status,
        } => {
            view.load().await;
            load_error(&view.error)?;
            if !view.open_edit(&id) {
                bail!("no category with id {id}");
            }
            set_if(&mut view.form.name, name);
            set_if(&mut view.form.description, description);
            set_if(&mut view.form.status, status);
            let ok = view.submit_update().await;
            report(out, &mut view.notices, &view.form_errors, ok, "update category")
        }
        CategoryCommand::Delete { id } => {
            view.load().await;
            load_error(&view.error)?;
            if !view.request_delete(&id) {
                bail!("no category with id {id}");
            }
            let ok = view.confirm_delete().await;
            report(out, &mut view.notices, &BTreeMap::new(), ok, "delete category")
        }
    }
}

async fn subcategories<W: Write>(cmd: SubcategoryCommand, auth: &AuthContext, out: &mut W) -> anyhow::Result<()> {
    let mut view = SubcategoriesView::new(auth.api().clone(), canteen_scope(auth));
    view.load().await;
    load_error(&view.error)?;
    match cmd {
        SubcategoryCommand::List(args) => {
            view.search = args.search;
            print_json(out, &view.filtered())
        }
        SubcategoryCommand::Types => print_json(out, &view.subtype_options),
        SubcategoryCommand::Create {
            type_id,
            name,
            price,
            description,
            image,
            counter,
            unavailable,
        } => {
            view.open_create();
            view.form = SubcategoryForm {
                subcategory_type_id: type_id,
                item_name: name,
                price,
                is_available: !unavailable,
                description,
                image,
                counter_number: counter,
            };
            let ok = view.submit_create().await;
            report(out, &mut view.notices, &view.form_errors, ok, "create subcategory")
        }
        SubcategoryCommand::Delete { id } => {
            if !view.request_delete(&id) {
                bail!("no subcategory with id {id}");
            }
            let ok = view.confirm_delete().await;
            report(out, &mut view.notices, &BTreeMap::new(), ok, "delete subcategory")
        }
    }
}

async fn subcategory_types<W: Write>(
    cmd: SubcategoryTypeCommand,
    auth: &AuthContext,
    out: &mut W,
) -> anyhow::Result<()> {
    let mut view = SubcategoryTypesView::new(auth.api().clone(), canteen_scope(auth));
    view.load().await;
    if let Some(error) = &view.error {
        writeln!(out, "[warn] {error}")?;
    }
    match cmd {
        SubcategoryTypeCommand::List => print_json(out, &view.rows),
        SubcategoryTypeCommand::Create {
            category_id,
            name,
            image,
            unavailable,
        } => {
            view.open_create();
            view.form = SubcategoryTypeForm {
                id: None,
                canteencategoriesid: category_id,
                item_name: name,
                image,
                is_available: !unavailable,
            };
            let ok = view.submit().await;
            report(out, &mut view.notices, &view.form_errors, ok, "create sub type")
        }
        SubcategoryTypeCommand::Update {
            id,
            category_id,
            name,
            image,
            available,
        } => {
            if !view.open_edit(&id) {
                bail!("no sub type with id {id}");
            }
            set_if(&mut view.form.canteencategoriesid, category_id);
            set_if(&mut view.form.item_name, name);
            set_if(&mut view.form.image, image);
            set_if(&mut view.form.is_available, available);
            let ok = view.submit().await;
            report(out, &mut view.notices, &view.form_errors, ok, "update sub type")
        }
    }
}

fn fill_menu_form(view: &mut MenuItemsView, fields: MenuItemFields) {
    set_if(&mut view.form.name, fields.name);
    set_if(&mut view.form.description, fields.description);
    set_if(&mut view.form.price, fields.price);
    set_if(&mut view.form.image, fields.image);
    set_if(&mut view.form.category_id, fields.category_id);
    set_if(&mut view.form.subcategory_id, fields.subcategory_id);
    set_if(&mut view.form.canteen_id, fields.canteen_id);
    set_if(&mut view.form.status, fields.status);
}

async fn menu_items<W: Write>(cmd: MenuItemCommand, auth: &AuthContext, out: &mut W) -> anyhow::Result<()> {
    let mut view = MenuItemsView::new(auth.api().clone());
    match cmd {
        MenuItemCommand::List { start, limit, search } => {
            view.params = ListParams::new(start, limit).with_search(search);
            view.load().await;
            report(out, &mut view.notices, &BTreeMap::new(), true, "list menu items")?;
            print_json(out, &view.rows)
        }
        MenuItemCommand::Create(fields) => {
            view.open_add();
            fill_menu_form(&mut view, fields);
            let ok = view.submit_create().await;
            report(out, &mut view.notices, &view.form_errors, ok, "create menu item")
        }
        MenuItemCommand::Update { id, fields } => {
            view.load().await;
            if !view.open_edit(&id) {
                bail!("no menu item with id {id}");
            }
            fill_menu_form(&mut view, fields);
            let ok = view.submit_update().await;
            report(out, &mut view.notices, &view.form_errors, ok, "update menu item")
        }
        MenuItemCommand::Delete { id } => {
            view.load().await;
            if !view.request_delete(&id) {
                bail!("no menu item with id {id}");
            }
            let ok = view.confirm_delete().await;
            report(out, &mut view.notices, &BTreeMap::new(), ok, "delete menu item")
        }
    }
}

async fn orders<W: Write>(cmd: OrderCommand, auth: &AuthContext, out: &mut W) -> anyhow::Result<()> {
    let mut view = OrdersView::new(auth.api().clone(), order_scope(auth));
    view.load().await;
    load_error(&view.error)?;
    match cmd {
        OrderCommand::List { status, search } => {
            view.status_filter = status;
            view.search = search;
            print_json(out, &view.filtered())
        }
        OrderCommand::Show { id } => {
            if !view.open_details(&id).await {
                bail!("no order with id {id}");
            }
            match (&view.details, &view.details_error) {
                (Some(details), _) => print_json(out, details),
                (None, Some(error)) => bail!("{error}"),
                (None, None) => bail!("order {id} has no details"),
            }
        }
        OrderCommand::SetStatus { id, status } => {
            if !view.open_update(&id) {
                bail!("no order with id {id}");
            }
            view.selected_status = status;
            if !view.submit_status().await {
                bail!(view.update_error.clone().unwrap_or_else(|| "status update failed".to_string()));
            }
            report(out, &mut view.notices, &BTreeMap::new(), true, "set order status")
        }
    }
}
