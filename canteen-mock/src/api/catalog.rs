//! Categories, subcategory types and subcategories of a canteen

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::json;
use shared::models::{
    Category, CategoryCreate, CategoryUpdate, Subcategory, SubcategoryCreate, SubcategoryType, SubcategoryTypeWrite,
};
use shared::util::today;

use super::{Reply, created, message, not_found, ok, to_values};
use crate::state::{MockState, Scoped};

fn scoped<T: Clone>(items: &[Scoped<T>], canteen_id: &str) -> Vec<T> {
    items
        .iter()
        .filter(|s| s.canteen_id == canteen_id)
        .map(|s| s.record.clone())
        .collect()
}

// ========== Categories ==========

pub async fn list_categories(State(state): State<Arc<MockState>>, Path(canteen_id): Path<String>) -> Reply {
    let store = state.store.read().await;
    let categories: Vec<Category> = store
        .categories
        .iter()
        .filter(|c| c.canteenid.as_deref() == Some(canteen_id.as_str()))
        .cloned()
        .collect();
    ok(json!({ "data": to_values(&categories) }))
}

pub async fn create_category(State(state): State<Arc<MockState>>, Json(req): Json<CategoryCreate>) -> Reply {
    let mut store = state.store.write().await;
    let category = Category {
        id: Some(store.next_id()),
        canteenid: Some(req.canteenid),
        item_name: Some(req.item_name),
        description: Some(req.description),
        is_available: Some(req.is_available),
        createddate: Some(today()),
        ..Default::default()
    };
    store.categories.push(category.clone());
    created(json!({ "message": "Category created", "data": category }))
}

pub async fn update_category(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    Json(req): Json<CategoryUpdate>,
) -> Reply {
    let mut store = state.store.write().await;
    let Some(category) = store
        .categories
        .iter_mut()
        .find(|c| c.id.as_deref() == Some(id.as_str()))
    else {
        return not_found("Category");
    };
    if req.item_name.is_some() {
        category.item_name = req.item_name;
    }
    if req.description.is_some() {
        category.description = req.description;
    }
    if req.is_available.is_some() {
        category.is_available = req.is_available;
    }
    category.updateddate = Some(today());
    ok(json!({ "message": "Category updated", "success": true }))
}

pub async fn delete_category(State(state): State<Arc<MockState>>, Path(id): Path<String>) -> Reply {
    let mut store = state.store.write().await;
    let before = store.categories.len();
    store.categories.retain(|c| c.id.as_deref() != Some(id.as_str()));
    if store.categories.len() == before {
        return not_found("Category");
    }
    ok(json!({ "message": "Category deleted", "success": true }))
}

// ========== Subcategory types ==========

/// `{ "subTypes": [...] }`
pub async fn list_subtypes(State(state): State<Arc<MockState>>, Path(canteen_id): Path<String>) -> Reply {
    let store = state.store.read().await;
    let subtypes = scoped(&store.subcategory_types, &canteen_id);
    ok(json!({ "subTypes": to_values(&subtypes) }))
}

pub async fn create_subtype(State(state): State<Arc<MockState>>, Json(req): Json<SubcategoryTypeWrite>) -> Reply {
    let mut store = state.store.write().await;
    let Some(parent) = store
        .categories
        .iter()
        .find(|c| c.id.as_deref() == Some(req.canteencategoriesid.as_str()))
        .cloned()
    else {
        return message(StatusCode::BAD_REQUEST, "Unknown category");
    };
    let subtype = SubcategoryType {
        id: Some(store.next_id()),
        canteencategoriesid: parent.id.clone(),
        item_name: Some(req.item_name),
        sub_cat_type_img: Some(req.sub_cat_type_img).filter(|s| !s.is_empty()),
        is_available: Some(req.is_available),
        createddate: Some(today()),
        category: Some(parent.clone()),
        ..Default::default()
    };
    let canteen_id = parent.canteenid.unwrap_or_default();
    store.subcategory_types.push(Scoped::new(canteen_id, subtype.clone()));
    created(json!({ "message": "Sub type created", "data": subtype }))
}

pub async fn update_subtype(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    Json(req): Json<SubcategoryTypeWrite>,
) -> Reply {
    let mut store = state.store.write().await;
    let parent = store
        .categories
        .iter()
        .find(|c| c.id.as_deref() == Some(req.canteencategoriesid.as_str()))
        .cloned();
    let Some(entry) = store
        .subcategory_types
        .iter_mut()
        .find(|s| s.record.id.as_deref() == Some(id.as_str()))
    else {
        return not_found("Sub type");
    };
    let subtype = &mut entry.record;
    subtype.item_name = Some(req.item_name);
    subtype.sub_cat_type_img = Some(req.sub_cat_type_img).filter(|s| !s.is_empty());
    subtype.is_available = Some(req.is_available);
    if let Some(parent) = parent {
        subtype.canteencategoriesid = parent.id.clone();
        subtype.category = Some(parent);
    }
    subtype.updateddate = Some(today());
    ok(json!({ "message": "Sub type updated", "success": true }))
}

// ========== Subcategories ==========

/// `{ "subCategories": [...] }`
pub async fn list_subcategories(State(state): State<Arc<MockState>>, Path(canteen_id): Path<String>) -> Reply {
    let store = state.store.read().await;
    let subcategories = scoped(&store.subcategories, &canteen_id);
    ok(json!({ "subCategories": to_values(&subcategories) }))
}

pub async fn create_subcategory(State(state): State<Arc<MockState>>, Json(req): Json<SubcategoryCreate>) -> Reply {
    let mut store = state.store.write().await;
    let type_id = req.subcategory_type_id.to_string();
    let Some(parent) = store
        .subcategory_types
        .iter()
        .find(|s| s.record.id.as_deref() == Some(type_id.as_str()))
        .cloned()
    else {
        return message(StatusCode::BAD_REQUEST, "Unknown sub type");
    };
    let subcategory = Subcategory {
        id: Some(store.next_id()),
        subcategory_type_id: Some(type_id),
        item_name: Some(req.item_name),
        image: Some(req.image).filter(|s| !s.is_empty()),
        description: Some(req.description).filter(|s| !s.is_empty()),
        counter_number: req.counter_number,
        is_available: Some(req.is_available),
        price: req.price,
        createddate: Some(today()),
        subcategory_type: Some(parent.record),
        ..Default::default()
    };
    store
        .subcategories
        .push(Scoped::new(parent.canteen_id, subcategory.clone()));
    created(json!({ "message": "Sub category created", "data": subcategory }))
}

pub async fn delete_subcategory(State(state): State<Arc<MockState>>, Path(id): Path<String>) -> Reply {
    let mut store = state.store.write().await;
    let before = store.subcategories.len();
    store
        .subcategories
        .retain(|s| s.record.id.as_deref() != Some(id.as_str()));
    if store.subcategories.len() == before {
        return not_found("Sub category");
    }
    ok(json!({ "message": "Sub category deleted", "success": true }))
}
