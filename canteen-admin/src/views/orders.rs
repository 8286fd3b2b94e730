//! Orders screen (canteen-scoped)
//!
//! Read-mostly: list, details and a status change. The canteen scope comes
//! from the identity claims of the session token.

use std::fmt;
use std::str::FromStr;

use canteen_client::ApiClient;
use serde::Serialize;
use shared::models::{Order, OrderStatus};

use super::{LocalIds, Modal, is_local_id};
use crate::notice::Notices;

pub const MSG_NO_USER: &str = "userId not found in token payload";
pub const MSG_UPDATE_FAILED: &str = "Failed to update order status. Please try again.";
pub const MSG_DETAILS_FAILED: &str = "Failed to load order details.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItemRow {
    pub name: String,
    pub quantity: i64,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRow {
    pub id: String,
    pub order_number: String,
    pub customer_name: String,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub placed_at: String,
    pub items: Vec<OrderItemRow>,
    pub payment_status: String,
    pub payment_method: String,
}

fn dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

impl OrderRow {
    pub fn from_api(order: &Order, local_ids: &mut LocalIds) -> Self {
        Self {
            id: order.id.clone().unwrap_or_else(|| local_ids.issue()),
            order_number: dash(order.order_number.as_deref()),
            customer_name: dash(order.customer.as_ref().and_then(|c| c.name.as_deref())),
            total_amount: order.total_amount.filter(|t| t.is_finite()).unwrap_or(0.0),
            status: order
                .status
                .as_deref()
                .map(OrderStatus::parse_lenient)
                .unwrap_or_default(),
            placed_at: order
                .createddate
                .clone()
                .unwrap_or_else(|| chrono::Utc::now().to_rfc3339()),
            items: order
                .items
                .iter()
                .map(|line| OrderItemRow {
                    name: format!("Subcategory {}", line.subcategory_id.as_deref().unwrap_or("-")),
                    quantity: line.quantity.unwrap_or(0),
                    price: line.price.unwrap_or(0.0),
                })
                .collect(),
            payment_status: dash(order.payment_status.as_deref()),
            payment_method: dash(order.payment_method.as_deref()),
        }
    }
}

/// Status filter of the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    pub fn accepts(&self, status: OrderStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("ALL"),
            Self::Only(status) => write!(f, "{status}"),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        if s == "all" {
            return Ok(Self::All);
        }
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_backend() == s)
            .map(Self::Only)
            .ok_or_else(|| format!("unknown status '{s}' (expected all|ordered|preparing|completed|cancelled)"))
    }
}

#[derive(Debug)]
pub struct OrdersView {
    api: ApiClient,
    canteen_id: Option<String>,
    pub rows: Vec<OrderRow>,
    pub search: String,
    pub status_filter: StatusFilter,
    pub error: Option<String>,
    pub selected: Option<OrderRow>,
    pub details_modal: Modal,
    pub details: Option<OrderRow>,
    pub details_loading: bool,
    pub details_error: Option<String>,
    pub update_modal: Modal,
    pub selected_status: OrderStatus,
    pub update_loading: bool,
    pub update_error: Option<String>,
    pub notices: Notices,
    local_ids: LocalIds,
}

impl OrdersView {
    pub fn new(api: ApiClient, canteen_id: Option<String>) -> Self {
        Self {
            api,
            canteen_id,
            rows: Vec::new(),
            search: String::new(),
            status_filter: StatusFilter::All,
            error: None,
            selected: None,
            details_modal: Modal::Closed,
            details: None,
            details_loading: false,
            details_error: None,
            update_modal: Modal::Closed,
            selected_status: OrderStatus::Ordered,
            update_loading: false,
            update_error: None,
            notices: Notices::default(),
            local_ids: LocalIds::default(),
        }
    }

    pub async fn load(&mut self) {
        let Some(canteen_id) = self.canteen_id.clone() else {
            tracing::warn!("{MSG_NO_USER}");
            self.error = Some(MSG_NO_USER.to_string());
            return;
        };

        match self.api.list_orders(&canteen_id).await {
            Ok(orders) => {
                self.error = None;
                self.rows = orders
                    .iter()
                    .map(|o| OrderRow::from_api(o, &mut self.local_ids))
                    .collect();
            }
            Err(e) => {
                tracing::error!(canteen_id = %canteen_id, error = %e, "Failed to fetch orders");
                self.error = Some("Failed to fetch orders".to_string());
            }
        }
    }

    /// Rows matching the search text (order number or customer) and the status filter
    pub fn filtered(&self) -> Vec<&OrderRow> {
        let term = self.search.to_lowercase();
        self.rows
            .iter()
            .filter(|o| {
                let text = format!("{} {}", o.order_number, o.customer_name).to_lowercase();
                text.contains(&term) && self.status_filter.accepts(o.status)
            })
            .collect()
    }

    /// Open the details modal and fetch the full order
    pub async fn open_details(&mut self, id: &str) -> bool {
        let Some(row) = self.rows.iter().find(|r| r.id == id).cloned() else {
            return false;
        };
        self.selected = Some(row.clone());
        self.details = None;
        self.details_error = None;
        self.details_modal.open();
        if is_local_id(id) {
            self.details = Some(row);
            return true;
        }

        self.details_loading = true;
        match self.api.get_order(id).await {
            Ok(Some(order)) => self.details = Some(OrderRow::from_api(&order, &mut self.local_ids)),
            Ok(None) => self.details_error = Some(MSG_DETAILS_FAILED.to_string()),
            Err(e) => {
                tracing::error!(id = %id, error = %e, "Failed to fetch order details");
                self.details_error = Some(MSG_DETAILS_FAILED.to_string());
            }
        }
        self.details_loading = false;
        true
    }

    pub fn close_details(&mut self) {
        self.details_modal.close();
        self.details = None;
        self.details_error = None;
    }

    pub fn open_update(&mut self, id: &str) -> bool {
        let Some(row) = self.rows.iter().find(|r| r.id == id).cloned() else {
            return false;
        };
        self.selected_status = row.status;
        self.selected = Some(row);
        self.update_error = None;
        self.update_modal.open();
        true
    }

    pub fn close_update(&mut self) {
        self.update_modal.close();
        self.update_error = None;
    }

    /// Send `selected_status` for the selected order
    pub async fn submit_status(&mut self) -> bool {
        let Some(selected) = self.selected.clone() else {
            return false;
        };
        if is_local_id(&selected.id) {
            tracing::warn!(id = %selected.id, "Refusing to update order without server id");
            self.update_error = Some(MSG_UPDATE_FAILED.to_string());
            return false;
        }
        self.update_loading = true;
        self.update_error = None;

        let result = self
            .api
            .update_order_status(&selected.id, self.selected_status)
            .await;
        self.update_loading = false;

        match result {
            Ok(_) => {
                if let Some(row) = self.rows.iter_mut().find(|r| r.id == selected.id) {
                    row.status = self.selected_status;
                }
                self.update_modal.close();
                self.notices
                    .success(format!("Order {} marked {}", selected.order_number, self.selected_status));
                true
            }
            Err(e) => {
                tracing::error!(id = %selected.id, error = %e, "Failed to update order status");
                self.update_error = Some(MSG_UPDATE_FAILED.to_string());
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

    const LIST: &str = "/cart/getAllOrderByCanteenId/1";

    async fn loaded(transport: &Arc<RecordingTransport>) -> OrdersView {
        transport.respond(
            Method::Get,
            LIST,
            json!({"orders": [
                {"id": 1, "orderNumber": "ORD-1", "totalAmount": "120.5", "status": "ordered", "User": {"name": "Asha"},
                 "items": [{"subcategoryId": 3, "quantity": 2, "price": 60.25}]},
                {"id": 2, "orderNumber": "ORD-2", "totalAmount": "n/a", "status": "PREPARING"}
            ]}),
        );
        let mut view = OrdersView::new(ApiClient::new(transport.clone()), Some("1".into()));
        view.load().await;
        view
    }

    #[tokio::test]
    async fn test_rows_are_mapped() {
        let transport = Arc::new(RecordingTransport::new());
        let view = loaded(&transport).await;
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0].customer_name, "Asha");
        assert_eq!(view.rows[0].items[0].name, "Subcategory 3");
        assert_eq!(view.rows[1].total_amount, 0.0);
        assert_eq!(view.rows[1].customer_name, "-");
        assert_eq!(view.rows[1].status, OrderStatus::Preparing);
        assert_eq!(view.rows[1].payment_method, "-");
    }

    #[tokio::test]
    async fn test_orders_with_null_items_are_kept() {
        let transport = Arc::new(RecordingTransport::new());
        transport.respond(
            Method::Get,
            LIST,
            json!({"orders": [
                {"id": 1, "orderNumber": "ORD-1", "items": null},
                {"id": 2, "orderNumber": "ORD-2"}
            ]}),
        );
        let mut view = OrdersView::new(ApiClient::new(transport.clone()), Some("1".into()));
        view.load().await;

        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0].order_number, "ORD-1");
        assert!(view.rows[0].items.is_empty());
        assert!(view.rows[1].items.is_empty());
    }

    #[tokio::test]
    async fn test_text_and_status_filters() {
        let transport = Arc::new(RecordingTransport::new());
        let mut view = loaded(&transport).await;
        view.search = "asha".into();
        assert_eq!(view.filtered().len(), 1);
        view.search.clear();
        view.status_filter = "preparing".parse().unwrap();
        assert_eq!(view.filtered()[0].id, "2");
        assert!("refunded".parse::<StatusFilter>().is_err());
    }

    #[tokio::test]
    async fn test_missing_scope_issues_no_request() {
        let transport = Arc::new(RecordingTransport::new());
        let mut view = OrdersView::new(ApiClient::new(transport.clone()), None);
        view.load().await;
        assert_eq!(view.error.as_deref(), Some(MSG_NO_USER));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_status_update_patches_one_row() {
        let transport = Arc::new(RecordingTransport::new());
        let mut view = loaded(&transport).await;
        transport.respond(Method::Put, "/cart/updateOrderStatus/1", json!({"message": "updated"}));

        assert!(view.open_update("1"));
        view.selected_status = OrderStatus::Completed;
        assert!(view.submit_status().await);
        assert!(!view.update_modal.is_open());
        assert_eq!(view.rows[0].status, OrderStatus::Completed);
        assert_eq!(view.rows[1].status, OrderStatus::Preparing);
        let call = &transport.calls(Method::Put, "/cart/updateOrderStatus/1")[0];
        assert_eq!(call.body, Some(json!({"status": "completed"})));
    }

    #[tokio::test]
    async fn test_status_update_failure_sets_error() {
        let transport = Arc::new(RecordingTransport::new());
        let mut view = loaded(&transport).await;
        transport.fail(Method::Put, "/cart/updateOrderStatus/2", 500);

        assert!(view.open_update("2"));
        view.selected_status = OrderStatus::Cancelled;
        assert!(!view.submit_status().await);
        assert!(view.update_modal.is_open());
        assert_eq!(view.update_error.as_deref(), Some(MSG_UPDATE_FAILED));
        assert_eq!(view.rows[1].status, OrderStatus::Preparing);
    }

    #[tokio::test]
    async fn test_details_modal() {
        let transport = Arc::new(RecordingTransport::new());
        let mut view = loaded(&transport).await;
        transport
            .respond(Method::Get, "/cart/getOrderByOrderId/1", json!({"order": {"id": 1, "orderNumber": "ORD-1", "paymentStatus": "paid"}}))
            .fail(Method::Get, "/cart/getOrderByOrderId/2", 404);

        assert!(view.open_details("1").await);
        assert!(view.details_modal.is_open());
        assert_eq!(view.details.as_ref().unwrap().payment_status, "paid");

        view.close_details();
        assert!(view.open_details("2").await);
        assert!(view.details.is_none());
        assert_eq!(view.details_error.as_deref(), Some(MSG_DETAILS_FAILED));
    }

    #[tokio::test]
    async fn test_orders_without_id_stay_local() {
        let transport = Arc::new(RecordingTransport::new());
        transport.respond(
            Method::Get,
            LIST,
            json!({"orders": [{"orderNumber": "ORD-A"}, {"orderNumber": "ORD-B", "status": "ordered"}]}),
        );
        let mut view = OrdersView::new(ApiClient::new(transport.clone()), Some("1".into()));
        view.load().await;
        assert_eq!(view.rows[0].id, "local-0");
        assert_eq!(view.rows[1].id, "local-1");

        transport.clear_requests();
        assert!(view.open_details("local-1").await);
        assert_eq!(view.details.as_ref().unwrap().order_number, "ORD-B");

        assert!(view.open_update("local-1"));
        view.selected_status = OrderStatus::Completed;
        assert!(!view.submit_status().await);
        assert_eq!(view.update_error.as_deref(), Some(MSG_UPDATE_FAILED));
        assert_eq!(view.rows[1].status, OrderStatus::Ordered);
        assert!(transport.requests().is_empty());
    }
}
