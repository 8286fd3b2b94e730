use shared::models::{Order, OrderStatus, OrderStatusUpdate};
use shared::response::{ApiMessage, DATA_KEY};

use super::ApiClient;
use crate::ClientResult;
use crate::endpoints::{self, with_id};
use crate::http::ApiRequest;

impl ApiClient {
    pub async fn list_orders(&self, canteen_id: &str) -> ClientResult<Vec<Order>> {
        self.list(
            ApiRequest::get(with_id(endpoints::ORDERS_BY_CANTEEN, canteen_id)),
            &["orders", DATA_KEY],
        )
        .await
    }

    /// `None` when the body holds no decodable order
    pub async fn get_order(&self, order_id: &str) -> ClientResult<Option<Order>> {
        self.record(
            ApiRequest::get(with_id(endpoints::ORDER_BY_ID, order_id)),
            &["order", DATA_KEY],
        )
        .await
    }

    pub async fn update_order_status(&self, order_id: &str, status: OrderStatus) -> ClientResult<ApiMessage> {
        let body = OrderStatusUpdate { status };
        self.ack(ApiRequest::put(with_id(endpoints::ORDER_UPDATE_STATUS, order_id)).json(&body)?)
            .await
    }
}
