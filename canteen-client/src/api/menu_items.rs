use shared::client::ListParams;
use shared::models::{MenuItem, MenuItemWrite};
use shared::response::{ApiMessage, DATA_KEY};

use super::ApiClient;
use crate::ClientResult;
use crate::endpoints::{self, with_id};
use crate::http::ApiRequest;

impl ApiClient {
    pub async fn list_menu_items(&self, params: &ListParams) -> ClientResult<Vec<MenuItem>> {
        self.list(
            ApiRequest::get(endpoints::MENU_ITEMS).params(params),
            &[DATA_KEY, "menuItems"],
        )
        .await
    }

    pub async fn create_menu_item(&self, item: &MenuItemWrite) -> ClientResult<ApiMessage> {
        self.ack(ApiRequest::post(endpoints::MENU_ITEM_CREATE).json(item)?)
            .await
    }

    pub async fn update_menu_item(&self, id: &str, item: &MenuItemWrite) -> ClientResult<ApiMessage> {
        self.ack(ApiRequest::put(with_id(endpoints::MENU_ITEM_UPDATE, id)).json(item)?)
            .await
    }

    pub async fn delete_menu_item(&self, id: &str) -> ClientResult<ApiMessage> {
        self.ack(ApiRequest::delete(with_id(endpoints::MENU_ITEM_DELETE, id)))
            .await
    }
}
