use shared::client::ListParams;
use shared::models::{Canteen, CanteenCreate, CanteenCreated, CanteenUpdate};
use shared::response::{ApiMessage, DATA_KEY};

use super::ApiClient;
use crate::ClientResult;
use crate::endpoints::{self, with_id};
use crate::http::ApiRequest;

const CANTEEN_KEYS: &[&str] = &[DATA_KEY, "canteens"];

impl ApiClient {
    /// `GET /canteen/getAllCanteens?start&limit&search`
    pub async fn list_canteens(&self, params: &ListParams) -> ClientResult<Vec<Canteen>> {
        self.list(ApiRequest::get(endpoints::CANTEENS).params(params), CANTEEN_KEYS)
            .await
    }

    /// `GET /canteens`
    pub async fn list_canteens_alt(&self) -> ClientResult<Vec<Canteen>> {
        self.list(ApiRequest::get(endpoints::CANTEENS_ALT), CANTEEN_KEYS)
            .await
    }

    /// `GET /canteens?start&limit&search`
    pub async fn list_canteens_query(&self, params: &ListParams) -> ClientResult<Vec<Canteen>> {
        self.list(ApiRequest::get(endpoints::CANTEENS_ALT).params(params), CANTEEN_KEYS)
            .await
    }

    pub async fn create_canteen(&self, canteen: &CanteenCreate) -> ClientResult<CanteenCreated> {
        let value = self
            .send(ApiRequest::post(endpoints::CANTEEN_CREATE).json(canteen)?)
            .await?;
        Ok(serde_json::from_value(value).unwrap_or_default())
    }

    pub async fn update_canteen(&self, id: &str, update: &CanteenUpdate) -> ClientResult<ApiMessage> {
        self.ack(ApiRequest::put(with_id(endpoints::CANTEEN_UPDATE, id)).json(update)?)
            .await
    }

    pub async fn delete_canteen(&self, id: &str) -> ClientResult<ApiMessage> {
        self.ack(ApiRequest::delete(with_id(endpoints::CANTEEN_DELETE, id)))
            .await
    }
}
