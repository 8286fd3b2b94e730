use shared::models::{Category, CategoryCreate, CategoryUpdate};
use shared::response::{ApiMessage, DATA_KEY};

use super::ApiClient;
use crate::ClientResult;
use crate::endpoints::{self, with_id};
use crate::http::ApiRequest;

impl ApiClient {
    pub async fn list_categories(&self, canteen_id: &str) -> ClientResult<Vec<Category>> {
        self.list(
            ApiRequest::get(with_id(endpoints::CATEGORIES_BY_CANTEEN, canteen_id)),
            &[DATA_KEY, "categories", "subCategories"],
        )
        .await
    }

    pub async fn create_category(&self, category: &CategoryCreate) -> ClientResult<ApiMessage> {
        self.ack(ApiRequest::post(endpoints::CATEGORY_CREATE).json(category)?)
            .await
    }

    pub async fn update_category(&self, id: &str, update: &CategoryUpdate) -> ClientResult<ApiMessage> {
        self.ack(ApiRequest::put(with_id(endpoints::CATEGORY_UPDATE, id)).json(update)?)
            .await
    }

    pub async fn delete_category(&self, id: &str) -> ClientResult<ApiMessage> {
        self.ack(ApiRequest::delete(with_id(endpoints::CATEGORY_DELETE, id)))
            .await
    }
}
