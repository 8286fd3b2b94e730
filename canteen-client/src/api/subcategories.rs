use shared::models::{Subcategory, SubcategoryCreate};
use shared::response::{ApiMessage, DATA_KEY};

use super::ApiClient;
use crate::ClientResult;
use crate::endpoints::{self, with_id};
use crate::http::ApiRequest;

impl ApiClient {
    pub async fn list_subcategories(&self, canteen_id: &str) -> ClientResult<Vec<Subcategory>> {
        self.list(
            ApiRequest::get(with_id(endpoints::SUBCATEGORIES_BY_CANTEEN, canteen_id)),
            &[DATA_KEY, "subCategories"],
        )
        .await
    }

    pub async fn create_subcategory(&self, subcategory: &SubcategoryCreate) -> ClientResult<ApiMessage> {
        self.ack(ApiRequest::post(endpoints::SUBCATEGORY_CREATE).json(subcategory)?)
            .await
    }

    pub async fn delete_subcategory(&self, id: &str) -> ClientResult<ApiMessage> {
        self.ack(ApiRequest::delete(with_id(endpoints::SUBCATEGORY_DELETE, id)))
            .await
    }
}
