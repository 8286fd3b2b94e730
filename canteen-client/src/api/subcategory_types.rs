use shared::models::{SubcategoryType, SubcategoryTypeWrite};
use shared::response::{ApiMessage, DATA_KEY};

use super::ApiClient;
use crate::ClientResult;
use crate::endpoints::{self, with_id};
use crate::http::ApiRequest;

impl ApiClient {
    pub async fn list_subcategory_types(&self, canteen_id: &str) -> ClientResult<Vec<SubcategoryType>> {
        self.list(
            ApiRequest::get(with_id(endpoints::SUBTYPES_BY_CANTEEN, canteen_id)),
            &["subTypes", DATA_KEY],
        )
        .await
    }

    pub async fn create_subcategory_type(&self, subtype: &SubcategoryTypeWrite) -> ClientResult<ApiMessage> {
        self.ack(ApiRequest::post(endpoints::SUBTYPE_CREATE).json(subtype)?)
            .await
    }

    pub async fn update_subcategory_type(&self, id: &str, subtype: &SubcategoryTypeWrite) -> ClientResult<ApiMessage> {
        self.ack(ApiRequest::put(with_id(endpoints::SUBTYPE_UPDATE, id)).json(subtype)?)
            .await
    }
}
