use shared::client::ListParams;
use shared::models::{User, UserCreate, UserProfileUpdate};
use shared::response::{ApiMessage, DATA_KEY};

use super::ApiClient;
use crate::ClientResult;
use crate::endpoints::{self, with_id};
use crate::http::ApiRequest;

const USER_KEYS: &[&str] = &[DATA_KEY, "users"];

impl ApiClient {
    pub async fn list_users(&self, params: &ListParams) -> ClientResult<Vec<User>> {
        self.list(ApiRequest::get(endpoints::USERS).params(params), USER_KEYS)
            .await
    }

    pub async fn list_users_by_company(&self, company_id: &str) -> ClientResult<Vec<User>> {
        self.list(
            ApiRequest::get(with_id(endpoints::USERS_BY_COMPANY, company_id)),
            USER_KEYS,
        )
        .await
    }

    /// Returns the created record when the backend echoes one
    pub async fn create_user(&self, user: &UserCreate) -> ClientResult<Option<User>> {
        self.record(ApiRequest::post(endpoints::USER_CREATE).json(user)?, &[DATA_KEY, "user"])
            .await
    }

    pub async fn update_user_profile(&self, user_id: &str, update: &UserProfileUpdate) -> ClientResult<ApiMessage> {
        self.ack(ApiRequest::put(with_id(endpoints::USER_UPDATE_PROFILE, user_id)).json(update)?)
            .await
    }

    pub async fn delete_user(&self, user_id: &str) -> ClientResult<ApiMessage> {
        self.ack(ApiRequest::delete(with_id(endpoints::USER_DELETE, user_id)))
            .await
    }
}
