use shared::client::{ListParams, RoleQuery};
use shared::models::{Company, CompanyCreate, CompanyUpdate, RoleSummary};
use shared::response::{ApiMessage, DATA_KEY};

use super::ApiClient;
use crate::ClientResult;
use crate::endpoints::{self, with_id};
use crate::http::ApiRequest;

impl ApiClient {
    pub async fn list_companies(&self, params: &ListParams) -> ClientResult<Vec<Company>> {
        self.list(
            ApiRequest::get(endpoints::COMPANIES).params(params),
            &[DATA_KEY, "companies"],
        )
        .await
    }

    pub async fn create_company(&self, company: &CompanyCreate) -> ClientResult<ApiMessage> {
        self.ack(ApiRequest::post(endpoints::COMPANY_CREATE).json(company)?)
            .await
    }

    pub async fn update_company(&self, id: &str, update: &CompanyUpdate) -> ClientResult<ApiMessage> {
        self.ack(ApiRequest::put(with_id(endpoints::COMPANY_UPDATE, id)).json(update)?)
            .await
    }

    /// `POST /role/getAllRoles` with `{ "params": {...} }`
    pub async fn list_roles(&self, params: &ListParams) -> ClientResult<Vec<RoleSummary>> {
        let body = RoleQuery { params: params.clone() };
        self.list(ApiRequest::post(endpoints::ROLES).json(&body)?, &[DATA_KEY, "roles"])
            .await
    }
}
