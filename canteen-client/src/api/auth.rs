use shared::client::{LoginRequest, LoginResponse};

use super::ApiClient;
use crate::endpoints;
use crate::http::ApiRequest;
use crate::{ClientError, ClientResult};

impl ApiClient {
    /// `POST /adminUser/login`
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let value = self.send(ApiRequest::post(endpoints::LOGIN).json(&request)?).await?;
        let response: LoginResponse = serde_json::from_value(value)
            .map_err(|e| ClientError::InvalidResponse(format!("login response: {e}")))?;
        if response.user.token.is_empty() {
            return Err(ClientError::InvalidResponse("login response carries no token".into()));
        }
        Ok(response)
    }
}
