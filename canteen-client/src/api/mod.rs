//! Admin API client
//!
//! One method per backend endpoint, grouped by entity. Every call goes
//! through the injected [`HttpTransport`]; list responses are normalized here
//! so callers get typed records.

mod auth;
mod canteens;
mod categories;
mod companies;
mod menu_items;
mod orders;
mod subcategories;
mod subcategory_types;
mod users;

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::response::{ApiMessage, decode_list, extract_record};

use crate::http::{ApiRequest, HttpTransport, NetworkHttpClient};
use crate::{ClientConfig, ClientResult, Session};

/// Typed client over an [`HttpTransport`]
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient").finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Client over the network, authenticated from `session`
    pub fn network(config: &ClientConfig, session: Session) -> ClientResult<Self> {
        Ok(Self::new(Arc::new(NetworkHttpClient::new(config, session)?)))
    }

    /// Raw call; the body comes back untouched
    pub async fn send(&self, request: ApiRequest) -> ClientResult<Value> {
        self.transport.send(request).await
    }

    async fn list<T: DeserializeOwned>(&self, request: ApiRequest, keys: &[&str]) -> ClientResult<Vec<T>> {
        let value = self.send(request).await?;
        Ok(decode_list(value, keys))
    }

    async fn record<T: DeserializeOwned>(&self, request: ApiRequest, keys: &[&str]) -> ClientResult<Option<T>> {
        let value = self.send(request).await?;
        Ok(extract_record(value, keys).and_then(|v| serde_json::from_value(v).ok()))
    }

    async fn ack(&self, request: ApiRequest) -> ClientResult<ApiMessage> {
        let value = self.send(request).await?;
        Ok(ApiMessage::from_value(&value))
    }
}
