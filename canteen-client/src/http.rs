//! HTTP transport
//!
//! Every backend call goes through [`HttpTransport::send`]. The network
//! implementation attaches the session's bearer token, sends JSON, and hands
//! back the response body as one `serde_json::Value` (empty body → `Null`).
//! Non-success statuses become [`ClientError`]s. There is no retry.

use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use shared::client::ListParams;

use crate::{ClientConfig, ClientError, ClientResult, Session};

/// HTTP method subset used by the admin API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One API call
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the base URL, leading slash included
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attach a JSON body
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ClientResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Attach `start` / `limit` / `search`
    pub fn params(mut self, params: &ListParams) -> Self {
        self.query.extend(params.to_query());
        self
    }
}

/// Transport seam between the API client and the network
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> ClientResult<Value>;
}

/// Network transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    session: Session,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig, session: Session) -> ClientResult<Self> {
        let client = Client::builder().timeout(config.timeout_duration()).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn handle_response(response: reqwest::Response) -> ClientResult<Value> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::from_status(status.as_u16(), text));
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        // Some endpoints answer with plain text; keep it rather than fail.
        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }
}

#[async_trait]
impl HttpTransport for NetworkHttpClient {
    async fn send(&self, request: ApiRequest) -> ClientResult<Value> {
        tracing::debug!(method = %request.method, path = %request.path, "API request");

        let mut req = self
            .client
            .request(request.method.into(), self.url(&request.path));
        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        if let Some(token) = self.session.token() {
            req = req.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            req = req.json(body);
        }

        let response = req.send().await.inspect_err(|e| {
            tracing::warn!(method = %request.method, path = %request.path, error = %e, "API transport failure");
        })?;
        Self::handle_response(response).await
    }
}
