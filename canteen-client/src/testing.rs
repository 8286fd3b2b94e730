//! Scripted transport for tests
//!
//! Records every request and answers from a queue of canned responses keyed
//! by method and path. Unscripted calls answer `404`.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::http::{ApiRequest, HttpTransport, Method};
use crate::{ClientError, ClientResult};

type Script = HashMap<(Method, String), VecDeque<Result<Value, (u16, String)>>>;

/// In-memory [`HttpTransport`] that records requests
#[derive(Debug, Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<ApiRequest>>,
    script: Mutex<Script>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, method: Method, path: &str, response: Result<Value, (u16, String)>) {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entry((method, path.to_string()))
            .or_default()
            .push_back(response);
    }

    /// Queue a success; the last queued answer repeats
    pub fn respond(&self, method: Method, path: &str, body: Value) -> &Self {
        self.push(method, path, Ok(body));
        self
    }

    /// Queue a failure status
    pub fn fail(&self, method: Method, path: &str, status: u16) -> &Self {
        self.push(method, path, Err((status, format!("scripted failure {status}"))));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Requests that hit `method path`
    pub fn calls(&self, method: Method, path: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<Value> {
        let key = (request.method, request.path.clone());
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);

        let mut script = self.script.lock().unwrap_or_else(|e| e.into_inner());
        let answer = match script.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        match answer {
            Some(Ok(body)) => Ok(body),
            Some(Err((status, body))) => Err(ClientError::from_status(status, body)),
            None => Err(ClientError::from_status(404, format!("no script for {} {}", key.0, key.1))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_scripted_answers_and_recording() {
        let transport = RecordingTransport::new();
        transport
            .respond(Method::Get, "/a", json!({"n": 1}))
            .respond(Method::Get, "/a", json!({"n": 2}))
            .fail(Method::Post, "/b", 500);

        assert_eq!(transport.send(ApiRequest::get("/a")).await.unwrap()["n"], 1);
        assert_eq!(transport.send(ApiRequest::get("/a")).await.unwrap()["n"], 2);
        assert_eq!(transport.send(ApiRequest::get("/a")).await.unwrap()["n"], 2);
        assert!(matches!(
            transport.send(ApiRequest::post("/b")).await,
            Err(ClientError::Status { status: 500, .. })
        ));
        assert!(matches!(transport.send(ApiRequest::get("/c")).await, Err(ClientError::NotFound(_))));
        assert_eq!(transport.calls(Method::Get, "/a").len(), 3);
        assert_eq!(transport.requests().len(), 5);
    }
}
