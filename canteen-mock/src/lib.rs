//! In-memory canteen admin backend
//!
//! Speaks the same REST dialect as the production API over seeded data.
//! Used by integration tests (bound to `127.0.0.1:0`) and for local runs.

pub mod api;
pub mod seed;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub use state::{MockState, RecordedRequest};

/// A running mock server
#[derive(Debug)]
pub struct MockServer {
    pub addr: SocketAddr,
    pub state: Arc<MockState>,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Serve `state` on `addr` until the task is aborted
pub async fn serve(state: Arc<MockState>, addr: SocketAddr) -> std::io::Result<MockServer> {
    let listener = TcpListener::bind(addr).await?;
    let addr = listener.local_addr()?;
    let app = api::router(state.clone());

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "Mock server stopped");
        }
    });
    tracing::info!(%addr, "Mock backend listening");

    Ok(MockServer { addr, state, handle })
}

/// Seeded server on an ephemeral local port
pub async fn spawn() -> std::io::Result<MockServer> {
    serve(Arc::new(MockState::seeded()), SocketAddr::from(([127, 0, 0, 1], 0))).await
}
