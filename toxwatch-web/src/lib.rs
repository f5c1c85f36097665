//! The presentation layer: one GET route rendering the current store
//! snapshot as HTML. Read-only; the poller is the only writer.

use axum::{extract::State, response::Html, routing::get, Router};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use toxwatch_common::{Result, ToxwatchError};
use toxwatch_store::ResultStore;
use tracing::info;

mod render;

pub use render::render_page;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ResultStore>,
}

pub fn router(state: AppState) -> Router {
    Router::new().route("/", get(index)).with_state(state)
}

async fn index(State(state): State<AppState>) -> Html<String> {
    let snapshot = state.store.snapshot().await;
    info!(posts = snapshot.len(), "web.index");
    Html(render_page(&snapshot))
}

/// Bind and serve until the cancellation token fires.
pub async fn serve(addr: &str, state: AppState, cancel: CancellationToken) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ToxwatchError::Server(format!("bind {addr}: {e}")))?;
    info!(addr, "web.listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .map_err(|e| ToxwatchError::Server(e.to_string()))?;
    Ok(())
}
