//! Shared application state, the router, and shutdown handling.

use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use std::time::Instant;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::health::health_handler;
use crate::proxy;
use crate::proxy::client::ForwardingClient;
use crate::upstream::Upstream;

/// Outcome counters reported by `/health`.
#[derive(Debug, Default)]
pub struct Stats {
    pub forwarded: AtomicU64,
    pub failed: AtomicU64,
}

/// Built once at startup; only the counters change afterwards.
pub struct AppState {
    pub client: ForwardingClient,
    pub upstream: Upstream,
    pub start_time: Instant,
    pub stats: Stats,
}

impl AppState {
    #[must_use]
    pub fn new(client: ForwardingClient, upstream: Upstream) -> Self {
        Self {
            client,
            upstream,
            start_time: Instant::now(),
            stats: Stats::default(),
        }
    }
}

/// `/health` plus the posts routes, traced per request. Inbound bodies
/// are bounded by the forwarding client, not by a router layer, so an
/// oversized body still ends in the JSON error envelope.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(proxy::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Resolves on the first of Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let signal = tokio::select! {
        name = interrupt() => name,
        name = terminate() => name,
    };
    tracing::info!(signal, "shutting down");
}

async fn interrupt() -> &'static str {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Ctrl+C handler unavailable");
        std::future::pending::<()>().await;
    }
    "SIGINT"
}

#[cfg(unix)]
async fn terminate() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(e) => {
            tracing::warn!(error = %e, "SIGTERM handler unavailable");
            std::future::pending::<()>().await;
        }
    }
    "SIGTERM"
}

#[cfg(not(unix))]
async fn terminate() -> &'static str {
    std::future::pending().await
}
