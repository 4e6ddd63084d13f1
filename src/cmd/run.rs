//! `restful` — start the proxy server.
//!
//! Validates the upstream URL, builds the shared state and router, and
//! serves until Ctrl+C / SIGTERM. Bind failures are returned to `main`,
//! which exits the process.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::cli::RunArgs;
use crate::error::RestfulError;
use crate::logging::{self, LogFormat};
use crate::proxy::client::ForwardingClient;
use crate::server::{self, AppState};
use crate::upstream::Upstream;

pub async fn execute(args: RunArgs) -> Result<(), RestfulError> {
    logging::init(&args.log_level, LogFormat::from_flags(args.pretty, args.json));

    let upstream = Upstream::parse(&args.upstream)?;
    let client = ForwardingClient::connect().with_body_limit(args.max_body);
    let state = Arc::new(AppState::new(client, upstream));
    let upstream_base = state.upstream.base().to_string();

    let router = server::build_router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        tracing::error!(addr = %addr, error = %e, "failed to bind");
        e
    })?;

    tracing::info!(
        addr = %addr,
        upstream = %upstream_base,
        "starting http server"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    tracing::info!("restful stopped");
    Ok(())
}
