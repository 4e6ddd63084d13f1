//! The forwarding client.
//!
//! [`ForwardingClient::forward`] replays one inbound request against an
//! upstream URL: the inbound body is fully buffered, headers are merged
//! onto the client's base set, and the upstream response body is fully
//! collected before returning. There are no retries and no timeout
//! beyond what the transport applies.

use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::{HeaderMap, Method, StatusCode};
use bytes::Bytes;
use http_body_util::{BodyExt, Full, Limited};
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use crate::error::ForwardError;

use super::headers::{default_base_headers, merge_headers};

/// A fully buffered upstream response.
#[derive(Debug, Clone)]
pub struct ForwardResult {
    pub status: StatusCode,
    /// `"<code> <reason>"`, e.g. `"404 Not Found"`.
    pub status_text: String,
    pub body: Bytes,
}

impl ForwardResult {
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            status_text: status_text(status),
            body: body.into(),
        }
    }
}

pub type HttpClient = Client<hyper_rustls::HttpsConnector<HttpConnector>, Full<Bytes>>;

/// Inbound bodies larger than this fail with [`ForwardError::BodyRead`].
pub const DEFAULT_BODY_LIMIT: usize = 1_048_576;

const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct ForwardingClient {
    http: HttpClient,
    base_headers: HeaderMap,
    body_limit: usize,
}

impl ForwardingClient {
    /// Client over a fresh connection pool reaching both `http` and
    /// `https` upstreams.
    #[must_use]
    pub fn connect() -> Self {
        Self {
            http: pooled_client(),
            base_headers: default_base_headers(),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    #[must_use]
    pub fn with_base_headers(mut self, base_headers: HeaderMap) -> Self {
        self.base_headers = base_headers;
        self
    }

    #[must_use]
    pub const fn with_body_limit(mut self, body_limit: usize) -> Self {
        self.body_limit = body_limit;
        self
    }

    #[must_use]
    pub const fn base_headers(&self) -> &HeaderMap {
        &self.base_headers
    }

    pub async fn forward(
        &self,
        method: Method,
        url: &str,
        inbound: Body,
        overrides: Option<&HeaderMap>,
    ) -> Result<ForwardResult, ForwardError> {
        let body = Limited::new(inbound, self.body_limit)
            .collect()
            .await
            .map_err(|source| ForwardError::BodyRead { source })?
            .to_bytes();

        let mut request = hyper::Request::builder()
            .method(method.clone())
            .uri(url)
            .body(Full::new(body))
            .map_err(|e| ForwardError::Request {
                method: method.clone(),
                url: url.to_string(),
                source: Box::new(e),
            })?;
        *request.headers_mut() = merge_headers(&self.base_headers, overrides);

        tracing::debug!(method = %method, url = %url, "forwarding request");
        let start = Instant::now();

        let response = self
            .http
            .request(request)
            .await
            .map_err(|e| ForwardError::Transport {
                method: method.clone(),
                url: url.to_string(),
                source: Box::new(e),
            })?;

        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| ForwardError::ResponseRead {
                source: Box::new(e),
            })?
            .to_bytes();

        #[allow(clippy::cast_possible_truncation)]
        let latency_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            method = %method,
            url = %url,
            status = status.as_u16(),
            latency_ms,
            "upstream responded"
        );

        Ok(ForwardResult::new(status, body))
    }
}

fn pooled_client() -> HttpClient {
    // rustls won't choose between linked crypto providers on its own.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let connector = HttpsConnectorBuilder::new()
        .with_webpki_roots()
        .https_or_http()
        .enable_http1()
        .build();
    Client::builder(TokioExecutor::new())
        .pool_idle_timeout(POOL_IDLE_TIMEOUT)
        .build(connector)
}

fn status_text(status: StatusCode) -> String {
    status.canonical_reason().map_or_else(
        || status.as_u16().to_string(),
        |reason| format!("{} {reason}", status.as_u16()),
    )
}
