//! Terminates an inbound request with either the upstream payload or a
//! normalized JSON error envelope.
//!
//! Successful payloads are decoded into the route's shape and encoded
//! again, so the caller only ever sees fields that shape knows about.
//! Error envelopes are always sent with status 500; the `type` tag in
//! the body carries the category. The writers return `Err` with the
//! envelope already rendered, so callers can tell the outcomes apart
//! without looking at the status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::classify::{classify, UpstreamError, SERVER_ERROR_MESSAGE};
use super::client::ForwardResult;

/// Sent when a 2xx/3xx upstream body doesn't decode into the route's shape.
pub const DECODE_ERROR_MESSAGE: &str = "Unmarshaling JSON failed";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    pub errors: Vec<String>,
}

impl ErrorEnvelope {
    #[must_use]
    pub fn new(kind: &str, message: &str) -> Self {
        Self {
            kind: kind.to_string(),
            errors: vec![message.to_string()],
        }
    }
}

#[must_use]
pub fn write_error(kind: &str, message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorEnvelope::new(kind, message)),
    )
        .into_response()
}

/// The generic envelope every unclassified failure collapses into.
#[must_use]
pub fn write_server_error() -> Response {
    write_error(UpstreamError::ServerError.tag(), SERVER_ERROR_MESSAGE)
}

pub fn write_success<T>(result: &ForwardResult) -> Result<Response, Response>
where
    T: DeserializeOwned + Serialize,
{
    let payload = serde_json::from_slice::<T>(&result.body).map_err(|e| {
        tracing::error!(
            kind = "decode_error",
            status = %result.status_text,
            error = %e,
            "couldn't decode upstream body"
        );
        write_error(UpstreamError::ServerError.tag(), DECODE_ERROR_MESSAGE)
    })?;
    Ok((result.status, Json(payload)).into_response())
}

/// Classify the upstream status, then write either the envelope or the
/// re-encoded payload.
pub fn write_json_response<T>(result: &ForwardResult) -> Result<Response, Response>
where
    T: DeserializeOwned + Serialize,
{
    if let Some(err) = classify(result.status.as_u16()) {
        tracing::warn!(
            kind = err.tag(),
            status = %result.status_text,
            "upstream returned an error status"
        );
        return Err(write_error(err.tag(), err.message()));
    }

    write_success::<T>(result)
}
