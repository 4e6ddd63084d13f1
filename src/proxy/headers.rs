//! Outbound header construction.
//!
//! The forwarding client owns a fixed base header set. Per call, the
//! inbound request's headers may override values for names that are
//! already in the base set; any other inbound header is dropped. Names
//! only present in the overrides never reach the upstream.

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, HeaderValue};

/// Base set installed on every forwarding client unless one is supplied.
#[must_use]
pub fn default_base_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// Merge `overrides` onto a copy of `base`.
///
/// The result carries exactly the names of `base`. A name present in both
/// takes every value from `overrides`.
#[must_use]
pub fn merge_headers(base: &HeaderMap, overrides: Option<&HeaderMap>) -> HeaderMap {
    let mut merged = base.clone();
    let Some(overrides) = overrides else {
        return merged;
    };

    for name in base.keys() {
        if !overrides.contains_key(name) {
            continue;
        }
        merged.remove(name);
        for value in overrides.get_all(name) {
            merged.append(name.clone(), value.clone());
        }
    }

    merged
}
