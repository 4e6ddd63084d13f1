//! Maps upstream status codes onto the error envelope taxonomy.

/// Error category derived from an upstream status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamError {
    NotFound,
    BadExternalRequest,
    ServerError,
}

impl UpstreamError {
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::BadExternalRequest => "bad_external_request",
            Self::ServerError => "server_error",
        }
    }

    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotFound => "Resource not found",
            Self::BadExternalRequest => "Bad external request",
            Self::ServerError => SERVER_ERROR_MESSAGE,
        }
    }
}

pub const SERVER_ERROR_MESSAGE: &str = "Server error occured";

/// `None` means the response passes through as a success. Codes at or
/// above 600 fall outside every bucket and also pass through.
#[must_use]
pub const fn classify(status: u16) -> Option<UpstreamError> {
    match status {
        0..=399 => None,
        404 => Some(UpstreamError::NotFound),
        400..=499 => Some(UpstreamError::BadExternalRequest),
        500..=599 => Some(UpstreamError::ServerError),
        _ => None,
    }
}
