//! Unified error types for restful.
//!
//! [`RestfulError`] covers startup failures and malformed targets. [`ForwardError`]
//! covers the ways a single forwarded call can fail before a response
//! from the upstream is fully in hand. Both use `thiserror` for
//! `Display` and `Error` derives.

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RestfulError {
    #[error("Invalid upstream URL '{url}': {reason}")]
    InvalidUpstream { url: String, reason: String },

    #[error("Invalid address: {0}")]
    AddressParse(#[from] std::net::AddrParseError),

    #[error("Invalid post id '{0}'")]
    InvalidId(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Failure of one forwarded call. None of these ever reach the caller
/// verbatim; they are logged and collapsed into a generic `server_error`.
#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    #[error("error copying request body: {source}")]
    BodyRead {
        #[source]
        source: BoxError,
    },

    #[error("error building {method} {url}: {source}")]
    Request {
        method: hyper::Method,
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("error doing {method} {url}: {source}")]
    Transport {
        method: hyper::Method,
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("error reading response bytes: {source}")]
    ResponseRead {
        #[source]
        source: BoxError,
    },
}

impl ForwardError {
    /// Taxonomy tag used in log output.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::BodyRead { .. } => "body_read_error",
            Self::Request { .. } | Self::Transport { .. } => "transport_error",
            Self::ResponseRead { .. } => "response_read_error",
        }
    }
}
