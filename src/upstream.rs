//! Upstream resource addressing.
//!
//! [`Upstream`] holds the validated base URL of the proxied resource and
//! builds per-request target URLs from an optional path id and the raw
//! inbound query string.

use url::Url;

use crate::error::RestfulError;

pub const DEFAULT_UPSTREAM: &str = "https://jsonplaceholder.typicode.com/posts";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upstream {
    base: Url,
}

impl Upstream {
    pub fn parse(base: &str) -> Result<Self, RestfulError> {
        let invalid = |reason: String| RestfulError::InvalidUpstream {
            url: base.to_string(),
            reason,
        };

        let parsed = Url::parse(base.trim_end_matches('/')).map_err(|e| invalid(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(invalid("base must not carry a query or fragment".into()));
        }

        Ok(Self { base: parsed })
    }

    #[must_use]
    pub fn base(&self) -> &str {
        self.base.as_str()
    }

    /// Build `base[/id][?query]`.
    ///
    /// The id always becomes exactly one path segment: `/`, `?`, `#`, `%`
    /// and spaces are percent-encoded. The query string is appended
    /// verbatim, never re-encoded.
    pub fn target(&self, id: Option<&str>, query: Option<&str>) -> Result<String, RestfulError> {
        let mut url = self.base.clone();

        if let Some(id) = id {
            if matches!(id, "" | "." | "..") {
                return Err(RestfulError::InvalidId(id.to_string()));
            }
            url.path_segments_mut()
                .map_err(|()| RestfulError::InvalidId(id.to_string()))?
                .pop_if_empty()
                .push(id);
        }

        let mut target = String::from(url);
        if let Some(qs) = query.filter(|qs| !qs.is_empty()) {
            target.push('?');
            target.push_str(qs);
        }
        Ok(target)
    }
}
