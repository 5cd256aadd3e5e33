use http::request::Parts;
use http::{Extensions, HeaderMap, Method, Uri};

use crate::query::Query;

/// Request data passed to every handler.
///
/// Extensions inserted by middleware (authentication, request ids) are kept so
/// that handlers can read them.
#[derive(Debug)]
pub struct RequestContext {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    extensions: Extensions,
}

impl RequestContext {
    #[must_use]
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            uri,
            headers: HeaderMap::new(),
            extensions: Extensions::new(),
        }
    }

    #[must_use]
    pub fn from_parts(parts: Parts) -> Self {
        Self {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            extensions: parts.extensions,
        }
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    #[must_use]
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    #[must_use]
    pub fn query(&self) -> Query {
        Query::parse(self.uri.query())
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[must_use]
    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }
}

/// Splits the part of `path` below `prefix` into its non-empty segments.
///
/// Returns `None` when `path` isn't under `prefix`.
#[must_use]
pub fn path_segments<'a>(path: &'a str, prefix: &str) -> Option<Vec<&'a str>> {
    let prefix = prefix.trim_end_matches('/');
    let rest = path.strip_prefix(prefix)?;
    if !rest.is_empty() && !rest.starts_with('/') {
        return None;
    }
    Some(
        rest.split('/')
            .filter(|segment| !segment.is_empty())
            .collect(),
    )
}
