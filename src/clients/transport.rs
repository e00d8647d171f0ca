//! HTTP transport for API communication.
//!
//! This module provides the [`Transport`] type: the single request path
//! every resource, item, extra route, and pagination continuation goes
//! through. It handles verb dispatch, path joining, absolute-vs-relative
//! URL resolution, the fixed JSON header set, auth decoration, and the
//! mapping of HTTP outcomes to the [`ApiError`] taxonomy.
//!
//! # Thread Safety
//!
//! `Transport` is `Send + Sync` and immutable after construction; it is
//! shared via `Arc` by every object the client builds, and safe for any
//! number of concurrently in-flight requests.

use std::collections::HashMap;

use crate::auth::AuthStrategy;
use crate::clients::errors::ApiError;
use crate::clients::response::ApiResponse;
use crate::error::ConfigError;

/// HTTP methods used by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    /// HTTP GET, for retrieving records and collections.
    Get,
    /// HTTP POST, for creating records and invoking action routes.
    Post,
    /// HTTP PUT, for replacing records and invoking action routes.
    Put,
    /// HTTP PATCH, for partial updates against a record's locator.
    Patch,
    /// HTTP DELETE, reserved for future record removal.
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Patch => write!(f, "PATCH"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// Optional parts of a single request.
///
/// # Example
///
/// ```rust
/// use eve_client::clients::RequestOptions;
/// use serde_json::json;
///
/// let options = RequestOptions::new()
///     .query(vec![("page".to_string(), "2".to_string())])
///     .body(json!({"name": "meetup"}));
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
    /// Query parameters appended to the URL.
    pub query: Option<Vec<(String, String)>>,
    /// JSON request body.
    pub body: Option<serde_json::Value>,
    /// When `true`, the path is a full URL used verbatim instead of
    /// being joined onto the configured endpoint. Pagination links are
    /// already absolute and require this.
    pub absolute: bool,
}

impl RequestOptions {
    /// Creates empty options: no query, no body, endpoint-relative.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the query parameters.
    #[must_use]
    pub fn query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = Some(query);
        self
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Marks the path as a verbatim absolute URL.
    #[must_use]
    pub const fn absolute(mut self) -> Self {
        self.absolute = true;
        self
    }
}

/// Joins path segments with exactly one `/` separator.
///
/// Strips exactly one leading and one trailing slash from each segment
/// before concatenation, so callers never need to care whether their
/// inputs carry slashes.
///
/// # Example
///
/// ```rust
/// use eve_client::clients::path_join;
///
/// assert_eq!(path_join(&["http://api.test/", "/events/"]), "http://api.test/events");
/// assert_eq!(path_join(&["/", "people"]), "/people");
/// ```
#[must_use]
pub fn path_join(segments: &[&str]) -> String {
    segments
        .iter()
        .map(|segment| {
            let segment = segment.strip_prefix('/').unwrap_or(segment);
            segment.strip_suffix('/').unwrap_or(segment)
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// The shared HTTP transport.
///
/// Wraps a `reqwest::Client` bound to a base endpoint and one
/// [`AuthStrategy`]. Every logical operation maps 1:1 to one HTTP
/// exchange; there is no retrying, caching, or batching at this layer.
#[derive(Debug)]
pub struct Transport {
    /// The internal reqwest HTTP client.
    http: reqwest::Client,
    /// The configured base endpoint, e.g. `https://api.example.org`.
    endpoint: String,
    /// The auth strategy applied to every request.
    auth: AuthStrategy,
}

// Verify Transport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Transport>();
};

impl Transport {
    /// Creates a transport bound to an endpoint and auth strategy.
    ///
    /// A cookie store is enabled only for the cross-site-session
    /// strategy, which authenticates through ambient cookies.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the underlying reqwest
    /// client cannot be built.
    pub fn new(endpoint: impl Into<String>, auth: AuthStrategy) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if auth.uses_cookie_store() {
            builder = builder.cookie_store(true);
        }
        let http = builder
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            auth,
        })
    }

    /// Returns the configured base endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Issues one HTTP request and decodes the response.
    ///
    /// The fixed `Content-Type`/`Accept: application/json` headers are
    /// set first, then the auth strategy decorates the request, then it
    /// is sent. Relative paths resolve against the configured endpoint;
    /// absolute paths are used verbatim.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Network`] if no response was received
    /// - a status-derived taxonomy member for any non-2xx response
    /// - [`ApiError::Decode`] if a 2xx body is not valid JSON
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse, ApiError> {
        let url = if options.absolute {
            path.to_string()
        } else {
            path_join(&[self.endpoint.as_str(), path])
        };

        tracing::debug!(%method, %url, "dispatching request");

        let mut builder = match method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
            Method::Put => self.http.put(&url),
            Method::Patch => self.http.patch(&url),
            Method::Delete => self.http.delete(&url),
        };

        builder = builder
            .header("Content-Type", "application/json")
            .header("Accept", "application/json");
        builder = self.auth.decorate(builder);

        if let Some(query) = &options.query {
            builder = builder.query(query);
        }
        if let Some(body) = &options.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;

        let code = response.status().as_u16();
        let headers = parse_headers(response.headers());
        // A body-read failure (connection severed mid-body) is a
        // network error like any other; an empty body must never stand
        // in for one.
        let text = response.text().await?;

        let body = if text.is_empty() {
            serde_json::Value::Null
        } else {
            match serde_json::from_str(&text) {
                Ok(value) => value,
                // Error pages are not always JSON; the status mapping
                // below still applies. A malformed 2xx body is fatal.
                Err(e) if code >= 300 => {
                    tracing::debug!(%url, error = %e, "non-JSON error body");
                    serde_json::Value::Null
                }
                Err(e) => return Err(ApiError::Decode(e.to_string())),
            }
        };

        let response = ApiResponse::new(code, headers, body);
        if response.is_ok() {
            Ok(response)
        } else {
            tracing::warn!(%method, %url, code, "request failed");
            let retry_after = response.retry_after();
            Err(ApiError::from_status(code, &url, &response.body, retry_after))
        }
    }

    /// Issues a GET request.
    ///
    /// # Errors
    ///
    /// See [`Transport::request`].
    pub async fn get(&self, path: &str, options: RequestOptions) -> Result<ApiResponse, ApiError> {
        self.request(Method::Get, path, options).await
    }

    /// Issues a POST request.
    ///
    /// # Errors
    ///
    /// See [`Transport::request`].
    pub async fn post(&self, path: &str, options: RequestOptions) -> Result<ApiResponse, ApiError> {
        self.request(Method::Post, path, options).await
    }

    /// Issues a PUT request.
    ///
    /// # Errors
    ///
    /// See [`Transport::request`].
    pub async fn put(&self, path: &str, options: RequestOptions) -> Result<ApiResponse, ApiError> {
        self.request(Method::Put, path, options).await
    }

    /// Issues a PATCH request.
    ///
    /// # Errors
    ///
    /// See [`Transport::request`].
    pub async fn patch(&self, path: &str, options: RequestOptions) -> Result<ApiResponse, ApiError> {
        self.request(Method::Patch, path, options).await
    }
}

/// Parses response headers into a map keyed by lowercase name.
fn parse_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, Vec<String>> {
    let mut result: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in headers {
        let key = name.as_str().to_lowercase();
        let value = value.to_str().unwrap_or_default().to_string();
        result.entry(key).or_default().push(value);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_join_single_separator() {
        assert_eq!(path_join(&["a", "b"]), "a/b");
        assert_eq!(path_join(&["a/", "b"]), "a/b");
        assert_eq!(path_join(&["a", "/b"]), "a/b");
        assert_eq!(path_join(&["a/", "/b"]), "a/b");
    }

    #[test]
    fn test_path_join_strips_exactly_one_slash() {
        // Doubled slashes beyond the first are preserved
        assert_eq!(path_join(&["a//", "b"]), "a//b");
    }

    #[test]
    fn test_path_join_keeps_url_scheme() {
        assert_eq!(
            path_join(&["http://api.test/", "events"]),
            "http://api.test/events"
        );
    }

    #[test]
    fn test_path_join_root_base() {
        assert_eq!(path_join(&["/", "people"]), "/people");
    }

    #[test]
    fn test_path_join_three_segments() {
        assert_eq!(
            path_join(&["/clients/", "/authenticate_client/"]),
            "/clients/authenticate_client"
        );
    }

    #[test]
    fn test_method_display_uppercase() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Patch.to_string(), "PATCH");
    }

    #[test]
    fn test_request_options_builder() {
        let options = RequestOptions::new()
            .query(vec![("page".to_string(), "1".to_string())])
            .absolute();
        assert!(options.absolute);
        assert_eq!(options.query.as_ref().map(Vec::len), Some(1));
        assert!(options.body.is_none());
    }

    #[test]
    fn test_transport_construction() {
        let transport =
            Transport::new("http://api.test", crate::auth::AuthStrategy::NoAuth).unwrap();
        assert_eq!(transport.endpoint(), "http://api.test");
    }

    #[test]
    fn test_transport_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Transport>();
    }
}
