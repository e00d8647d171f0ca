//! Response types for API communication.
//!
//! This module provides the [`ApiResponse`] type returned by the
//! transport on every successful exchange: the decoded JSON body plus
//! the response metadata the resource layer cares about (the `ETag`
//! concurrency token and the record locator, when present).

use std::collections::HashMap;

/// A decoded response from the API.
///
/// Constructed by the transport after a request completes. Header names
/// are lowercased; a header may carry multiple values.
#[derive(Clone, Debug)]
pub struct ApiResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name.
    pub headers: HashMap<String, Vec<String>>,
    /// The decoded JSON body. An empty body decodes to `null`.
    pub body: serde_json::Value,
}

impl ApiResponse {
    /// Creates a new `ApiResponse`.
    #[must_use]
    pub const fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: serde_json::Value,
    ) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` if the status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, by lowercase name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the concurrency token for this response, if present.
    ///
    /// Read from the `ETag` header first, falling back to the `_etag`
    /// field Eve embeds in entity bodies. Surrounding quotes are
    /// stripped.
    #[must_use]
    pub fn etag(&self) -> Option<String> {
        self.header("etag")
            .map(|value| value.trim_matches('"').to_string())
            .or_else(|| {
                self.body
                    .get("_etag")
                    .and_then(serde_json::Value::as_str)
                    .map(ToString::to_string)
            })
    }

    /// Returns the record locator from the response body, if present.
    ///
    /// Entities carry their own address in a `url` field.
    #[must_use]
    pub fn locator(&self) -> Option<&str> {
        self.body.get("url").and_then(serde_json::Value::as_str)
    }

    /// Returns the parsed `Retry-After` header in seconds, if present.
    #[must_use]
    pub fn retry_after(&self) -> Option<u64> {
        self.header("retry-after").and_then(|v| v.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, Vec<String>> {
        let mut map = HashMap::new();
        for (name, value) in pairs {
            map.entry((*name).to_string())
                .or_insert_with(Vec::new)
                .push((*value).to_string());
        }
        map
    }

    #[test]
    fn test_is_ok_for_2xx() {
        assert!(ApiResponse::new(200, HashMap::new(), json!({})).is_ok());
        assert!(ApiResponse::new(201, HashMap::new(), json!({})).is_ok());
        assert!(!ApiResponse::new(404, HashMap::new(), json!({})).is_ok());
        assert!(!ApiResponse::new(500, HashMap::new(), json!({})).is_ok());
    }

    #[test]
    fn test_etag_from_header_strips_quotes() {
        let response = ApiResponse::new(200, headers(&[("etag", "\"abc123\"")]), json!({}));
        assert_eq!(response.etag(), Some("abc123".to_string()));
    }

    #[test]
    fn test_etag_falls_back_to_body_field() {
        let response = ApiResponse::new(200, HashMap::new(), json!({"_etag": "def456"}));
        assert_eq!(response.etag(), Some("def456".to_string()));
    }

    #[test]
    fn test_etag_absent() {
        let response = ApiResponse::new(200, HashMap::new(), json!({}));
        assert_eq!(response.etag(), None);
    }

    #[test]
    fn test_locator_from_body() {
        let response = ApiResponse::new(
            201,
            HashMap::new(),
            json!({"url": "http://api.test/events/1", "name": "meetup"}),
        );
        assert_eq!(response.locator(), Some("http://api.test/events/1"));
    }

    #[test]
    fn test_retry_after_parses_seconds() {
        let response = ApiResponse::new(429, headers(&[("retry-after", "30")]), json!({}));
        assert_eq!(response.retry_after(), Some(30));
    }
}
