//! Error types for API operations.
//!
//! Every failed request surfaces as one member of the [`ApiError`]
//! taxonomy, derived from the HTTP outcome. Transport-level failures
//! (no response at all) become [`ApiError::Network`]; everything else
//! maps from the status code via [`ApiError::from_status`].
//!
//! # Error Handling
//!
//! ```rust,ignore
//! use eve_client::ApiError;
//!
//! match resource.get_by_id("123").await {
//!     Ok(item) => println!("found {:?}", item.locator()),
//!     Err(ApiError::NotFound { path }) => println!("no such record at {path}"),
//!     Err(ApiError::Authorization { .. }) => println!("not allowed"),
//!     Err(e) => println!("other error: {e}"),
//! }
//! ```

use std::collections::HashMap;

use thiserror::Error;

/// Error type for all API operations.
///
/// Variants map one-to-one to the HTTP outcome classes the server can
/// produce, plus [`ApiError::Usage`] for local precondition violations
/// that are raised without any network call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received (connection failure, DNS, TLS).
    ///
    /// Never retried automatically.
    #[error("could not reach server: {0}")]
    Network(#[from] reqwest::Error),

    /// The record does not exist (HTTP 404).
    #[error("object does not exist at {path}")]
    NotFound {
        /// The request path that produced the 404.
        path: String,
    },

    /// The request was not authorized (HTTP 401/403).
    #[error("not authorized (status {code})")]
    Authorization {
        /// The HTTP status code (401 or 403).
        code: u16,
    },

    /// The server rejected the payload (HTTP 422).
    #[error("validation failed: {errors:?}")]
    Validation {
        /// A map of field names to error messages from the response body.
        errors: HashMap<String, Vec<String>>,
    },

    /// The server is rate limiting requests (HTTP 429).
    #[error("rate limited")]
    RateLimited {
        /// Seconds to wait before retrying, from the `Retry-After` header.
        retry_after: Option<u64>,
    },

    /// A conditional update failed against a stale concurrency token
    /// (HTTP 412/428).
    #[error("stale concurrency token (status {code})")]
    ConcurrencyConflict {
        /// The HTTP status code (412 or 428).
        code: u16,
    },

    /// Any other 4xx response.
    #[error("unknown client error (status {code})")]
    UnknownClient {
        /// The HTTP status code.
        code: u16,
    },

    /// Any 5xx response.
    #[error("unknown server error (status {code})")]
    UnknownServer {
        /// The HTTP status code.
        code: u16,
    },

    /// A local precondition was violated; no request was sent.
    ///
    /// Examples: `refresh()` on a draft item, accessing a nested
    /// resource before the item has a locator, or an unknown resource
    /// name.
    #[error("usage error: {0}")]
    Usage(String),

    /// The response body could not be decoded as JSON, or hydration
    /// exceeded the maximum supported payload depth.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Maps a non-2xx HTTP status code to the matching taxonomy member.
    ///
    /// # Arguments
    ///
    /// * `code` - The HTTP status code
    /// * `path` - The request path, kept for 404 messages
    /// * `body` - The decoded response body, consulted for validation
    ///   errors
    /// * `retry_after` - The parsed `Retry-After` header, if present
    #[must_use]
    pub fn from_status(
        code: u16,
        path: &str,
        body: &serde_json::Value,
        retry_after: Option<u64>,
    ) -> Self {
        match code {
            404 => Self::NotFound {
                path: path.to_string(),
            },
            401 | 403 => Self::Authorization { code },
            422 => Self::Validation {
                errors: parse_validation_errors(body),
            },
            429 => Self::RateLimited { retry_after },
            412 | 428 => Self::ConcurrencyConflict { code },
            400..=499 => Self::UnknownClient { code },
            _ => Self::UnknownServer { code },
        }
    }

    /// Shorthand for a usage error with no network call behind it.
    #[must_use]
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }
}

/// Parses validation errors from a 422 response body.
///
/// Eve reports issues under an `_issues` object keyed by field name;
/// a bare `errors` object or array is accepted as a fallback.
fn parse_validation_errors(body: &serde_json::Value) -> HashMap<String, Vec<String>> {
    let mut result = HashMap::new();

    let issues = body.get("_issues").or_else(|| body.get("errors"));
    match issues {
        Some(serde_json::Value::Object(map)) => {
            for (field, messages) in map {
                let msgs: Vec<String> = match messages {
                    serde_json::Value::Array(arr) => arr
                        .iter()
                        .filter_map(|v| v.as_str().map(ToString::to_string))
                        .collect(),
                    serde_json::Value::String(s) => vec![s.clone()],
                    other => vec![other.to_string()],
                };
                result.insert(field.clone(), msgs);
            }
        }
        Some(serde_json::Value::Array(arr)) => {
            let msgs: Vec<String> = arr
                .iter()
                .filter_map(|v| v.as_str().map(ToString::to_string))
                .collect();
            if !msgs.is_empty() {
                result.insert("base".to_string(), msgs);
            }
        }
        Some(serde_json::Value::String(s)) => {
            result.insert("base".to_string(), vec![s.clone()]);
        }
        _ => {}
    }

    result
}

// Verify ApiError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiError>();
};
