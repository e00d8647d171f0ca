//! Construction-time error types.

use thiserror::Error;

/// Errors raised while validating client options.
///
/// These occur before any request is made; runtime failures use
/// [`ApiError`](crate::ApiError) instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The endpoint is missing or not an absolute http(s) URL.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Both an access token and client credentials were supplied.
    #[error("accessToken and clientId/clientSecret are mutually exclusive")]
    ConflictingCredentials,

    /// A client id was supplied without a secret, or vice versa.
    #[error("clientId and clientSecret must be provided together")]
    IncompleteCredentials,

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_problem() {
        assert!(ConfigError::InvalidEndpoint("ftp://x".to_string())
            .to_string()
            .contains("ftp://x"));
        assert!(ConfigError::ConflictingCredentials
            .to_string()
            .contains("mutually exclusive"));
    }
}
