//! Client configuration.
//!
//! This module provides [`ClientOptions`] and its builder: the endpoint,
//! credentials, and resource-tree configuration a
//! [`Client`](crate::Client) is constructed from. All validation is
//! fail-fast at build time; a built `ClientOptions` is immutable.
//!
//! # Example
//!
//! ```rust
//! use eve_client::config::{ClientOptions, ResourceDescriptor};
//!
//! let options = ClientOptions::builder("https://api.example.org")
//!     .access_token("my-token")
//!     .resource("events", ResourceDescriptor::new("events"))
//!     .build()
//!     .unwrap();
//! ```

mod descriptor;

pub use descriptor::{ResourceDescriptor, RouteDescriptor};

use std::collections::BTreeMap;

use crate::auth::AuthStrategy;
use crate::error::ConfigError;

/// Validated client construction options.
///
/// Credential keys are mutually exclusive: an access token selects
/// bearer auth, a client id/secret pair selects basic auth, the
/// cross-site-session flag selects ambient cookie auth, and none of
/// them selects no auth.
#[derive(Clone, Debug)]
pub struct ClientOptions {
    endpoint: String,
    auth: AuthStrategy,
    configuration: BTreeMap<String, ResourceDescriptor>,
}

// Verify ClientOptions is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientOptions>();
};

impl ClientOptions {
    /// Creates a builder for the given base endpoint.
    #[must_use]
    pub fn builder(endpoint: impl Into<String>) -> ClientOptionsBuilder {
        ClientOptionsBuilder::new(endpoint)
    }

    /// Returns the base endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the selected auth strategy.
    #[must_use]
    pub const fn auth(&self) -> &AuthStrategy {
        &self.auth
    }

    /// Returns the resource-tree configuration.
    #[must_use]
    pub const fn configuration(&self) -> &BTreeMap<String, ResourceDescriptor> {
        &self.configuration
    }
}

/// Builder for [`ClientOptions`].
///
/// # Defaults
///
/// - auth: none
/// - configuration: empty (resources may also be supplied as one map
///   via [`configuration`](Self::configuration))
#[derive(Debug, Default)]
pub struct ClientOptionsBuilder {
    endpoint: String,
    access_token: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    cross_site_session: bool,
    configuration: BTreeMap<String, ResourceDescriptor>,
}

impl ClientOptionsBuilder {
    fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Sets a bearer access token.
    #[must_use]
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Sets the client id for basic-credentials auth.
    #[must_use]
    pub fn client_id(mut self, id: impl Into<String>) -> Self {
        self.client_id = Some(id.into());
        self
    }

    /// Sets the client secret for basic-credentials auth.
    #[must_use]
    pub fn client_secret(mut self, secret: impl Into<String>) -> Self {
        self.client_secret = Some(secret.into());
        self
    }

    /// Enables ambient cookie/session auth.
    #[must_use]
    pub const fn cross_site_session(mut self, enabled: bool) -> Self {
        self.cross_site_session = enabled;
        self
    }

    /// Adds one named resource descriptor to the configuration.
    #[must_use]
    pub fn resource(mut self, name: impl Into<String>, descriptor: ResourceDescriptor) -> Self {
        self.configuration.insert(name.into(), descriptor);
        self
    }

    /// Replaces the whole resource-tree configuration.
    #[must_use]
    pub fn configuration(mut self, configuration: BTreeMap<String, ResourceDescriptor>) -> Self {
        self.configuration = configuration;
        self
    }

    /// Builds the options, validating the endpoint and credential keys.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidEndpoint`] unless the endpoint is an
    ///   absolute http(s) URL
    /// - [`ConfigError::ConflictingCredentials`] if both an access token
    ///   and client credentials are set
    /// - [`ConfigError::IncompleteCredentials`] if only one of client
    ///   id/secret is set
    pub fn build(self) -> Result<ClientOptions, ConfigError> {
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(ConfigError::InvalidEndpoint(self.endpoint));
        }

        let has_client_pair = self.client_id.is_some() || self.client_secret.is_some();
        if self.access_token.is_some() && has_client_pair {
            return Err(ConfigError::ConflictingCredentials);
        }

        let auth = if let Some(token) = self.access_token {
            AuthStrategy::BearerToken(token)
        } else if has_client_pair {
            match (self.client_id, self.client_secret) {
                (Some(id), Some(secret)) => AuthStrategy::basic(&id, &secret),
                _ => return Err(ConfigError::IncompleteCredentials),
            }
        } else if self.cross_site_session {
            AuthStrategy::CrossSiteSession
        } else {
            AuthStrategy::NoAuth
        };

        Ok(ClientOptions {
            endpoint: self.endpoint,
            auth,
            configuration: self.configuration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_credentials_selects_no_auth() {
        let options = ClientOptions::builder("https://api.test").build().unwrap();
        assert!(matches!(options.auth(), AuthStrategy::NoAuth));
    }

    #[test]
    fn test_access_token_selects_bearer() {
        let options = ClientOptions::builder("https://api.test")
            .access_token("tok")
            .build()
            .unwrap();
        assert!(matches!(options.auth(), AuthStrategy::BearerToken(_)));
    }

    #[test]
    fn test_client_pair_selects_basic() {
        let options = ClientOptions::builder("https://api.test")
            .client_id("id")
            .client_secret("secret")
            .build()
            .unwrap();
        assert!(matches!(
            options.auth(),
            AuthStrategy::BasicCredentials { .. }
        ));
    }

    #[test]
    fn test_session_flag_selects_cross_site_session() {
        let options = ClientOptions::builder("https://api.test")
            .cross_site_session(true)
            .build()
            .unwrap();
        assert!(matches!(options.auth(), AuthStrategy::CrossSiteSession));
    }

    #[test]
    fn test_token_and_client_pair_conflict() {
        let result = ClientOptions::builder("https://api.test")
            .access_token("tok")
            .client_id("id")
            .client_secret("secret")
            .build();
        assert_eq!(result.unwrap_err(), ConfigError::ConflictingCredentials);
    }

    #[test]
    fn test_lone_client_id_is_incomplete() {
        let result = ClientOptions::builder("https://api.test")
            .client_id("id")
            .build();
        assert_eq!(result.unwrap_err(), ConfigError::IncompleteCredentials);
    }

    #[test]
    fn test_rejects_non_http_endpoint() {
        let result = ClientOptions::builder("ftp://api.test").build();
        assert!(matches!(result, Err(ConfigError::InvalidEndpoint(_))));
    }

    #[test]
    fn test_resources_accumulate() {
        let options = ClientOptions::builder("https://api.test")
            .resource("events", ResourceDescriptor::new("events"))
            .resource("people", ResourceDescriptor::new("people"))
            .build()
            .unwrap();
        assert_eq!(options.configuration().len(), 2);
    }
}
