//! Authentication strategies for API requests.
//!
//! A single [`AuthStrategy`] is selected at client construction from
//! the supplied [`ClientOptions`](crate::ClientOptions) and shared by
//! every resource, item, and pagination continuation created by that
//! client. The strategy decorates each outgoing request immediately
//! before dispatch.
//!
//! # Variants
//!
//! - [`AuthStrategy::NoAuth`]: requests go out undecorated
//! - [`AuthStrategy::BearerToken`]: `Authorization: Bearer <token>`
//! - [`AuthStrategy::BasicCredentials`]: `Authorization: Basic <base64(id:secret)>`,
//!   precomputed once at construction
//! - [`AuthStrategy::CrossSiteSession`]: ambient cookies; the transport
//!   enables a cookie store and decoration itself is the identity

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

/// An authentication strategy applied to every outgoing request.
///
/// Construction happens once; the strategy is immutable and shared
/// read-only by all in-flight requests.
#[derive(Clone)]
pub enum AuthStrategy {
    /// No authentication; requests are sent as-is.
    NoAuth,
    /// Bearer token authentication.
    BearerToken(String),
    /// Basic credentials; the header value is precomputed at
    /// construction via [`AuthStrategy::basic`].
    BasicCredentials {
        /// The full `Basic <base64>` header value.
        header: String,
    },
    /// Ambient cookie/session authentication.
    ///
    /// Carries no token state. The transport built for this strategy
    /// keeps a cookie store so session cookies set by the server are
    /// replayed on subsequent requests.
    CrossSiteSession,
}

impl AuthStrategy {
    /// Creates a basic-credentials strategy from a client id and secret.
    ///
    /// The `Authorization` header value is encoded here, once, rather
    /// than on every request.
    #[must_use]
    pub fn basic(id: &str, secret: &str) -> Self {
        let encoded = BASE64.encode(format!("{id}:{secret}"));
        Self::BasicCredentials {
            header: format!("Basic {encoded}"),
        }
    }

    /// Decorates an outgoing request with this strategy's credentials.
    #[must_use]
    pub fn decorate(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            Self::NoAuth | Self::CrossSiteSession => request,
            Self::BearerToken(token) => request.header("Authorization", format!("Bearer {token}")),
            Self::BasicCredentials { header } => request.header("Authorization", header),
        }
    }

    /// Returns `true` if the transport should keep a cookie store.
    #[must_use]
    pub const fn uses_cookie_store(&self) -> bool {
        matches!(self, Self::CrossSiteSession)
    }
}

impl std::fmt::Debug for AuthStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoAuth => write!(f, "AuthStrategy::NoAuth"),
            Self::BearerToken(_) => write!(f, "AuthStrategy::BearerToken(*****)"),
            Self::BasicCredentials { .. } => write!(f, "AuthStrategy::BasicCredentials(*****)"),
            Self::CrossSiteSession => write!(f, "AuthStrategy::CrossSiteSession"),
        }
    }
}
