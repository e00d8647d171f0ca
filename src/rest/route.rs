//! Extra routes: RPC-style endpoints outside the entity lifecycle.

use std::sync::Arc;

use serde_json::Value;

use crate::clients::{ApiError, Transport};
use crate::rest::BoundPath;

/// A named auxiliary endpoint attached to a collection or to an item.
///
/// Extra routes exchange raw JSON; their payloads are not entity
/// payloads and never hydrate into [`Item`](crate::rest::Item)s.
#[derive(Clone, Debug)]
pub struct ExtraRoute {
    transport: Arc<Transport>,
    bound: BoundPath,
}

impl ExtraRoute {
    pub(crate) const fn bound(transport: Arc<Transport>, bound: BoundPath) -> Self {
        Self { transport, bound }
    }

    /// The path this route sends to.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.bound.path
    }

    /// Sends a `PUT` with the given JSON body and returns the response
    /// body unmodified.
    ///
    /// # Errors
    ///
    /// Propagates the transport's [`ApiError`] for network failures and
    /// non-2xx responses.
    pub async fn put(&self, body: Value) -> Result<Value, ApiError> {
        let response = self
            .transport
            .put(&self.bound.path, self.bound.options().body(body))
            .await?;
        Ok(response.body)
    }

    /// Sends a `POST` with the given JSON body and returns the response
    /// body unmodified.
    ///
    /// # Errors
    ///
    /// Propagates the transport's [`ApiError`] for network failures and
    /// non-2xx responses.
    pub async fn post(&self, body: Value) -> Result<Value, ApiError> {
        let response = self
            .transport
            .post(&self.bound.path, self.bound.options().body(body))
            .await?;
        Ok(response.body)
    }
}
