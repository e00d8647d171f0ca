//! Resources: bound collection endpoints.

use std::sync::Arc;

use serde_json::Value;

use crate::clients::{ApiError, RequestOptions, Transport};
use crate::config::ResourceDescriptor;
use crate::rest::{BoundPath, ExtraRoute, Item, ResultList};

/// A collection endpoint bound to a transport and a path.
///
/// Resources are cheap to clone and hold no per-record state; every
/// operation either returns [`Item`]s or a [`ResultList`] page.
#[derive(Clone, Debug)]
pub struct Resource {
    transport: Arc<Transport>,
    bound: BoundPath,
    descriptor: Arc<ResourceDescriptor>,
}

impl Resource {
    pub(crate) const fn bound(
        transport: Arc<Transport>,
        bound: BoundPath,
        descriptor: Arc<ResourceDescriptor>,
    ) -> Self {
        Self {
            transport,
            bound,
            descriptor,
        }
    }

    /// The collection path this resource is bound to.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.bound.path
    }

    /// Returns `true` when the collection refuses client-side writes.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.descriptor.read_only
    }

    /// Builds a draft [`Item`] from the given fields. No network call
    /// happens until the draft is saved.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Usage`] when the collection is read-only or
    /// the fields are not a JSON object.
    pub fn create(&self, fields: Value) -> Result<Item, ApiError> {
        if self.descriptor.read_only {
            return Err(ApiError::usage(format!(
                "resource '{}' is read-only",
                self.bound.path
            )));
        }
        Item::draft(
            Arc::clone(&self.transport),
            self.bound.clone(),
            Arc::clone(&self.descriptor),
            fields,
        )
    }

    /// Fetches one page of the collection.
    ///
    /// The optional query pairs pass through to the server unchanged;
    /// filtering, sorting, and page sizing are all server concerns.
    ///
    /// # Errors
    ///
    /// Propagates transport errors; a payload without an `_items`
    /// sequence is an [`ApiError::Decode`].
    pub async fn list(&self, query: Option<Vec<(String, String)>>) -> Result<ResultList, ApiError> {
        let mut options = self.bound.options();
        if let Some(query) = query {
            options = options.query(query);
        }
        let response = self.transport.get(&self.bound.path, options).await?;
        self.decode_page(&response.body)
    }

    /// Fetches one record by id, resolved under the collection path.
    ///
    /// # Errors
    ///
    /// A missing record surfaces as [`ApiError::NotFound`] from the
    /// single request; there is no fallback probing.
    pub async fn get_by_id(&self, id: &str) -> Result<Item, ApiError> {
        let bound = self.bound.join(id);
        let response = self.transport.get(&bound.path, bound.options()).await?;
        Item::from_payload(
            Arc::clone(&self.transport),
            self.bound.clone(),
            Arc::clone(&self.descriptor),
            &response.body,
        )
    }

    /// Returns the named collection-scoped extra route.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Usage`] for a name the configuration does
    /// not declare.
    pub fn extra_route(&self, name: &str) -> Result<ExtraRoute, ApiError> {
        let route = self.descriptor.extra_routes.get(name).ok_or_else(|| {
            ApiError::usage(format!("no extra route named '{name}' is configured"))
        })?;
        Ok(ExtraRoute::bound(
            Arc::clone(&self.transport),
            self.bound.join(&route.path),
        ))
    }

    /// Follows an advertised continuation link verbatim.
    pub(crate) async fn fetch_page(&self, url: &str) -> Result<ResultList, ApiError> {
        let response = self
            .transport
            .get(url, RequestOptions::new().absolute())
            .await?;
        self.decode_page(&response.body)
    }

    /// Decodes a listing envelope into a page.
    fn decode_page(&self, body: &Value) -> Result<ResultList, ApiError> {
        let Some(entries) = body.get("_items").and_then(Value::as_array) else {
            return Err(ApiError::Decode(format!(
                "listing for '{}' carries no _items sequence",
                self.bound.path
            )));
        };

        let mut items = Vec::with_capacity(entries.len());
        for entry in entries {
            items.push(Item::from_payload(
                Arc::clone(&self.transport),
                self.bound.clone(),
                Arc::clone(&self.descriptor),
                entry,
            )?);
        }

        // Unrecognized _links keys are ignored; only the continuation
        // relations matter here.
        let link = |rel: &str| {
            body.get("_links")
                .and_then(|links| links.get(rel))
                .and_then(|link| link.get("href"))
                .and_then(Value::as_str)
                .map(ToString::to_string)
        };

        Ok(ResultList::new(
            self.clone(),
            items,
            link("next"),
            link("prev"),
        ))
    }
}
