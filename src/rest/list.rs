//! One page of a collection listing, with hypermedia continuations.

use crate::clients::ApiError;
use crate::rest::{Item, Resource};

/// A single decoded page of items.
///
/// Continuation links come from the envelope's `_links` member and are
/// followed verbatim; no page arithmetic happens client-side. A page
/// remains usable for continuation after its items have been consumed.
#[derive(Clone, Debug)]
pub struct ResultList {
    resource: Resource,
    items: Vec<Item>,
    next: Option<String>,
    prev: Option<String>,
}

impl PartialEq for ResultList {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items && self.next == other.next && self.prev == other.prev
    }
}

impl ResultList {
    pub(crate) const fn new(
        resource: Resource,
        items: Vec<Item>,
        next: Option<String>,
        prev: Option<String>,
    ) -> Self {
        Self {
            resource,
            items,
            next,
            prev,
        }
    }

    /// The items on this page, in server order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns an iterator over the page's items.
    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` when the page carries no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` when the server advertised a following page.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Returns `true` when the server advertised a preceding page.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.prev.is_some()
    }

    /// Fetches the following page by its advertised link.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Usage`] without a network call when no next
    /// link was advertised; otherwise propagates transport errors.
    pub async fn get_next(&self) -> Result<Self, ApiError> {
        match &self.next {
            Some(url) => self.resource.fetch_page(url).await,
            None => Err(ApiError::usage(
                "no next page was advertised; check has_next() first",
            )),
        }
    }

    /// Fetches the preceding page by its advertised link.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Usage`] without a network call when no
    /// previous link was advertised; otherwise propagates transport
    /// errors.
    pub async fn get_previous(&self) -> Result<Self, ApiError> {
        match &self.prev {
            Some(url) => self.resource.fetch_page(url).await,
            None => Err(ApiError::usage(
                "no previous page was advertised; check has_previous() first",
            )),
        }
    }
}

impl IntoIterator for ResultList {
    type Item = Item;
    type IntoIter = std::vec::IntoIter<Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultList {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
