//! Resource object model.
//!
//! This module provides the runtime object graph generated from a
//! resource configuration:
//!
//! - **[`Resource`]**: a collection endpoint; creates draft [`Item`]s,
//!   lists pages, fetches single records by id
//! - **[`Item`]**: one hydrated record; a draft until saved, then
//!   addressable through its server-assigned locator
//! - **[`ResultList`]**: one page of items plus hypermedia continuations
//! - **[`ExtraRoute`]**: a bound non-CRUD action endpoint
//! - **[`build_resources`]**: the one-shot configuration walk run at
//!   client construction
//!
//! # Example
//!
//! ```rust,ignore
//! let events = client.resource("events")?;
//!
//! // List with pagination
//! let page = events.list(None).await?;
//! if page.has_next() {
//!     let next = page.get_next().await?;
//! }
//!
//! // Create and save a draft
//! let mut event = events.create(serde_json::json!({"name": "meetup"}))?;
//! event.save().await?;
//!
//! // Nested resources bind once the locator is known
//! let rsvps = event.resource("rsvps")?;
//! ```

mod builder;
mod item;
mod list;
mod resource;
mod route;

pub use builder::build_resources;
pub use item::{Field, Item, Locator};
pub use list::ResultList;
pub use resource::Resource;
pub use route::ExtraRoute;

use crate::clients::{path_join, RequestOptions};

/// A path bound to the shared transport: either relative to the
/// configured endpoint, or a verbatim absolute URL (item locators and
/// everything joined under them).
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct BoundPath {
    pub path: String,
    pub absolute: bool,
}

impl BoundPath {
    /// An endpoint-relative path.
    pub fn relative(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            absolute: false,
        }
    }

    /// A verbatim absolute URL.
    pub fn url(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            absolute: true,
        }
    }

    /// Joins a segment under this path, preserving absoluteness.
    pub fn join(&self, segment: &str) -> Self {
        Self {
            path: path_join(&[self.path.as_str(), segment]),
            absolute: self.absolute,
        }
    }

    /// Request options carrying this path's absoluteness.
    pub fn options(&self) -> RequestOptions {
        if self.absolute {
            RequestOptions::new().absolute()
        } else {
            RequestOptions::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_preserves_absoluteness() {
        let relative = BoundPath::relative("/events").join("rsvps");
        assert_eq!(relative.path, "/events/rsvps");
        assert!(!relative.absolute);

        let absolute = BoundPath::url("http://api.test/events/1").join("rsvps");
        assert_eq!(absolute.path, "http://api.test/events/1/rsvps");
        assert!(absolute.absolute);
    }

    #[test]
    fn test_options_carry_absoluteness() {
        assert!(BoundPath::url("http://api.test/x").options().absolute);
        assert!(!BoundPath::relative("/x").options().absolute);
    }
}
