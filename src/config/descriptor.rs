//! Declarative resource descriptors.
//!
//! A [`ResourceDescriptor`] describes one collection endpoint: its path
//! segment, whether it is writable, the sub-resources nested under each
//! of its items, and any named non-CRUD action routes. A map of
//! descriptors is the configuration the client walks once at
//! construction to produce its resource tree; descriptors are immutable
//! after that.
//!
//! Descriptors can be written fluently or deserialized from JSON:
//!
//! ```rust
//! use eve_client::config::{ResourceDescriptor, RouteDescriptor};
//!
//! let events = ResourceDescriptor::new("events")
//!     .item_resource(
//!         "rsvps",
//!         ResourceDescriptor::new("rsvps").extra_route("bulk", RouteDescriptor::new("bulk")),
//!     );
//!
//! let clients: ResourceDescriptor = serde_json::from_str(
//!     r#"{"path": "clients", "extra_routes": {"authenticate": {"path": "authenticate_client"}}}"#,
//! ).unwrap();
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

/// Configuration for one named non-CRUD action route.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct RouteDescriptor {
    /// The route's path segment, joined under its owning resource or
    /// item.
    pub path: String,
}

impl RouteDescriptor {
    /// Creates a route descriptor for the given path segment.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Configuration for one resource collection.
///
/// `item_resources` are sub-collections scoped under each item's
/// locator (e.g. `events/{id}/rsvps`); `extra_routes` are action
/// endpoints scoped under the collection; `item_extra_routes` are
/// action endpoints scoped under each item.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// The collection's path segment.
    pub path: String,
    /// When `true`, the resource exposes only reads; `create()` is a
    /// usage error.
    #[serde(default)]
    pub read_only: bool,
    /// Sub-resources nested under each item, keyed by name.
    #[serde(default)]
    pub item_resources: BTreeMap<String, ResourceDescriptor>,
    /// Collection-scoped action routes, keyed by name.
    #[serde(default)]
    pub extra_routes: BTreeMap<String, RouteDescriptor>,
    /// Item-scoped action routes, keyed by name.
    #[serde(default)]
    pub item_extra_routes: BTreeMap<String, RouteDescriptor>,
}

impl ResourceDescriptor {
    /// Creates a descriptor for the given path segment with no nested
    /// resources or routes.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            read_only: false,
            item_resources: BTreeMap::new(),
            extra_routes: BTreeMap::new(),
            item_extra_routes: BTreeMap::new(),
        }
    }

    /// Marks the resource read-only.
    #[must_use]
    pub const fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Adds a sub-resource nested under each item.
    #[must_use]
    pub fn item_resource(mut self, name: impl Into<String>, descriptor: Self) -> Self {
        self.item_resources.insert(name.into(), descriptor);
        self
    }

    /// Adds a collection-scoped action route.
    #[must_use]
    pub fn extra_route(mut self, name: impl Into<String>, route: RouteDescriptor) -> Self {
        self.extra_routes.insert(name.into(), route);
        self
    }

    /// Adds an item-scoped action route.
    #[must_use]
    pub fn item_extra_route(mut self, name: impl Into<String>, route: RouteDescriptor) -> Self {
        self.item_extra_routes.insert(name.into(), route);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fluent_construction() {
        let descriptor = ResourceDescriptor::new("groups").item_resource(
            "memberships",
            ResourceDescriptor::new("memberships")
                .extra_route("bulk", RouteDescriptor::new("bulk")),
        );

        assert_eq!(descriptor.path, "groups");
        assert!(!descriptor.read_only);
        let nested = descriptor.item_resources.get("memberships").unwrap();
        assert_eq!(nested.path, "memberships");
        assert_eq!(
            nested.extra_routes.get("bulk"),
            Some(&RouteDescriptor::new("bulk"))
        );
    }

    #[test]
    fn test_deserialize_defaults_empty_maps() {
        let descriptor: ResourceDescriptor =
            serde_json::from_str(r#"{"path": "people"}"#).unwrap();

        assert_eq!(descriptor.path, "people");
        assert!(!descriptor.read_only);
        assert!(descriptor.item_resources.is_empty());
        assert!(descriptor.extra_routes.is_empty());
        assert!(descriptor.item_extra_routes.is_empty());
    }

    #[test]
    fn test_deserialize_full_tree() {
        let descriptor: ResourceDescriptor = serde_json::from_str(
            r#"{
                "path": "events",
                "read_only": true,
                "item_resources": {
                    "rsvps": {"path": "rsvps"}
                },
                "item_extra_routes": {
                    "publish": {"path": "publish"}
                }
            }"#,
        )
        .unwrap();

        assert!(descriptor.read_only);
        assert_eq!(descriptor.item_resources.get("rsvps").unwrap().path, "rsvps");
        assert_eq!(
            descriptor.item_extra_routes.get("publish").unwrap().path,
            "publish"
        );
    }
}
