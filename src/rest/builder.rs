//! One-shot construction of the resource tree from configuration.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::clients::Transport;
use crate::config::ResourceDescriptor;
use crate::rest::{BoundPath, Resource};

/// Walks a resource configuration and binds each top-level collection
/// to the shared transport.
///
/// Nested resources and extra routes are not materialized here; they
/// bind lazily once an item's locator is known, since their paths
/// depend on it.
#[must_use]
pub fn build_resources(
    transport: &Arc<Transport>,
    configuration: &BTreeMap<String, ResourceDescriptor>,
) -> BTreeMap<String, Resource> {
    configuration
        .iter()
        .map(|(name, descriptor)| {
            let resource = Resource::bound(
                Arc::clone(transport),
                BoundPath::relative(descriptor.path.clone()),
                Arc::new(descriptor.clone()),
            );
            (name.clone(), resource)
        })
        .collect()
}
