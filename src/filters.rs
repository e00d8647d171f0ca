//! Query filter combinators.
//!
//! Eve-style servers accept Mongo-style filter documents through the
//! `where` query parameter. These helpers build the common combinators
//! as plain [`serde_json::Value`]s; [`where_pair`] serializes one into
//! the `(name, value)` pair that
//! [`Resource::list`](crate::rest::Resource::list) accepts.
//!
//! # Example
//!
//! ```rust
//! use eve_client::filters;
//! use serde_json::json;
//!
//! let filter = filters::and(vec![
//!     json!({"status": "open"}),
//!     filters::or(vec![json!({"city": "Paris"}), json!({"city": "Lyon"})]),
//! ]);
//! let query = vec![filters::where_pair(&filter)];
//! # let _ = query;
//! ```

use serde_json::{json, Value};

/// Default geo-query radius in meters for
/// [`close_to_coordinates`].
pub const DEFAULT_MAX_DISTANCE_METERS: u64 = 10_000;

/// Combines clauses so every one must match (`$and`).
#[must_use]
pub fn and(clauses: Vec<Value>) -> Value {
    json!({ "$and": clauses })
}

/// Combines clauses so at least one must match (`$or`).
#[must_use]
pub fn or(clauses: Vec<Value>) -> Value {
    json!({ "$or": clauses })
}

/// Matches records whose `coordinates` field lies within
/// `max_distance` meters of the given `[longitude, latitude]` point.
///
/// Pass `None` for the default radius of
/// [`DEFAULT_MAX_DISTANCE_METERS`].
#[must_use]
pub fn close_to_coordinates(coordinates: [f64; 2], max_distance: Option<u64>) -> Value {
    json!({
        "coordinates": {
            "$near": {
                "$geometry": {
                    "type": "Point",
                    "coordinates": coordinates,
                },
                "$maxDistance": max_distance.unwrap_or(DEFAULT_MAX_DISTANCE_METERS),
            }
        }
    })
}

/// Serializes a filter document into the `where` query pair.
#[must_use]
pub fn where_pair(filter: &Value) -> (String, String) {
    ("where".to_string(), filter.to_string())
}
