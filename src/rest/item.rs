//! Items: hydrated records and their lifecycle.
//!
//! An [`Item`] represents zero-or-one remote record. It starts life as
//! a *draft* (no locator) from [`Resource::create`](crate::rest::Resource::create),
//! or as a *persisted* record hydrated from a server payload. `save()`
//! creates or updates the record in place; `refresh()` re-fetches it.
//! Embedded related entities in payloads hydrate recursively into
//! nested `Item`s addressable through their own locators.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use crate::clients::{ApiError, ApiResponse, Transport};
use crate::config::ResourceDescriptor;
use crate::rest::{BoundPath, ExtraRoute, Resource};

/// Maximum supported payload nesting depth during hydration.
///
/// Server payloads are tree-shaped, so real depth tracks the payload
/// structure; the cap only exists so a pathological payload fails as a
/// decode error instead of exhausting the stack.
const MAX_HYDRATION_DEPTH: usize = 64;

/// The server-assigned address of a persisted record.
///
/// Entities usually carry a full `url`; some payloads only carry an
/// `_id`, which resolves against the item's base path instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Locator {
    /// An absolute URL from the entity's `url` field.
    Url(String),
    /// A bare id from the entity's `_id` field.
    Id(String),
}

impl Locator {
    /// Returns the raw locator string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Url(s) | Self::Id(s) => s,
        }
    }
}

/// One hydrated field value.
///
/// Classification happens during hydration: scalars pass through,
/// sequences hydrate element-wise, objects carrying a locator become
/// nested [`Item`]s, and plain objects recurse field-by-field.
#[derive(Clone, Debug, PartialEq)]
pub enum Field {
    /// A JSON scalar (null, bool, number, or string).
    Scalar(Value),
    /// A plain JSON object with no locator of its own.
    Object(BTreeMap<String, Field>),
    /// A JSON array, hydrated element-wise.
    List(Vec<Field>),
    /// An embedded related entity with its own locator.
    Item(Box<Item>),
}

impl Field {
    /// Returns the scalar value, if this field is one.
    #[must_use]
    pub const fn as_scalar(&self) -> Option<&Value> {
        match self {
            Self::Scalar(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the nested item, if this field is one.
    #[must_use]
    pub fn as_item(&self) -> Option<&Item> {
        match self {
            Self::Item(item) => Some(item),
            _ => None,
        }
    }

    /// Returns the element list, if this field is one.
    #[must_use]
    pub const fn as_list(&self) -> Option<&Vec<Field>> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the plain-object map, if this field is one.
    #[must_use]
    pub const fn as_object(&self) -> Option<&BTreeMap<String, Field>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Serializes the field back to JSON.
    ///
    /// Nested items serialize as their field map plus their locator.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Scalar(value) => value.clone(),
            Self::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_value()))
                    .collect(),
            ),
            Self::List(items) => Value::Array(items.iter().map(Field::to_value).collect()),
            Self::Item(item) => item.to_json_with_locator(),
        }
    }
}

/// A single remote record, draft or persisted.
///
/// An `Item` with a locator denotes a persisted record; one without is
/// an unsaved draft. Items are caller-owned and mutated in place by
/// [`save`](Item::save) and [`refresh`](Item::refresh); nothing
/// destroys them implicitly.
#[derive(Clone, Debug)]
pub struct Item {
    transport: Arc<Transport>,
    base: BoundPath,
    descriptor: Arc<ResourceDescriptor>,
    locator: Option<Locator>,
    etag: Option<String>,
    fields: BTreeMap<String, Field>,
}

impl PartialEq for Item {
    /// Items compare by record identity and content; the transport
    /// binding is not part of equality.
    fn eq(&self, other: &Self) -> bool {
        self.locator == other.locator && self.fields == other.fields
    }
}

impl Item {
    /// Builds a draft item from caller-supplied fields. No network call.
    pub(crate) fn draft(
        transport: Arc<Transport>,
        base: BoundPath,
        descriptor: Arc<ResourceDescriptor>,
        fields: Value,
    ) -> Result<Self, ApiError> {
        let map = match fields {
            Value::Object(map) => map,
            Value::Null => serde_json::Map::new(),
            other => {
                return Err(ApiError::usage(format!(
                    "item fields must be a JSON object, got {other}"
                )))
            }
        };

        let mut item = Self {
            transport,
            base,
            descriptor,
            locator: None,
            etag: None,
            fields: BTreeMap::new(),
        };
        for (key, value) in &map {
            let field = item.hydrate(value, 0)?;
            item.fields.insert(key.clone(), field);
        }
        Ok(item)
    }

    /// Hydrates a persisted item from a server payload.
    pub(crate) fn from_payload(
        transport: Arc<Transport>,
        base: BoundPath,
        descriptor: Arc<ResourceDescriptor>,
        payload: &Value,
    ) -> Result<Self, ApiError> {
        Self::from_payload_at_depth(transport, base, descriptor, payload, 0)
    }

    fn from_payload_at_depth(
        transport: Arc<Transport>,
        base: BoundPath,
        descriptor: Arc<ResourceDescriptor>,
        payload: &Value,
        depth: usize,
    ) -> Result<Self, ApiError> {
        let Some(obj) = payload.as_object() else {
            return Err(ApiError::Decode(format!(
                "entity payload is not an object: {payload}"
            )));
        };

        let locator = locator_of(obj);
        // A non-string url value never became the locator; it stays a
        // regular field instead of being dropped.
        let url_is_locator = matches!(locator, Some(Locator::Url(_)));
        let mut item = Self {
            transport,
            base,
            descriptor,
            locator,
            etag: obj
                .get("_etag")
                .and_then(Value::as_str)
                .map(ToString::to_string),
            fields: BTreeMap::new(),
        };
        for (key, value) in obj {
            if (key == "url" && url_is_locator) || key == "_etag" {
                continue;
            }
            let field = item.hydrate(value, depth)?;
            item.fields.insert(key.clone(), field);
        }
        Ok(item)
    }

    /// Classifies and hydrates one field value.
    fn hydrate(&self, value: &Value, depth: usize) -> Result<Field, ApiError> {
        if depth >= MAX_HYDRATION_DEPTH {
            return Err(ApiError::Decode(format!(
                "payload nesting exceeds {MAX_HYDRATION_DEPTH} levels"
            )));
        }
        match value {
            Value::Array(items) => Ok(Field::List(
                items
                    .iter()
                    .map(|v| self.hydrate(v, depth + 1))
                    .collect::<Result<_, _>>()?,
            )),
            Value::Object(map) if map.contains_key("url") || map.contains_key("_id") => {
                // An embedded entity with its own locator. The API
                // namespaces embedded entities under the parent's
                // collection, so the nested item shares the base path.
                let nested = Self::from_payload_at_depth(
                    Arc::clone(&self.transport),
                    self.base.clone(),
                    Arc::clone(&self.descriptor),
                    value,
                    depth + 1,
                )?;
                Ok(Field::Item(Box::new(nested)))
            }
            Value::Object(map) => {
                let mut fields = BTreeMap::new();
                for (key, nested) in map {
                    fields.insert(key.clone(), self.hydrate(nested, depth + 1)?);
                }
                Ok(Field::Object(fields))
            }
            scalar => Ok(Field::Scalar(scalar.clone())),
        }
    }

    /// Returns the record's locator; `None` for a draft.
    #[must_use]
    pub const fn locator(&self) -> Option<&Locator> {
        self.locator.as_ref()
    }

    /// Returns `true` while the item has not been persisted.
    #[must_use]
    pub const fn is_draft(&self) -> bool {
        self.locator.is_none()
    }

    /// Returns the concurrency token from the last server exchange.
    #[must_use]
    pub fn etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }

    /// Returns one field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Returns the full field mapping.
    #[must_use]
    pub const fn fields(&self) -> &BTreeMap<String, Field> {
        &self.fields
    }

    /// Sets one field from a JSON value, applying the hydration rule.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if the value nests deeper than the
    /// supported payload depth.
    pub fn set_field(&mut self, name: impl Into<String>, value: &Value) -> Result<(), ApiError> {
        let field = self.hydrate(value, 0)?;
        self.fields.insert(name.into(), field);
        Ok(())
    }

    /// Returns a new draft carrying a copy of this item's fields but no
    /// locator, ready to be saved as a separate record.
    #[must_use]
    pub fn clone_draft(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            base: self.base.clone(),
            descriptor: Arc::clone(&self.descriptor),
            locator: None,
            etag: None,
            fields: self.fields.clone(),
        }
    }

    /// Serializes the item's field mapping to a JSON object.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect(),
        )
    }

    /// Like [`to_json`](Self::to_json), with the locator included.
    fn to_json_with_locator(&self) -> Value {
        let mut body = self.to_json();
        if let (Value::Object(map), Some(locator)) = (&mut body, &self.locator) {
            match locator {
                Locator::Url(url) => {
                    map.insert("url".to_string(), Value::String(url.clone()));
                }
                Locator::Id(id) => {
                    map.insert("_id".to_string(), Value::String(id.clone()));
                }
            }
        }
        body
    }

    /// Resolves the locator to a request path.
    fn locator_bound(&self) -> Result<BoundPath, ApiError> {
        match &self.locator {
            None => Err(ApiError::usage(
                "operation requires a persisted item; a draft has no locator",
            )),
            Some(Locator::Url(url)) => Ok(BoundPath::url(url.clone())),
            Some(Locator::Id(id)) => Ok(self.base.join(id)),
        }
    }

    /// Persists the item.
    ///
    /// A draft issues one `POST` against the owning resource's base
    /// path; the returned locator is assigned and all other returned
    /// fields are merged in (the server is authoritative for computed
    /// fields). A persisted item issues one `PATCH` against its own
    /// locator with the full field mapping and merges the response the
    /// same way.
    ///
    /// # Errors
    ///
    /// Propagates the transport's [`ApiError`] unchanged; a 422 arrives
    /// as [`ApiError::Validation`].
    pub async fn save(&mut self) -> Result<(), ApiError> {
        let body = self.to_json();
        let response = if self.locator.is_none() {
            self.transport
                .post(&self.base.path, self.base.options().body(body))
                .await?
        } else {
            let bound = self.locator_bound()?;
            self.transport
                .patch(&bound.path, bound.options().body(body))
                .await?
        };
        self.merge_response(&response)
    }

    /// Re-fetches the record and merges its fields in.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Usage`] immediately, with no network call,
    /// when the item is a draft.
    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        let bound = self.locator_bound()?;
        let response = self.transport.get(&bound.path, bound.options()).await?;
        self.merge_response(&response)
    }

    /// Merges a server response into the item: locator, etag, fields.
    fn merge_response(&mut self, response: &ApiResponse) -> Result<(), ApiError> {
        if let Some(etag) = response.etag() {
            self.etag = Some(etag);
        }

        let Some(obj) = response.body.as_object() else {
            // Some servers answer updates with an empty body; local
            // state already reflects what was sent.
            return Ok(());
        };

        let mut url_is_locator = false;
        if let Some(locator) = locator_of(obj) {
            url_is_locator = matches!(locator, Locator::Url(_));
            self.locator = Some(locator);
        }
        for (key, value) in obj {
            if (key == "url" && url_is_locator) || key == "_etag" {
                continue;
            }
            let field = self.hydrate(value, 0)?;
            self.fields.insert(key.clone(), field);
        }
        Ok(())
    }

    /// Returns the nested sub-resource declared under this item's
    /// descriptor, bound under the item's locator.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Usage`] on a draft (its children have no
    /// valid base path yet) or for an unknown name.
    pub fn resource(&self, name: &str) -> Result<Resource, ApiError> {
        let bound = self.locator_bound()?;
        let descriptor = self.descriptor.item_resources.get(name).ok_or_else(|| {
            ApiError::usage(format!("no nested resource named '{name}' is configured"))
        })?;
        Ok(Resource::bound(
            Arc::clone(&self.transport),
            bound.join(&descriptor.path),
            Arc::new(descriptor.clone()),
        ))
    }

    /// Returns the named item-scoped extra route, bound under this
    /// item's locator.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Usage`] on a draft or for an unknown name.
    pub fn extra_route(&self, name: &str) -> Result<ExtraRoute, ApiError> {
        let bound = self.locator_bound()?;
        let route = self.descriptor.item_extra_routes.get(name).ok_or_else(|| {
            ApiError::usage(format!("no extra route named '{name}' is configured"))
        })?;
        Ok(ExtraRoute::bound(
            Arc::clone(&self.transport),
            bound.join(&route.path),
        ))
    }
}

/// Reads the locator out of an entity object, preferring `url`.
fn locator_of(obj: &serde_json::Map<String, Value>) -> Option<Locator> {
    if let Some(url) = obj.get("url").and_then(Value::as_str) {
        return Some(Locator::Url(url.to_string()));
    }
    match obj.get("_id") {
        Some(Value::String(id)) => Some(Locator::Id(id.clone())),
        Some(Value::Number(id)) => Some(Locator::Id(id.to_string())),
        _ => None,
    }
}
