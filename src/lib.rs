//! # eve-client
//!
//! An async client for hypermedia REST APIs that follow the Eve
//! conventions: collection listings arrive in an `_items` envelope with
//! `_links` continuations, and every entity carries a `url` locator the
//! client addresses it through afterwards.
//!
//! The client is configured declaratively: you describe the resource
//! tree (collections, nested sub-resources, extra routes) once, and
//! construction binds it to a shared HTTP transport. From there the
//! object model takes over:
//!
//! - [`Client`] owns the transport and the top-level resource map
//! - [`rest::Resource`] lists pages, fetches by id, builds drafts
//! - [`rest::Item`] is one record; `save()` and `refresh()` mutate it
//!   in place, and embedded related entities hydrate recursively
//! - [`rest::ResultList`] walks pagination via the server's own links
//!
//! # Example
//!
//! ```rust,no_run
//! use eve_client::config::{ClientOptions, ResourceDescriptor};
//! use eve_client::Client;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let options = ClientOptions::builder("https://api.example.org")
//!     .access_token("my-token")
//!     .resource(
//!         "events",
//!         ResourceDescriptor::new("events")
//!             .item_resource("rsvps", ResourceDescriptor::new("rsvps")),
//!     )
//!     .build()?;
//! let client = Client::new(&options)?;
//!
//! let events = client.resource("events")?;
//! let mut event = events.create(serde_json::json!({"name": "meetup"}))?;
//! event.save().await?;
//!
//! let rsvps = event.resource("rsvps")?;
//! let page = rsvps.list(None).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Errors
//!
//! Configuration problems surface as [`ConfigError`] at build time;
//! everything at request time is an [`ApiError`], with HTTP status
//! classes mapped to typed variants ([`ApiError::NotFound`],
//! [`ApiError::Validation`], [`ApiError::RateLimited`], ...).

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod filters;
pub mod rest;

mod client;

pub use client::Client;
pub use clients::ApiError;
pub use config::ClientOptions;
pub use error::ConfigError;
