//! HTTP transport layer for API communication.
//!
//! This module provides the foundational request path shared by the
//! whole client: one [`Transport`] per client, decorated by one
//! [`AuthStrategy`](crate::auth::AuthStrategy), mapping every HTTP
//! outcome into the [`ApiError`] taxonomy.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`Transport`]: the async HTTP transport
//! - [`Method`]: supported HTTP verbs
//! - [`RequestOptions`]: query/body/absolute-URL options per request
//! - [`ApiResponse`]: a decoded response with etag and locator metadata
//! - [`ApiError`]: the typed error taxonomy
//!
//! # Example
//!
//! ```rust,ignore
//! use eve_client::auth::AuthStrategy;
//! use eve_client::clients::{Method, RequestOptions, Transport};
//!
//! let transport = Transport::new("https://api.example.org", AuthStrategy::NoAuth)?;
//! let response = transport
//!     .get("/events", RequestOptions::new())
//!     .await?;
//! println!("{}", response.body);
//! ```

mod errors;
mod response;
mod transport;

pub use errors::ApiError;
pub use response::ApiResponse;
pub use transport::{path_join, Method, RequestOptions, Transport};
