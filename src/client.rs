//! The top-level API client.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::clients::{ApiError, Transport};
use crate::config::ClientOptions;
use crate::error::ConfigError;
use crate::rest::{build_resources, Resource};

/// A client bound to one API endpoint.
///
/// Construction validates the options, builds the shared HTTP
/// transport, and walks the resource configuration once; after that the
/// client is immutable and cheap to share across tasks.
///
/// # Example
///
/// ```rust,no_run
/// use eve_client::config::{ClientOptions, ResourceDescriptor};
/// use eve_client::Client;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let options = ClientOptions::builder("https://api.example.org")
///     .access_token("my-token")
///     .resource("events", ResourceDescriptor::new("events"))
///     .build()?;
/// let client = Client::new(&options)?;
///
/// let events = client.resource("events")?;
/// let page = events.list(None).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Client {
    transport: Arc<Transport>,
    resources: BTreeMap<String, Resource>,
}

// Verify Client is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Client>();
};

impl Client {
    /// Builds a client from validated options.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the underlying HTTP
    /// client cannot be constructed.
    pub fn new(options: &ClientOptions) -> Result<Self, ConfigError> {
        let transport = Arc::new(Transport::new(
            options.endpoint(),
            options.auth().clone(),
        )?);
        let resources = build_resources(&transport, options.configuration());
        Ok(Self {
            transport,
            resources,
        })
    }

    /// Returns the configured base endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.transport.endpoint()
    }

    /// Looks up a configured top-level resource by name.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Usage`] for a name the configuration does
    /// not declare.
    pub fn resource(&self, name: &str) -> Result<Resource, ApiError> {
        self.resources.get(name).cloned().ok_or_else(|| {
            ApiError::usage(format!("no resource named '{name}' is configured"))
        })
    }

    /// Iterates all configured top-level resources in name order.
    pub fn resources(&self) -> impl Iterator<Item = (&str, &Resource)> {
        self.resources
            .iter()
            .map(|(name, resource)| (name.as_str(), resource))
    }

    /// Names of all configured top-level resources, in sorted order.
    pub fn resource_names(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }
}
