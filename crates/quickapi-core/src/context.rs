//! Invocation context types.
//!
//! An [`EndpointContext`] is created by the transport for every invocation
//! and handed to middlewares unchanged. It is never shared between invocations.

use crate::Params;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A unique identifier for each invocation, using UUID v7.
///
/// UUID v7 is time-ordered, which keeps log lines for the same
/// endpoint sortable by arrival.
///
/// # Example
///
/// ```
/// use quickapi_core::RequestId;
///
/// let id = RequestId::new();
/// println!("Request ID: {}", id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Creates a new unique request ID using UUID v7.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for RequestId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Per-invocation context supplied alongside the request.
///
/// Carries the route parameters resolved by whatever router sits in front
/// of the endpoint, plus free-form string metadata from the transport.
/// Route parameters are optional: `None` means the transport supplied none,
/// which the input extractor treats as an empty map.
///
/// # Example
///
/// ```
/// use quickapi_core::EndpointContext;
///
/// let ctx = EndpointContext::new()
///     .with_param("userId", "42")
///     .with_metadata("tenant", "acme");
///
/// assert_eq!(ctx.param("userId"), Some("42"));
/// assert_eq!(ctx.metadata("tenant"), Some("acme"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EndpointContext {
    request_id: RequestId,
    params: Option<Params>,
    metadata: HashMap<String, String>,
}

impl EndpointContext {
    /// Creates a context with a fresh request ID and no params.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request ID, typically propagated from an inbound header.
    #[must_use]
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = request_id;
        self
    }

    /// Replaces the route parameters.
    #[must_use]
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = Some(params);
        self
    }

    /// Adds a single route parameter.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.get_or_insert_with(Params::new).push(name, value);
        self
    }

    /// Adds a metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Returns the request ID.
    #[must_use]
    pub const fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Returns the route parameters, if the transport supplied any.
    #[must_use]
    pub fn params(&self) -> Option<&Params> {
        self.params.as_ref()
    }

    /// Looks up a single route parameter.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.as_ref().and_then(|p| p.get(name))
    }

    /// Looks up a metadata entry.
    #[must_use]
    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}
