//! Route parameters handed to an endpoint by the transport.
//!
//! Routing is not performed here. Whatever router sits in front of an
//! endpoint resolves the path and passes the captured segments in through
//! [`EndpointContext`](crate::EndpointContext).

use serde_json::{Map, Value};
use smallvec::SmallVec;

/// Number of parameters stored inline before spilling to the heap.
const INLINE_PARAMS: usize = 4;

/// Captured route parameters as ordered `(name, value)` pairs.
///
/// # Example
///
/// ```rust
/// use quickapi_core::Params;
///
/// let params: Params = [("userId", "123"), ("tab", "posts")].into_iter().collect();
///
/// assert_eq!(params.get("userId"), Some("123"));
/// assert_eq!(params.get("missing"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params {
    inner: SmallVec<[(String, String); INLINE_PARAMS]>,
}

impl Params {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.push((name.into(), value.into()));
    }

    /// Returns the value of the last parameter with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of stored pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Iterates over the pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Renders the parameters as a JSON object of strings.
    ///
    /// A repeated name keeps its last value.
    #[must_use]
    pub fn to_json_object(&self) -> Map<String, Value> {
        self.iter()
            .map(|(n, v)| (n.to_string(), Value::String(v.to_string())))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            inner: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
