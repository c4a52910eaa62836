//! Middleware context accumulation.
//!
//! Each middleware returns a [`ContextMap`] record. The aggregator merges
//! the records in declared order into one map that the callback receives.
//! On key collision the later record wins.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key/value context produced by middlewares.
///
/// # Example
///
/// ```
/// use quickapi_middleware::ContextMap;
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Deserialize)]
/// struct Ctx {
///     user: String,
///     role: String,
/// }
///
/// let mut ctx = ContextMap::new().with("user", "ada").with("role", "reader");
/// ctx.merge(ContextMap::new().with("role", "admin"));
///
/// let typed: Ctx = ctx.decode().unwrap();
/// assert_eq!(typed.user, "ada");
/// assert_eq!(typed.role, "admin");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextMap(Map<String, Value>);

impl ContextMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from any serializable value.
    ///
    /// `null` yields an empty record.
    ///
    /// # Errors
    ///
    /// Fails if the value cannot be serialized or is not a JSON object.
    pub fn from_serialize<T: Serialize>(data: &T) -> Result<Self, serde_json::Error> {
        match serde_json::to_value(data)? {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::new()),
            other => Err(<serde_json::Error as serde::ser::Error>::custom(format!(
                "context record must be an object, got {other}"
            ))),
        }
    }

    /// Adds an entry, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts an entry, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Merges another record into this one; its values overwrite on collision.
    pub fn merge(&mut self, other: ContextMap) {
        for (key, value) in other.0 {
            self.0.insert(key, value);
        }
    }

    /// Returns the raw value for a key.
    #[must_use]
    pub fn get_value(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a key's value decoded as `T`.
    ///
    /// `None` if the key is absent or the value does not decode.
    #[must_use]
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.0
            .get(key)
            .and_then(|v| T::deserialize(v).ok())
    }

    /// Decodes the whole map into a typed view.
    ///
    /// # Errors
    ///
    /// Fails if the map does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&Value::Object(self.0.clone()))
    }

    /// Returns true if the key is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the underlying map.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for ContextMap {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<ContextMap> for Value {
    fn from(ctx: ContextMap) -> Self {
        Value::Object(ctx.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_last_write_wins() {
        let mut ctx = ContextMap::new().with("a", 1);
        ctx.merge(ContextMap::new().with("a", 2).with("b", 1));

        assert_eq!(Value::from(ctx), json!({"a": 2, "b": 1}));
    }

    #[test]
    fn test_get_typed() {
        let ctx = ContextMap::new().with("count", 3).with("name", "x");

        assert_eq!(ctx.get::<u32>("count"), Some(3));
        assert_eq!(ctx.get::<u32>("name"), None);
        assert_eq!(ctx.get::<String>("missing"), None);
    }

    #[test]
    fn test_from_serialize_object() {
        #[derive(Serialize)]
        struct User {
            id: u32,
        }

        let ctx = ContextMap::from_serialize(&User { id: 5 }).unwrap();
        assert_eq!(ctx.get_value("id"), Some(&json!(5)));
    }

    #[test]
    fn test_from_serialize_null_is_empty() {
        let ctx = ContextMap::from_serialize(&Option::<u8>::None).unwrap();
        assert!(ctx.is_empty());
    }

    #[test]
    fn test_from_serialize_rejects_scalar() {
        assert!(ContextMap::from_serialize(&42).is_err());
    }

    #[test]
    fn test_decode_mismatch() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Needs {
            token: String,
        }

        assert!(ContextMap::new().decode::<Needs>().is_err());
    }
}
