//! Composed input extraction.
//!
//! The composed input is the single JSON value an endpoint's input schema
//! is validated against. It merges request-level properties with three
//! namespaced sub-objects:
//!
//! | Key | Source |
//! |-----|--------|
//! | `method`, `url`, `path`, `headers` | Request line and headers |
//! | `query` | Query string, flat string map |
//! | `params` | Route params from the [`EndpointContext`], empty if absent |
//! | `body` | Body parsed as JSON, or the raw text if parsing fails |
//!
//! Extraction never fails. A malformed query yields an empty map and a
//! non-JSON body falls back to its raw text.
//!
//! # Example
//!
//! ```rust
//! use bytes::Bytes;
//! use quickapi_core::EndpointContext;
//! use quickapi_extract::ComposedInput;
//! use serde_json::json;
//!
//! let request = http::Request::post("http://localhost/users/7?verbose=1")
//!     .body(Bytes::from_static(br#"{"name":"Ada"}"#))
//!     .unwrap();
//! let ctx = EndpointContext::new().with_param("id", "7");
//!
//! let input = ComposedInput::from_request(&request, &ctx).into_value();
//! assert_eq!(input["query"], json!({"verbose": "1"}));
//! assert_eq!(input["params"], json!({"id": "7"}));
//! assert_eq!(input["body"], json!({"name": "Ada"}));
//! ```

use bytes::Bytes;
use http::HeaderMap;
use quickapi_core::{EndpointContext, Request};
use serde::Serialize;
use serde_json::{Map, Value};

/// Request-derived value handed to input validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposedInput {
    /// HTTP method, upper case.
    pub method: String,
    /// Full request URI as received.
    pub url: String,
    /// URI path.
    pub path: String,
    /// Header values by lower-case name; repeated headers are joined with `", "`.
    pub headers: Map<String, Value>,
    /// Query parameters.
    pub query: Map<String, Value>,
    /// Route parameters.
    pub params: Map<String, Value>,
    /// Parsed body.
    pub body: Value,
}

impl ComposedInput {
    /// Builds the composed input for a request.
    #[must_use]
    pub fn from_request(request: &Request, ctx: &EndpointContext) -> Self {
        Self {
            method: request.method().as_str().to_string(),
            url: request.uri().to_string(),
            path: request.uri().path().to_string(),
            headers: header_map(request.headers()),
            query: parse_query(request.uri().query()),
            params: ctx
                .params()
                .map(quickapi_core::Params::to_json_object)
                .unwrap_or_default(),
            body: parse_body(request.body()),
        }
    }

    /// Converts into a JSON object.
    #[must_use]
    pub fn into_value(self) -> Value {
        let mut obj = Map::new();
        obj.insert("method".to_string(), Value::String(self.method));
        obj.insert("url".to_string(), Value::String(self.url));
        obj.insert("path".to_string(), Value::String(self.path));
        obj.insert("headers".to_string(), Value::Object(self.headers));
        obj.insert("query".to_string(), Value::Object(self.query));
        obj.insert("params".to_string(), Value::Object(self.params));
        obj.insert("body".to_string(), self.body);
        Value::Object(obj)
    }
}

/// Parses a query string into a flat string map.
///
/// A key that appears more than once keeps its last value. A query that
/// cannot be decoded yields an empty map.
///
/// # Example
///
/// ```rust
/// use quickapi_extract::input::parse_query;
/// use serde_json::json;
///
/// let query = parse_query(Some("tag=a&tag=b&q=hello%20world"));
/// assert_eq!(query["tag"], json!("b"));
/// assert_eq!(query["q"], json!("hello world"));
/// ```
#[must_use]
pub fn parse_query(query: Option<&str>) -> Map<String, Value> {
    let Some(query) = query.filter(|q| !q.is_empty()) else {
        return Map::new();
    };

    match serde_urlencoded::from_str::<Vec<(String, String)>>(query) {
        Ok(pairs) => pairs
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect(),
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring malformed query string");
            Map::new()
        }
    }
}

/// Parses a request body.
///
/// - Empty body: `null`
/// - Valid JSON: the parsed value
/// - Anything else: the raw body as (lossy) UTF-8 text
#[must_use]
pub fn parse_body(body: &Bytes) -> Value {
    if body.is_empty() {
        return Value::Null;
    }

    serde_json::from_slice(body).unwrap_or_else(|_| {
        tracing::debug!(len = body.len(), "Body is not JSON, keeping raw text");
        Value::String(String::from_utf8_lossy(body).into_owned())
    })
}

fn header_map(headers: &HeaderMap) -> Map<String, Value> {
    let mut map = Map::new();
    for name in headers.keys() {
        let joined = headers
            .get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect::<Vec<_>>()
            .join(", ");
        map.insert(name.as_str().to_string(), Value::String(joined));
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use quickapi_core::Params;
    use serde_json::json;

    fn request(uri: &str, body: &'static [u8]) -> Request {
        http::Request::builder()
            .method("POST")
            .uri(uri)
            .header("x-trace", "a")
            .header("x-trace", "b")
            .body(Bytes::from_static(body))
            .unwrap()
    }

    #[test]
    fn test_query_empty() {
        assert!(parse_query(None).is_empty());
        assert!(parse_query(Some("")).is_empty());
    }

    #[test]
    fn test_query_last_duplicate_wins() {
        let query = parse_query(Some("a=1&b=2&a=3"));
        assert_eq!(Value::Object(query), json!({"a": "3", "b": "2"}));
    }

    #[test]
    fn test_query_key_without_value() {
        let query = parse_query(Some("flag"));
        assert_eq!(query["flag"], json!(""));
    }

    #[test]
    fn test_body_empty_is_null() {
        assert_eq!(parse_body(&Bytes::new()), Value::Null);
    }

    #[test]
    fn test_body_json() {
        assert_eq!(
            parse_body(&Bytes::from_static(br#"{"id":"test"}"#)),
            json!({"id": "test"})
        );
    }

    #[test]
    fn test_body_falls_back_to_raw_text() {
        assert_eq!(
            parse_body(&Bytes::from_static(b"{not json")),
            json!("{not json")
        );
    }

    #[test]
    fn test_compose_without_params() {
        let input = ComposedInput::from_request(
            &request("http://localhost/items?page=2", b""),
            &EndpointContext::new(),
        );

        assert_eq!(input.method, "POST");
        assert_eq!(input.path, "/items");
        assert_eq!(input.url, "http://localhost/items?page=2");
        assert!(input.params.is_empty());
        assert_eq!(input.query["page"], json!("2"));
        assert_eq!(input.body, Value::Null);
    }

    #[test]
    fn test_compose_joins_repeated_headers() {
        let input =
            ComposedInput::from_request(&request("/", b""), &EndpointContext::new());
        assert_eq!(input.headers["x-trace"], json!("a, b"));
    }

    #[test]
    fn test_compose_into_value() {
        let params: Params = [("id", "9")].into_iter().collect();
        let ctx = EndpointContext::new().with_params(params);

        let value =
            ComposedInput::from_request(&request("/things/9", br#"{"n":1}"#), &ctx).into_value();

        assert_eq!(value["params"], json!({"id": "9"}));
        assert_eq!(value["body"], json!({"n": 1}));
        assert_eq!(value["query"], json!({}));
        assert_eq!(value["method"], json!("POST"));
    }

    proptest! {
        #[test]
        fn prop_query_roundtrips_simple_pairs(
            pairs in proptest::collection::btree_map("[a-z]{1,6}", "[a-zA-Z0-9 ]{0,8}", 0..6)
        ) {
            let encoded = serde_urlencoded::to_string(
                pairs.iter().collect::<Vec<_>>()
            ).unwrap();
            let query = parse_query(Some(&encoded));

            prop_assert_eq!(query.len(), pairs.len());
            for (k, v) in &pairs {
                prop_assert_eq!(&query[k], &json!(v));
            }
        }

        #[test]
        fn prop_body_never_fails(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            let _ = parse_body(&Bytes::from(bytes));
        }
    }
}
