//! Response builders and callback replies.
//!
//! | Type | Content-Type | Description |
//! |------|--------------|-------------|
//! | [`JsonResponse`] | `application/json` | JSON serialized response |
//! | [`TextResponse`] | `text/plain` | Plain text |
//! | [`Reply`] | depends | What an endpoint callback hands back |
//!
//! A callback returns a [`Reply`]. A [`Reply::Response`] is a finished
//! transport response and is passed through unchanged when the endpoint has
//! no output schema. A [`Reply::Value`] is a plain value that gets a `200`
//! JSON envelope.
//!
//! # Example
//!
//! ```rust
//! use quickapi_extract::response::{Reply, TextResponse};
//! use serde_json::json;
//!
//! let plain = Reply::value(json!({"ok": true}));
//! let custom: Reply = TextResponse::new("created")
//!     .with_status(http::StatusCode::CREATED)
//!     .into_response()
//!     .into();
//!
//! assert_eq!(plain.into_response().status(), http::StatusCode::OK);
//! assert_eq!(custom.into_response().status(), http::StatusCode::CREATED);
//! ```

use bytes::Bytes;
use http::header::{self, HeaderValue};
use http::StatusCode;
use quickapi_core::Response;
use serde::Serialize;
use serde_json::Value;

/// JSON response builder.
///
/// # Example
///
/// ```rust
/// use quickapi_extract::response::JsonResponse;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Created {
///     id: u64,
/// }
///
/// let response = JsonResponse::created(Created { id: 7 }).into_response().unwrap();
/// assert_eq!(response.status(), http::StatusCode::CREATED);
/// ```
#[derive(Debug)]
pub struct JsonResponse<T> {
    data: T,
    status: StatusCode,
}

impl<T: Serialize> JsonResponse<T> {
    /// Creates a JSON response with status 200 OK.
    #[must_use]
    pub fn new(data: T) -> Self {
        Self {
            data,
            status: StatusCode::OK,
        }
    }

    /// Creates a JSON response with status 201 Created.
    #[must_use]
    pub fn created(data: T) -> Self {
        Self {
            data,
            status: StatusCode::CREATED,
        }
    }

    /// Sets a custom status code.
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Returns the status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Builds the HTTP response.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if `T` cannot be represented as JSON.
    pub fn into_response(self) -> Result<Response, serde_json::Error> {
        let body = serde_json::to_vec(&self.data)?;
        Ok(build(self.status, "application/json", Bytes::from(body)))
    }
}

/// Plain text response builder.
#[derive(Debug, Clone)]
pub struct TextResponse {
    content: String,
    status: StatusCode,
}

impl TextResponse {
    /// Creates a text response with status 200 OK.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            status: StatusCode::OK,
        }
    }

    /// Sets a custom status code.
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Builds the HTTP response.
    #[must_use]
    pub fn into_response(self) -> Response {
        build(
            self.status,
            "text/plain; charset=utf-8",
            Bytes::from(self.content),
        )
    }
}

/// The result of an endpoint callback.
#[derive(Debug)]
pub enum Reply {
    /// A finished transport response.
    Response(Response),
    /// A plain value to be serialized.
    Value(Value),
}

impl Reply {
    /// Wraps a JSON value.
    #[must_use]
    pub fn value(value: Value) -> Self {
        Self::Value(value)
    }

    /// Serializes any value into a reply.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if `data` cannot be represented as JSON.
    /// Inside a callback, `?` turns this into a callback error.
    pub fn json<T: Serialize>(data: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(data).map(Self::Value)
    }

    /// Builds a `200 text/plain` response reply.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Response(TextResponse::new(content).into_response())
    }

    /// Returns the value that an output schema validates.
    ///
    /// A response reply is judged by its body: the decoded JSON if the body
    /// is JSON, the body text otherwise. Its status and headers are not part
    /// of the value and do not survive output validation.
    #[must_use]
    pub fn to_validation_value(&self) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Response(response) => serde_json::from_slice(response.body()).unwrap_or_else(
                |_| Value::String(String::from_utf8_lossy(response.body()).into_owned()),
            ),
        }
    }

    /// Maps the reply to a response.
    ///
    /// Responses pass through unchanged; values become a `200` JSON body.
    #[must_use]
    pub fn into_response(self) -> Response {
        match self {
            Self::Response(response) => response,
            Self::Value(value) => json_ok(&value),
        }
    }
}

impl From<Response> for Reply {
    fn from(response: Response) -> Self {
        Self::Response(response)
    }
}

impl From<Value> for Reply {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<TextResponse> for Reply {
    fn from(response: TextResponse) -> Self {
        Self::Response(response.into_response())
    }
}

/// Builds a `200 application/json` response from a value.
#[must_use]
pub fn json_ok(value: &Value) -> Response {
    build(
        StatusCode::OK,
        "application/json",
        Bytes::from(value.to_string()),
    )
}

fn build(status: StatusCode, content_type: &'static str, body: Bytes) -> Response {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_json_response() {
        let response = JsonResponse::new(json!({"a": 1})).into_response().unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        assert_eq!(response.body().as_ref(), br#"{"a":1}"#);
    }

    #[test]
    fn test_json_response_with_status() {
        let response = JsonResponse::new(1)
            .with_status(StatusCode::ACCEPTED)
            .into_response()
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    #[test]
    fn test_text_response() {
        let response = TextResponse::new("hello").into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.body().as_ref(), b"hello");
    }

    #[test]
    fn test_reply_response_passes_through() {
        let mut original = Response::new(Bytes::from_static(b"test body"));
        *original.status_mut() = StatusCode::IM_A_TEAPOT;

        let response = Reply::from(original).into_response();

        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
        assert_eq!(response.body().as_ref(), b"test body");
        assert!(response.headers().get(header::CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_reply_value_gets_json_envelope() {
        let response = Reply::value(json!("test")).into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.body().as_ref(), br#""test""#);
    }

    #[test]
    fn test_reply_json_rejects_non_string_keys() {
        let mut map = HashMap::new();
        map.insert(vec![1_u8], "x");

        assert!(Reply::json(&map).is_err());
    }

    #[test]
    fn test_validation_value_of_response() {
        let json_reply = Reply::from(JsonResponse::new(json!({"id": "1"})).into_response().unwrap());
        assert_eq!(json_reply.to_validation_value(), json!({"id": "1"}));

        let text_reply = Reply::text("plain");
        assert_eq!(text_reply.to_validation_value(), json!("plain"));
    }
}
