//! Error controllers.
//!
//! An [`ErrorController`] is the only place where pipeline failures become
//! responses. Endpoints receive one at construction; [`DefaultController`]
//! is used when none is supplied.
//!
//! # Example
//!
//! ```
//! use bytes::Bytes;
//! use http::StatusCode;
//! use quickapi_core::{CallbackError, ErrorController, Response, SchemaError};
//!
//! struct Teapot;
//!
//! impl ErrorController for Teapot {
//!     fn on_schema_error(&self, _error: &SchemaError) -> Response {
//!         let mut response = Response::new(Bytes::from_static(b"bad shape"));
//!         *response.status_mut() = StatusCode::IM_A_TEAPOT;
//!         response
//!     }
//!
//!     fn on_callback_error(&self, error: &CallbackError) -> Response {
//!         let mut response = Response::new(Bytes::from(error.message.clone()));
//!         *response.status_mut() = StatusCode::SERVICE_UNAVAILABLE;
//!         response
//!     }
//! }
//! ```

use crate::error::{CallbackError, MiddlewareError, PayloadTooLargeError, SchemaError};
use crate::Response;
use bytes::Bytes;
use http::header::{self, HeaderValue};
use http::StatusCode;

/// Maps structured pipeline errors to responses.
///
/// Implementations must not fail; they are the last stop for every error.
pub trait ErrorController: Send + Sync + 'static {
    /// Builds the response for an input or output schema failure.
    fn on_schema_error(&self, error: &SchemaError) -> Response;

    /// Builds the response for a callback failure.
    fn on_callback_error(&self, error: &CallbackError) -> Response;

    /// Builds the response for a middleware failure.
    ///
    /// Defaults to the callback error mapping.
    fn on_middleware_error(&self, error: &MiddlewareError) -> Response {
        self.on_callback_error(&CallbackError::from(error.clone()))
    }

    /// Builds the response for a request body over the endpoint's limit.
    ///
    /// Defaults to `413` with the error as plain text.
    fn on_payload_too_large(&self, error: &PayloadTooLargeError) -> Response {
        build_response(
            StatusCode::PAYLOAD_TOO_LARGE,
            "text/plain; charset=utf-8",
            Bytes::from(error.to_string()),
        )
    }
}

/// The stock controller.
///
/// - Schema errors: `400` with the issue list as a JSON array
/// - Callback and middleware errors: `500` with the message as plain text
/// - Oversized bodies: `413` with the error as plain text
///
/// Both statuses can be overridden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultController {
    schema_error_status: StatusCode,
    callback_error_status: StatusCode,
}

impl Default for DefaultController {
    fn default() -> Self {
        Self {
            schema_error_status: StatusCode::BAD_REQUEST,
            callback_error_status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl DefaultController {
    /// Creates a controller with the stock statuses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the status used for schema errors.
    #[must_use]
    pub fn with_schema_error_status(mut self, status: StatusCode) -> Self {
        self.schema_error_status = status;
        self
    }

    /// Overrides the status used for callback and middleware errors.
    #[must_use]
    pub fn with_callback_error_status(mut self, status: StatusCode) -> Self {
        self.callback_error_status = status;
        self
    }

    /// Returns the status used for schema errors.
    #[must_use]
    pub const fn schema_error_status(&self) -> StatusCode {
        self.schema_error_status
    }

    /// Returns the status used for callback errors.
    #[must_use]
    pub const fn callback_error_status(&self) -> StatusCode {
        self.callback_error_status
    }
}

impl ErrorController for DefaultController {
    fn on_schema_error(&self, error: &SchemaError) -> Response {
        match error.to_json_pretty() {
            Ok(body) => build_response(self.schema_error_status, "application/json", body.into()),
            Err(_) => build_response(
                self.schema_error_status,
                "text/plain; charset=utf-8",
                Bytes::from(error.to_string()),
            ),
        }
    }

    fn on_callback_error(&self, error: &CallbackError) -> Response {
        build_response(
            self.callback_error_status,
            "text/plain; charset=utf-8",
            Bytes::from(error.message.clone()),
        )
    }
}

fn build_response(status: StatusCode, content_type: &'static str, body: Bytes) -> Response {
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
    use crate::schema::Schema;
    use serde_json::json;

    fn missing_id() -> SchemaError {
        let issues = Schema::object([("id", Schema::string())])
            .safe_parse(&json!({}))
            .unwrap_err();
        SchemaError::Input(issues)
    }

    #[test]
    fn test_default_schema_error_response() {
        let response = DefaultController::new().on_schema_error(&missing_id());

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(
            body,
            json!([{
                "code": "invalid_type",
                "expected": "string",
                "received": "undefined",
                "path": ["id"],
                "message": "Required"
            }])
        );
    }

    #[test]
    fn test_default_callback_error_response() {
        let response = DefaultController::new()
            .on_callback_error(&CallbackError::new("Test error", "Error: Test error"));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body().as_ref(), b"Test error");
    }

    #[test]
    fn test_default_middleware_error_uses_callback_mapping() {
        let response = DefaultController::new()
            .on_middleware_error(&MiddlewareError::new("auth", "no token"));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body().as_ref(), b"no token");
    }

    #[test]
    fn test_schema_error_body_is_never_empty() {
        let response = DefaultController::new().on_schema_error(&SchemaError::Output(Vec::new()));

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.body().as_ref(), b"[]");
    }

    #[test]
    fn test_default_payload_too_large_response() {
        let response = DefaultController::new().on_payload_too_large(&PayloadTooLargeError::new(8));

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(response.body().as_ref(), b"payload too large: max 8 bytes");
    }

    #[test]
    fn test_custom_statuses() {
        let controller = DefaultController::new()
            .with_schema_error_status(StatusCode::UNPROCESSABLE_ENTITY)
            .with_callback_error_status(StatusCode::BAD_GATEWAY);

        assert_eq!(
            controller.on_schema_error(&missing_id()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            controller
                .on_callback_error(&CallbackError::new("x", "x"))
                .status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
