//! Error types for the endpoint pipeline.
//!
//! Every failure inside an invocation is captured as an [`EndpointError`] and
//! handed to an [`ErrorController`](crate::ErrorController), which turns it
//! into a response. Nothing here ever escapes an invocation.
//!
//! | Variant | Raised when | Default status |
//! |---|---|---|
//! | [`SchemaError::Input`] | Composed input fails the input schema | 400 |
//! | [`SchemaError::Output`] | Callback result fails the output schema | 400 |
//! | [`CallbackError`] | Callback returns an error or panics | 500 |
//! | [`MiddlewareError`] | A middleware returns an error, panics, or yields a non-object | 500 |
//! | [`PayloadTooLargeError`] | A streamed body exceeds the endpoint's limit | 413 |

use crate::schema::SchemaIssue;
use std::any::Any;
use thiserror::Error;

/// Result type alias using [`EndpointError`].
pub type EndpointResult<T> = Result<T, EndpointError>;

/// Schema validation failure on either side of the callback.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// The composed request input did not match the input schema.
    #[error("Endpoint input schema error")]
    Input(Vec<SchemaIssue>),

    /// The callback result did not match the output schema.
    #[error("Endpoint output schema error")]
    Output(Vec<SchemaIssue>),
}

impl SchemaError {
    /// Returns the collected issues.
    #[must_use]
    pub fn issues(&self) -> &[SchemaIssue] {
        match self {
            Self::Input(issues) | Self::Output(issues) => issues,
        }
    }

    /// Returns true for input validation failures.
    #[must_use]
    pub const fn is_input(&self) -> bool {
        matches!(self, Self::Input(_))
    }

    /// Serializes the issue list as pretty-printed JSON.
    ///
    /// Issues hold only strings, enums and JSON numbers, so serialization
    /// does not fail in practice. [`DefaultController`](crate::DefaultController)
    /// still falls back to the display string if it does.
    ///
    /// # Errors
    ///
    /// Returns the serializer error.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self.issues())
    }
}

/// Failure raised by the user callback.
///
/// `message` is meant for the response body; `cause` keeps the full
/// diagnostic rendering for logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct CallbackError {
    /// Human-readable message.
    pub message: String,
    /// Diagnostic rendering of the underlying cause.
    pub cause: String,
}

impl CallbackError {
    /// Message used when a panic payload carries no text.
    pub const FALLBACK_MESSAGE: &'static str = "Unhandled callback error";

    /// Creates a callback error.
    pub fn new(message: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: cause.into(),
        }
    }

    /// Builds a callback error from an error returned by the callback.
    #[must_use]
    pub fn from_error(err: &anyhow::Error) -> Self {
        Self::new(err.to_string(), format!("{err:?}"))
    }

    /// Builds a callback error from a caught panic payload.
    #[must_use]
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        match panic_message(payload) {
            Some(message) => Self::new(message, format!("panic: {message}")),
            None => Self::new(Self::FALLBACK_MESSAGE, "panic with non-string payload"),
        }
    }
}

/// Failure raised while aggregating middleware context.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("middleware '{middleware}' failed: {message}")]
pub struct MiddlewareError {
    /// Name of the failing middleware.
    pub middleware: String,
    /// Human-readable message.
    pub message: String,
}

impl MiddlewareError {
    /// Creates a middleware error.
    pub fn new(middleware: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            middleware: middleware.into(),
            message: message.into(),
        }
    }

    /// Builds a middleware error from a caught panic payload.
    #[must_use]
    pub fn from_panic(middleware: impl Into<String>, payload: &(dyn Any + Send)) -> Self {
        let message = panic_message(payload).unwrap_or("panicked");
        Self::new(middleware, message)
    }
}

/// A request body exceeded the configured size limit.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("payload too large: max {limit} bytes")]
pub struct PayloadTooLargeError {
    /// The limit that was exceeded, in bytes.
    pub limit: usize,
}

impl PayloadTooLargeError {
    /// Creates the error for a limit in bytes.
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl From<MiddlewareError> for CallbackError {
    fn from(err: MiddlewareError) -> Self {
        Self::new(err.message.clone(), err.to_string())
    }
}

/// Any failure inside the endpoint pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EndpointError {
    /// Input or output schema failure.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Callback failure.
    #[error("callback error: {0}")]
    Callback(#[from] CallbackError),

    /// Middleware failure.
    #[error(transparent)]
    Middleware(#[from] MiddlewareError),

    /// Request body over the size limit. The callback never runs.
    #[error(transparent)]
    PayloadTooLarge(#[from] PayloadTooLargeError),
}

impl EndpointError {
    /// Returns a short label for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Schema(SchemaError::Input(_)) => "input_schema",
            Self::Schema(SchemaError::Output(_)) => "output_schema",
            Self::Callback(_) => "callback",
            Self::Middleware(_) => "middleware",
            Self::PayloadTooLarge(_) => "payload_too_large",
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> Option<&str> {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        return Some(*s);
    }
    payload.downcast_ref::<String>().map(String::as_str)
}
