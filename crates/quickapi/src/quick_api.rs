//! Endpoint factory.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use quickapi_config::{ConfigError, QuickApiConfig};
use quickapi_core::{DefaultController, ErrorController};
use quickapi_extract::Reply;

use crate::callback::{callback, CallbackInput};
use crate::endpoint::EndpointBuilder;

/// Builds endpoints that share an error controller and body limit.
///
/// # Example
///
/// ```
/// use quickapi::core::{DefaultController, Schema};
/// use quickapi::QuickApi;
///
/// let api = QuickApi::new(
///     DefaultController::new().with_schema_error_status(http::StatusCode::UNPROCESSABLE_ENTITY),
/// );
///
/// let endpoint = api
///     .endpoint(|input| async move { Ok(input.pointer("/params/id").cloned().unwrap_or_default()) })
///     .input(Schema::object([(
///         "params",
///         Schema::object([("id", Schema::string())]),
///     )]))
///     .build();
/// # let _ = endpoint;
/// ```
#[derive(Clone)]
pub struct QuickApi {
    controller: Arc<dyn ErrorController>,
    body_limit: Option<usize>,
}

impl Default for QuickApi {
    fn default() -> Self {
        Self::new(DefaultController::new())
    }
}

impl QuickApi {
    /// Creates a factory that injects `controller` into every endpoint.
    #[must_use]
    pub fn new<C: ErrorController>(controller: C) -> Self {
        Self {
            controller: Arc::new(controller),
            body_limit: None,
        }
    }

    /// Builds a factory from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration fails validation.
    pub fn from_config(config: &QuickApiConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let controller = config.responses.to_controller()?;
        Ok(Self::new(controller).with_body_limit(config.body.max_bytes))
    }

    /// Sets the body limit for endpoints built afterwards.
    #[must_use]
    pub fn with_body_limit(mut self, max_bytes: usize) -> Self {
        self.body_limit = Some(max_bytes);
        self
    }

    /// Returns the injected controller.
    #[must_use]
    pub fn controller(&self) -> &Arc<dyn ErrorController> {
        &self.controller
    }

    /// Returns the body limit applied to new endpoints.
    #[must_use]
    pub fn body_limit(&self) -> Option<usize> {
        self.body_limit
    }

    /// Starts an endpoint around an async callback.
    pub fn endpoint<F, Fut, R>(&self, func: F) -> EndpointBuilder
    where
        F: Fn(CallbackInput) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
        R: Into<Reply>,
    {
        let builder = EndpointBuilder::new(callback(func)).shared_controller(Arc::clone(&self.controller));
        match self.body_limit {
            Some(limit) => builder.body_limit(limit),
            None => builder,
        }
    }
}

impl fmt::Debug for QuickApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuickApi")
            .field("body_limit", &self.body_limit)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::StatusCode;
    use quickapi_core::{CallbackError, EndpointContext, Response, SchemaError};
    use serde_json::Value;

    struct Teapot;

    impl ErrorController for Teapot {
        fn on_schema_error(&self, _error: &SchemaError) -> Response {
            teapot()
        }

        fn on_callback_error(&self, _error: &CallbackError) -> Response {
            teapot()
        }
    }

    fn teapot() -> Response {
        let mut response = Response::new(Bytes::from_static(b"teapot"));
        *response.status_mut() = StatusCode::IM_A_TEAPOT;
        response
    }

    #[tokio::test]
    async fn test_controller_injected_into_endpoints() {
        let api = QuickApi::new(Teapot);
        let endpoint = api
            .endpoint(|_| async { Err::<Value, _>(anyhow::anyhow!("nope")) })
            .build();
        let request = http::Request::get("/").body(Bytes::new()).unwrap();

        let response = endpoint.invoke(&request, &EndpointContext::new()).await;

        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
    }

    #[tokio::test]
    async fn test_endpoint_can_override_controller() {
        let api = QuickApi::new(Teapot);
        let endpoint = api
            .endpoint(|_| async { Err::<Value, _>(anyhow::anyhow!("nope")) })
            .controller(DefaultController::new())
            .build();
        let request = http::Request::get("/").body(Bytes::new()).unwrap();

        let response = endpoint.invoke(&request, &EndpointContext::new()).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_from_config() {
        let mut config = QuickApiConfig::default();
        config.responses.schema_error_status = 422;
        config.body.max_bytes = 512;

        let api = QuickApi::from_config(&config).unwrap();
        let endpoint = api.endpoint(|_| async { Ok(Value::Null) }).build();

        assert_eq!(api.body_limit(), Some(512));
        assert_eq!(endpoint.config().body_limit(), Some(512));
    }

    #[test]
    fn test_from_invalid_config() {
        let mut config = QuickApiConfig::default();
        config.body.max_bytes = 0;

        assert!(QuickApi::from_config(&config).is_err());
    }

    #[test]
    fn test_default_has_no_body_limit() {
        let api = QuickApi::default();
        assert_eq!(api.body_limit(), None);
        assert!(format!("{api:?}").contains("QuickApi"));
    }
}
