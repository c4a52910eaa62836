//! Endpoint configuration and the execution pipeline.
//!
//! ```text
//! Request ─┬─ input schema? ── ComposedInput ── validate ──┐ (SchemaError::Input)
//!          ├─ middlewares ──── aggregate ──────────────────┤ (MiddlewareError)
//!          ├─ callback ─────── invoke ─────────────────────┤ (CallbackError)
//!          └─ output schema? ─ validate ── 200 JSON ───────┤ (SchemaError::Output)
//!                                                          └─> ErrorController
//! ```
//!
//! Every stage exits early on failure and the error controller produces the
//! response, so each invocation yields exactly one response.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use quickapi_core::schema::validate;
use quickapi_core::{
    BoxFuture, DefaultController, EndpointContext, EndpointError, EndpointResult, ErrorController,
    PayloadTooLargeError, Request, Response, Schema, SchemaError,
};
use quickapi_extract::response::json_ok;
use quickapi_extract::ComposedInput;
use quickapi_middleware::{ContextMiddleware, MiddlewareChain, SharedMiddleware};
use tracing::Instrument;

use crate::callback::{self, Callback, CallbackInput};

/// A type-erased, cloneable request handler.
pub type Handler = Arc<dyn Fn(Request, EndpointContext) -> BoxFuture<'static, Response> + Send + Sync>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Immutable endpoint definition shared by every invocation.
pub struct EndpointConfig {
    input: Option<Schema>,
    output: Option<Schema>,
    middlewares: MiddlewareChain,
    callback: Callback,
    controller: Arc<dyn ErrorController>,
    body_limit: Option<usize>,
}

impl EndpointConfig {
    /// Returns the input schema.
    #[must_use]
    pub fn input(&self) -> Option<&Schema> {
        self.input.as_ref()
    }

    /// Returns the output schema.
    #[must_use]
    pub fn output(&self) -> Option<&Schema> {
        self.output.as_ref()
    }

    /// Returns the middleware chain.
    #[must_use]
    pub fn middlewares(&self) -> &MiddlewareChain {
        &self.middlewares
    }

    /// Returns the body size limit applied by [`Endpoint::handle`].
    #[must_use]
    pub fn body_limit(&self) -> Option<usize> {
        self.body_limit
    }
}

impl fmt::Debug for EndpointConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointConfig")
            .field("input", &self.input.is_some())
            .field("output", &self.output.is_some())
            .field("middlewares", &self.middlewares)
            .field("body_limit", &self.body_limit)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Endpoint`].
///
/// Usually obtained from [`QuickApi::endpoint`](crate::QuickApi::endpoint),
/// which pre-sets the controller and body limit.
///
/// # Example
///
/// ```
/// use quickapi::callback::callback;
/// use quickapi::core::Schema;
/// use quickapi::EndpointBuilder;
/// use serde_json::json;
///
/// let endpoint = EndpointBuilder::new(callback(|_| async { Ok(json!({"id": "1"})) }))
///     .output(Schema::object([("id", Schema::string())]))
///     .build();
///
/// assert!(endpoint.config().output().is_some());
/// ```
#[must_use]
pub struct EndpointBuilder {
    input: Option<Schema>,
    output: Option<Schema>,
    middlewares: MiddlewareChain,
    callback: Callback,
    controller: Arc<dyn ErrorController>,
    body_limit: Option<usize>,
}

impl EndpointBuilder {
    /// Starts a builder with the default controller and no body limit.
    pub fn new(callback: Callback) -> Self {
        Self {
            input: None,
            output: None,
            middlewares: MiddlewareChain::new(),
            callback,
            controller: Arc::new(DefaultController::new()),
            body_limit: None,
        }
    }

    /// Sets the input schema, validated against the composed input.
    pub fn input(mut self, schema: Schema) -> Self {
        self.input = Some(schema);
        self
    }

    /// Sets the output schema, validated against the callback's value.
    pub fn output(mut self, schema: Schema) -> Self {
        self.output = Some(schema);
        self
    }

    /// Appends a context middleware.
    pub fn middleware<M: ContextMiddleware>(mut self, middleware: M) -> Self {
        self.middlewares = self.middlewares.with(middleware);
        self
    }

    /// Appends a middleware shared with other endpoints.
    pub fn shared_middleware(mut self, middleware: SharedMiddleware) -> Self {
        self.middlewares.push(middleware);
        self
    }

    /// Replaces the error controller.
    pub fn controller<C: ErrorController>(self, controller: C) -> Self {
        self.shared_controller(Arc::new(controller))
    }

    /// Replaces the error controller with a shared one.
    pub fn shared_controller(mut self, controller: Arc<dyn ErrorController>) -> Self {
        self.controller = controller;
        self
    }

    /// Caps the body collected by [`Endpoint::handle`].
    pub fn body_limit(mut self, max_bytes: usize) -> Self {
        self.body_limit = Some(max_bytes);
        self
    }

    /// Freezes the configuration.
    pub fn build(self) -> Endpoint {
        Endpoint {
            config: Arc::new(EndpointConfig {
                input: self.input,
                output: self.output,
                middlewares: self.middlewares,
                callback: self.callback,
                controller: self.controller,
                body_limit: self.body_limit,
            }),
        }
    }
}

/// A built endpoint. Cheap to clone.
#[derive(Clone, Debug)]
pub struct Endpoint {
    config: Arc<EndpointConfig>,
}

impl Endpoint {
    /// Returns the shared configuration.
    #[must_use]
    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    /// Runs the pipeline and returns its outcome without consulting the
    /// error controller.
    ///
    /// # Errors
    ///
    /// Returns the first [`EndpointError`] raised by any stage.
    pub async fn run(&self, request: &Request, ctx: &EndpointContext) -> EndpointResult<Response> {
        let config = &*self.config;

        let input = match &config.input {
            Some(schema) => {
                let composed = ComposedInput::from_request(request, ctx).into_value();
                tracing::debug!("Validating input");
                validate(Some(composed), Some(schema)).map_err(SchemaError::Input)?
            }
            None => None,
        };

        if !config.middlewares.is_empty() {
            tracing::debug!(count = config.middlewares.len(), "Running middlewares");
        }
        let merged = config.middlewares.aggregate(request, ctx).await?;

        tracing::debug!("Invoking callback");
        let reply = callback::invoke(&config.callback, CallbackInput::new(input, merged)).await?;

        match &config.output {
            Some(schema) => {
                tracing::debug!("Validating output");
                let parsed = schema
                    .safe_parse(&reply.to_validation_value())
                    .map_err(SchemaError::Output)?;
                Ok(json_ok(&parsed))
            }
            None => Ok(reply.into_response()),
        }
    }

    /// Runs the pipeline. Failures are mapped by the error controller, so
    /// this always yields a response.
    pub async fn invoke(&self, request: &Request, ctx: &EndpointContext) -> Response {
        let span = endpoint_span(request.method(), request.uri(), ctx);

        async {
            let response = match self.run(request, ctx).await {
                Ok(response) => response,
                Err(err) => self.fail(&err),
            };

            tracing::debug!(http.status_code = response.status().as_u16(), "Endpoint completed");
            response
        }
        .instrument(span)
        .await
    }

    /// Collects a streaming body, then invokes the endpoint.
    ///
    /// A body over the configured limit is answered by the controller's
    /// [`on_payload_too_large`](ErrorController::on_payload_too_large) and
    /// the pipeline does not run. Any other read failure leaves the body empty.
    pub async fn handle<B>(&self, request: http::Request<B>, ctx: EndpointContext) -> Response
    where
        B: BodyExt,
        B::Error: Into<BoxError>,
    {
        let (parts, body) = request.into_parts();

        let collected = match self.config.body_limit {
            Some(limit) => Limited::new(body, limit).collect().await,
            None => body.collect().await.map_err(Into::into),
        };

        let bytes = match collected {
            Ok(collected) => collected.to_bytes(),
            Err(e) if e.is::<LengthLimitError>() => {
                let limit = self.config.body_limit.unwrap_or_default();
                let err = EndpointError::from(PayloadTooLargeError::new(limit));
                return endpoint_span(&parts.method, &parts.uri, &ctx).in_scope(|| {
                    let response = self.fail(&err);
                    tracing::debug!(http.status_code = response.status().as_u16(), "Endpoint completed");
                    response
                });
            }
            Err(e) => {
                tracing::warn!(request_id = %ctx.request_id(), reason = %e, "Request body discarded");
                Bytes::new()
            }
        };

        self.invoke(&Request::from_parts(parts, bytes), &ctx).await
    }

    /// Converts the endpoint into a type-erased [`Handler`].
    #[must_use]
    pub fn into_handler(self) -> Handler {
        Arc::new(move |request: Request, ctx: EndpointContext| -> BoxFuture<'static, Response> {
            let endpoint = self.clone();
            Box::pin(async move { endpoint.invoke(&request, &ctx).await })
        })
    }

    fn fail(&self, err: &EndpointError) -> Response {
        tracing::warn!(error.kind = err.kind(), error = %err, "Endpoint failed");

        let controller = &self.config.controller;
        match err {
            EndpointError::Schema(e) => controller.on_schema_error(e),
            EndpointError::Callback(e) => controller.on_callback_error(e),
            EndpointError::Middleware(e) => controller.on_middleware_error(e),
            EndpointError::PayloadTooLarge(e) => controller.on_payload_too_large(e),
        }
    }
}

fn endpoint_span(method: &http::Method, uri: &http::Uri, ctx: &EndpointContext) -> tracing::Span {
    tracing::info_span!(
        "endpoint",
        request_id = %ctx.request_id(),
        http.method = %method,
        http.path = %uri.path(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callback::callback;
    use http::StatusCode;
    use http_body_util::Full;
    use quickapi_middleware::{sync_middleware, ContextMap};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn echo_body() -> Callback {
        callback(|input: CallbackInput| async move {
            Ok(input.pointer("/body").cloned().unwrap_or(Value::Null))
        })
    }

    fn post(body: &'static str) -> http::Request<Full<Bytes>> {
        http::Request::post("/echo")
            .body(Full::new(Bytes::from_static(body.as_bytes())))
            .unwrap()
    }

    #[tokio::test]
    async fn test_run_exposes_errors() {
        let endpoint = EndpointBuilder::new(echo_body())
            .input(Schema::object([("body", Schema::object([("id", Schema::string())]))]))
            .build();
        let request = http::Request::post("/echo").body(Bytes::from_static(b"{}")).unwrap();

        let err = endpoint.run(&request, &EndpointContext::new()).await.unwrap_err();

        assert_eq!(err.kind(), "input_schema");
    }

    #[tokio::test]
    async fn test_middleware_error_routed_to_controller() {
        let endpoint = EndpointBuilder::new(echo_body())
            .middleware(sync_middleware("auth", |_, _| -> anyhow::Result<ContextMap> {
                Err(anyhow::anyhow!("Unauthorized"))
            }))
            .build();
        let request = http::Request::get("/").body(Bytes::new()).unwrap();

        let response = endpoint.invoke(&request, &EndpointContext::new()).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body().as_ref(), b"Unauthorized");
    }

    #[tokio::test]
    async fn test_handle_collects_streaming_body() {
        let endpoint = EndpointBuilder::new(echo_body())
            .input(Schema::any())
            .build();

        let response = endpoint.handle(post(r#"{"x":1}"#), EndpointContext::new()).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(serde_json::from_slice::<Value>(response.body()).unwrap(), json!({"x": 1}));
    }

    #[tokio::test]
    async fn test_handle_over_limit_rejects_without_callback() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let endpoint = EndpointBuilder::new(callback(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Ok(Value::Null) }
        }))
        .input(Schema::object([("body", Schema::any())]))
        .body_limit(8)
        .build();
        let request = http::Request::put("/echo")
            .body(Full::new(Bytes::from(vec![b'a'; 64])))
            .unwrap();

        let response = endpoint.handle(request, EndpointContext::new()).await;

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(response.body().as_ref(), b"payload too large: max 8 bytes");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_handle_body_at_limit_is_accepted() {
        let endpoint = EndpointBuilder::new(echo_body())
            .input(Schema::any())
            .body_limit(7)
            .build();

        let response = endpoint.handle(post(r#"{"x":1}"#), EndpointContext::new()).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(serde_json::from_slice::<Value>(response.body()).unwrap(), json!({"x": 1}));
    }

    #[tokio::test]
    async fn test_into_handler_is_reusable() {
        let handler = EndpointBuilder::new(callback(|_| async { Ok(json!("pong")) }))
            .build()
            .into_handler();

        for _ in 0..2 {
            let request = http::Request::get("/ping").body(Bytes::new()).unwrap();
            let response = handler(request, EndpointContext::new()).await;
            assert_eq!(response.body().as_ref(), b"\"pong\"");
        }
    }

    #[test]
    fn test_config_accessors() {
        let endpoint = EndpointBuilder::new(echo_body())
            .middleware(sync_middleware("one", |_, _| Ok(ContextMap::new())))
            .body_limit(1024)
            .build();

        let config = endpoint.config();
        assert!(config.input().is_none());
        assert!(config.output().is_none());
        assert_eq!(config.middlewares().names(), vec!["one"]);
        assert_eq!(config.body_limit(), Some(1024));
        assert!(format!("{endpoint:?}").contains("body_limit"));
    }
}
