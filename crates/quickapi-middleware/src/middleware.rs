//! The context middleware trait and function adapters.
//!
//! A middleware inspects the request and invocation context and returns a
//! [`ContextMap`] record. It does not wrap the callback and cannot
//! short-circuit the pipeline; failing is the only way to stop it, and the
//! endpoint's error controller turns that failure into a response.
//!
//! # Example
//!
//! ```
//! use quickapi_middleware::{middleware, sync_middleware, ContextMap};
//!
//! let tenant = sync_middleware("tenant", |req, _ctx| {
//!     let tenant = req
//!         .headers()
//!         .get("x-tenant")
//!         .and_then(|v| v.to_str().ok())
//!         .unwrap_or("public")
//!         .to_string();
//!     Ok(ContextMap::new().with("tenant", tenant))
//! });
//!
//! let started = middleware("clock", |_req, _ctx| async {
//!     Ok(ContextMap::new().with("started", true))
//! });
//! ```

use crate::context::ContextMap;
use quickapi_core::{BoxFuture, EndpointContext, Request};
use std::future::Future;
use std::sync::Arc;

/// A middleware shared between endpoints.
pub type SharedMiddleware = Arc<dyn ContextMiddleware>;

/// A context-producing middleware.
///
/// # Invariants
///
/// - Receives the exact request and context passed to the endpoint
/// - Runs after every middleware declared before it has finished
/// - Must return a record, possibly empty, or an error
pub trait ContextMiddleware: Send + Sync + 'static {
    /// Returns the middleware name, used in logs and errors.
    fn name(&self) -> &str;

    /// Produces this middleware's context record.
    fn produce<'a>(
        &'a self,
        request: &'a Request,
        ctx: &'a EndpointContext,
    ) -> BoxFuture<'a, anyhow::Result<ContextMap>>;
}

/// Middleware backed by an async function.
///
/// The returned future must be `'static`, so copy what it needs out of
/// the request before the `async` block.
pub struct FnMiddleware<F> {
    name: String,
    func: F,
}

impl<F> FnMiddleware<F> {
    /// Wraps into a [`SharedMiddleware`] for reuse across endpoints.
    pub fn shared(self) -> SharedMiddleware
    where
        Self: ContextMiddleware,
    {
        Arc::new(self)
    }
}

impl<F, Fut> ContextMiddleware for FnMiddleware<F>
where
    F: Fn(&Request, &EndpointContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<ContextMap>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn produce<'a>(
        &'a self,
        request: &'a Request,
        ctx: &'a EndpointContext,
    ) -> BoxFuture<'a, anyhow::Result<ContextMap>> {
        Box::pin((self.func)(request, ctx))
    }
}

/// Middleware backed by a synchronous function.
pub struct SyncFnMiddleware<F> {
    name: String,
    func: F,
}

impl<F> SyncFnMiddleware<F> {
    /// Wraps into a [`SharedMiddleware`] for reuse across endpoints.
    pub fn shared(self) -> SharedMiddleware
    where
        Self: ContextMiddleware,
    {
        Arc::new(self)
    }
}

impl<F> ContextMiddleware for SyncFnMiddleware<F>
where
    F: Fn(&Request, &EndpointContext) -> anyhow::Result<ContextMap> + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn produce<'a>(
        &'a self,
        request: &'a Request,
        ctx: &'a EndpointContext,
    ) -> BoxFuture<'a, anyhow::Result<ContextMap>> {
        Box::pin(async move { (self.func)(request, ctx) })
    }
}

/// Registers an async function as a middleware.
pub fn middleware<F, Fut>(name: impl Into<String>, func: F) -> FnMiddleware<F>
where
    F: Fn(&Request, &EndpointContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<ContextMap>> + Send + 'static,
{
    FnMiddleware {
        name: name.into(),
        func,
    }
}

/// Registers a synchronous function as a middleware.
pub fn sync_middleware<F>(name: impl Into<String>, func: F) -> SyncFnMiddleware<F>
where
    F: Fn(&Request, &EndpointContext) -> anyhow::Result<ContextMap> + Send + Sync + 'static,
{
    SyncFnMiddleware {
        name: name.into(),
        func,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn request() -> Request {
        http::Request::builder()
            .uri("/x")
            .header("x-user", "ada")
            .body(Bytes::new())
            .unwrap()
    }

    #[tokio::test]
    async fn test_fn_middleware_produces_record() {
        let m = middleware("user", |req, _ctx| {
            let user = req.headers().get("x-user").cloned();
            async move {
                let user = user.ok_or_else(|| anyhow::anyhow!("no user"))?;
                Ok(ContextMap::new().with("user", user.to_str()?.to_string()))
            }
        });

        let record = m.produce(&request(), &EndpointContext::new()).await.unwrap();

        assert_eq!(m.name(), "user");
        assert_eq!(record.get::<String>("user").as_deref(), Some("ada"));
    }

    #[tokio::test]
    async fn test_sync_middleware_reads_params() {
        let m = sync_middleware("param", |_req, ctx| {
            Ok(ContextMap::new().with("id", ctx.param("id").unwrap_or_default()))
        });

        let ctx = EndpointContext::new().with_param("id", "42");
        let record = m.produce(&request(), &ctx).await.unwrap();

        assert_eq!(record.get::<String>("id").as_deref(), Some("42"));
    }

    #[tokio::test]
    async fn test_shared_middleware_reusable() {
        let shared = sync_middleware("const", |_req, _ctx| Ok(ContextMap::new().with("k", 1))).shared();
        let clone = Arc::clone(&shared);

        let ctx = EndpointContext::new();
        assert_eq!(shared.produce(&request(), &ctx).await.unwrap().len(), 1);
        assert_eq!(clone.name(), "const");
    }
}
