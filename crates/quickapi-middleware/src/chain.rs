//! Ordered middleware chain and context aggregation.
//!
//! ```text
//! Request, Context ─┬─> m1 ─> {a: 1}
//!                   ├─> m2 ─> {a: 2, b: 1}      (after m1 completes)
//!                   └─> merged: {a: 2, b: 1}    (last write wins)
//! ```
//!
//! Middlewares run one after another, never concurrently. Each receives the
//! original request and invocation context, not the partially merged
//! context. An empty chain yields no context at all (`None`), which is
//! distinct from an empty map.

use crate::context::ContextMap;
use crate::middleware::{ContextMiddleware, SharedMiddleware};
use futures_util::FutureExt;
use quickapi_core::{EndpointContext, MiddlewareError, Request};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// An ordered list of context middlewares.
///
/// # Example
///
/// ```
/// use quickapi_middleware::{sync_middleware, ContextMap, MiddlewareChain};
///
/// let chain = MiddlewareChain::new()
///     .with(sync_middleware("first", |_, _| Ok(ContextMap::new().with("a", 1))))
///     .with(sync_middleware("second", |_, _| Ok(ContextMap::new().with("a", 2))));
///
/// assert_eq!(chain.names(), vec!["first", "second"]);
/// ```
#[derive(Clone, Default)]
pub struct MiddlewareChain {
    middlewares: Vec<SharedMiddleware>,
}

impl MiddlewareChain {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a middleware.
    #[must_use]
    pub fn with<M: ContextMiddleware>(mut self, middleware: M) -> Self {
        self.push(Arc::new(middleware));
        self
    }

    /// Appends an already shared middleware.
    pub fn push(&mut self, middleware: SharedMiddleware) {
        self.middlewares.push(middleware);
    }

    /// Returns the number of middlewares.
    #[must_use]
    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    /// Returns true if the chain is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }

    /// Returns the middleware names in execution order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.middlewares.iter().map(|m| m.name()).collect()
    }

    /// Runs every middleware in order and merges their records.
    ///
    /// Returns `Ok(None)` for an empty chain. Stops at the first middleware
    /// that returns an error or panics.
    ///
    /// # Errors
    ///
    /// Returns a [`MiddlewareError`] naming the failing middleware.
    pub async fn aggregate(
        &self,
        request: &Request,
        ctx: &EndpointContext,
    ) -> Result<Option<ContextMap>, MiddlewareError> {
        if self.middlewares.is_empty() {
            return Ok(None);
        }

        let mut merged = ContextMap::new();

        for middleware in &self.middlewares {
            let name = middleware.name();
            let outcome = AssertUnwindSafe(async { middleware.produce(request, ctx).await })
                .catch_unwind()
                .await;

            let record = match outcome {
                Ok(Ok(record)) => record,
                Ok(Err(err)) => {
                    tracing::warn!(middleware = name, error = %err, "Middleware failed");
                    return Err(MiddlewareError::new(name, err.to_string()));
                }
                Err(payload) => {
                    tracing::warn!(middleware = name, "Middleware panicked");
                    return Err(MiddlewareError::from_panic(name, payload.as_ref()));
                }
            };

            tracing::debug!(middleware = name, keys = record.len(), "Middleware produced context");
            merged.merge(record);
        }

        Ok(Some(merged))
    }
}

impl std::fmt::Debug for MiddlewareChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiddlewareChain")
            .field("middlewares", &self.names())
            .finish()
    }
}
