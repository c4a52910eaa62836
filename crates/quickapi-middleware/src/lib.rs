//! # QuickApi Middleware
//!
//! Context-producing middlewares for QuickApi endpoints.
//!
//! Unlike wrapping middleware, a QuickApi middleware never sees the callback.
//! It looks at the request and invocation context, returns a key/value
//! record, and the [`MiddlewareChain`] merges the records in declared order
//! before the callback runs.
//!
//! ## Merge Policy
//!
//! | Situation | Callback receives |
//! |-----------|-------------------|
//! | No middlewares configured | `None` |
//! | Middlewares configured | `Some(map)` with every record merged |
//! | Two records share a key | The later middleware's value |
//! | A middleware fails or panics | Nothing; the error controller responds |
//!
//! ## Example
//!
//! ```
//! use quickapi_middleware::{sync_middleware, ContextMap, MiddlewareChain};
//!
//! let auth = sync_middleware("auth", |req, _ctx| {
//!     let token = req
//!         .headers()
//!         .get("authorization")
//!         .ok_or_else(|| anyhow::anyhow!("Unauthorized"))?;
//!     Ok(ContextMap::new().with("token", token.to_str()?.to_string()))
//! });
//!
//! let chain = MiddlewareChain::new().with(auth);
//! assert_eq!(chain.len(), 1);
//! ```

#![doc(html_root_url = "https://docs.rs/quickapi-middleware/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod chain;
pub mod context;
pub mod middleware;

pub use chain::MiddlewareChain;
pub use context::ContextMap;
pub use middleware::{
    middleware, sync_middleware, ContextMiddleware, FnMiddleware, SharedMiddleware,
    SyncFnMiddleware,
};
