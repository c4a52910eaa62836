//! # QuickApi
//!
//! **Declarative HTTP endpoints as a fixed execution pipeline.**
//!
//! An endpoint is an input schema, an ordered list of context middlewares,
//! a callback, an output schema and an error controller. Every request runs
//! through the same stages and produces exactly one response:
//!
//! ```text
//! Request → [input schema] → middlewares → callback → [output schema] → Response
//!                 │               │            │              │
//!                 └───────────────┴────────────┴──────────────┴─→ ErrorController
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use quickapi::prelude::*;
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let api = QuickApi::default();
//!
//! let get_user = api
//!     .endpoint(|input: CallbackInput| async move {
//!         let id = input.pointer("/params/id").cloned().unwrap_or_default();
//!         let caller: Option<String> = input.context("caller");
//!         Ok(json!({ "id": id, "caller": caller }))
//!     })
//!     .input(Schema::object([("params", Schema::object([("id", Schema::string())]))]))
//!     .middleware(sync_middleware("caller", |_req, _ctx| {
//!         Ok(ContextMap::new().with("caller", "ada"))
//!     }))
//!     .output(Schema::object([("id", Schema::string()), ("caller", Schema::string())]))
//!     .build();
//!
//! let request = http::Request::get("/users/7").body(bytes::Bytes::new()).unwrap();
//! let ctx = EndpointContext::new().with_param("id", "7");
//!
//! let response = get_user.invoke(&request, &ctx).await;
//! assert_eq!(response.status(), http::StatusCode::OK);
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/quickapi/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod callback;
mod endpoint;
mod quick_api;

pub use callback::{Callback, CallbackInput};
pub use endpoint::{Endpoint, EndpointBuilder, EndpointConfig, Handler};
pub use quick_api::QuickApi;

// Re-export core types
pub use quickapi_core as core;

// Re-export extraction and response types
pub use quickapi_extract as extract;

// Re-export middleware types
pub use quickapi_middleware as middleware;

// Re-export configuration
pub use quickapi_config as config;

// Re-export logging setup
pub use quickapi_telemetry as telemetry;

/// Prelude module for convenient imports.
///
/// ```rust
/// use quickapi::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{CallbackInput, Endpoint, EndpointBuilder, QuickApi};

    pub use quickapi_core::{
        CallbackError, DefaultController, EndpointContext, EndpointError, ErrorController,
        MiddlewareError, PayloadTooLargeError, Request, Response, Schema, SchemaError, SchemaIssue,
    };

    pub use quickapi_extract::{JsonResponse, Reply, TextResponse};

    pub use quickapi_middleware::{
        middleware, sync_middleware, ContextMap, ContextMiddleware, MiddlewareChain,
    };
}
