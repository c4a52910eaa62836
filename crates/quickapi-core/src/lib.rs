//! # QuickApi Core
//!
//! Core types and traits for the QuickApi endpoint pipeline.
//!
//! This crate provides the foundational types shared by every other QuickApi crate:
//!
//! - [`Schema`] - Declarative value schema with zod-style structured issues
//! - [`EndpointContext`] - Per-invocation context carrying route params and metadata
//! - [`RequestId`] - UUID v7 request identifier
//! - [`Params`] - Route parameters supplied by the transport
//! - [`EndpointError`] - Structured pipeline errors
//! - [`ErrorController`] - Pluggable error-to-response mapping

#![doc(html_root_url = "https://docs.rs/quickapi-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod context;
pub mod controller;
mod error;
mod params;
pub mod schema;
mod types;

pub use context::{EndpointContext, RequestId};
pub use controller::{DefaultController, ErrorController};
pub use error::{
    CallbackError, EndpointError, EndpointResult, MiddlewareError, PayloadTooLargeError,
    SchemaError,
};
pub use params::Params;
pub use schema::{IssueCode, PathSegment, Schema, SchemaIssue, ValueKind};
pub use types::{BoxFuture, Request, Response};
