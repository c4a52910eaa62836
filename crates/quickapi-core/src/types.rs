//! Transport type aliases shared across the pipeline.

use bytes::Bytes;
use std::future::Future;
use std::pin::Pin;

/// HTTP request with a fully buffered body.
pub type Request = http::Request<Bytes>;

/// HTTP response with a fully buffered body.
pub type Response = http::Response<Bytes>;

/// A boxed, sendable future.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
