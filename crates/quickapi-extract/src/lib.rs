//! Request input composition and response mapping for QuickApi.
//!
//! This crate sits on both ends of the endpoint callback:
//!
//! | Item | Direction | Purpose |
//! |------|-----------|---------|
//! | [`ComposedInput`] | request → callback | Query, route params and body merged into one value |
//! | [`Reply`] | callback → response | Finished response or plain value |
//! | [`JsonResponse`], [`TextResponse`] | callback → response | Response builders |
//!
//! # Example
//!
//! ```rust
//! use bytes::Bytes;
//! use quickapi_core::EndpointContext;
//! use quickapi_extract::{ComposedInput, Reply};
//!
//! let request = http::Request::get("/search?q=rust").body(Bytes::new()).unwrap();
//! let input = ComposedInput::from_request(&request, &EndpointContext::new()).into_value();
//!
//! let reply = Reply::value(input["query"]["q"].clone());
//! assert_eq!(reply.into_response().body().as_ref(), br#""rust""#);
//! ```

#![doc(html_root_url = "https://docs.rs/quickapi-extract/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod input;
pub mod response;

pub use input::ComposedInput;
pub use response::{JsonResponse, Reply, TextResponse};
