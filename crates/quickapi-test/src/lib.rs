//! # QuickApi Test
//!
//! In-memory helpers for exercising QuickApi endpoints without a server.
//!
//! [`TestRequest`] builds the `(Request, EndpointContext)` pair an endpoint
//! takes, and [`TestResponse`] wraps the response with assertion helpers.
//!
//! ## Example
//!
//! ```ignore
//! use quickapi_test::{TestRequest, TestResponse};
//! use serde_json::json;
//!
//! #[tokio::test]
//! async fn test_create_user() {
//!     let (request, ctx) = TestRequest::post("/users")
//!         .json(&json!({"name": "Alice"}))
//!         .build()
//!         .unwrap();
//!
//!     let response = TestResponse::from_response(endpoint.invoke(&request, &ctx).await);
//!     response
//!         .assert_status(http::StatusCode::OK)
//!         .assert_json_eq(&json!({"id": 1, "name": "Alice"}));
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/quickapi-test/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod request;
mod response;

pub use error::TestError;
pub use request::{TestRequest, TestRequestBuilder};
pub use response::TestResponse;
