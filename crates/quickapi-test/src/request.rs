//! Test request building.

use crate::error::TestError;
use bytes::Bytes;
use http::{header, HeaderName, HeaderValue, Method};
use quickapi_core::{EndpointContext, Request};
use serde::Serialize;

/// Entry point for building in-memory endpoint requests.
///
/// # Example
///
/// ```
/// use quickapi_test::TestRequest;
/// use serde_json::json;
///
/// let (request, ctx) = TestRequest::post("/users/7?verbose=true")
///     .header("Authorization", "Bearer token")
///     .json(&json!({"name": "Alice"}))
///     .param("id", "7")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.uri().path(), "/users/7");
/// assert_eq!(ctx.param("id"), Some("7"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TestRequest;

impl TestRequest {
    /// Creates a GET request builder.
    pub fn get(uri: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::GET, uri)
    }

    /// Creates a POST request builder.
    pub fn post(uri: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::POST, uri)
    }

    /// Creates a PUT request builder.
    pub fn put(uri: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::PUT, uri)
    }

    /// Creates a PATCH request builder.
    pub fn patch(uri: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::PATCH, uri)
    }

    /// Creates a DELETE request builder.
    pub fn delete(uri: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new(Method::DELETE, uri)
    }
}

/// Builder for a request plus its invocation context.
///
/// Setter failures are deferred: the first one is returned from
/// [`build`](Self::build).
#[must_use]
#[derive(Debug)]
pub struct TestRequestBuilder {
    method: Method,
    uri: String,
    headers: Vec<(HeaderName, HeaderValue)>,
    body: Bytes,
    ctx: EndpointContext,
    error: Option<TestError>,
}

impl TestRequestBuilder {
    /// Creates a request builder.
    pub fn new(method: Method, uri: impl AsRef<str>) -> Self {
        Self {
            method,
            uri: uri.as_ref().to_string(),
            headers: Vec::new(),
            body: Bytes::new(),
            ctx: EndpointContext::new(),
            error: None,
        }
    }

    /// Appends a header. Repeated names keep every value.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| TestError::InvalidHeader(format!("{}: {e}", name.as_ref())));
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| TestError::InvalidHeader(format!("{}: {e}", value.as_ref())));

        match (name, value) {
            (Ok(name), Ok(value)) => self.headers.push((name, value)),
            (Err(e), _) | (_, Err(e)) => self.fail(e),
        }
        self
    }

    /// Sets the raw request body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets a JSON body and the `Content-Type: application/json` header.
    pub fn json<T: Serialize>(mut self, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(bytes) => {
                self.body = Bytes::from(bytes);
                self.header(header::CONTENT_TYPE.as_str(), "application/json")
            }
            Err(e) => {
                self.fail(TestError::Json(e));
                self
            }
        }
    }

    /// Adds a route parameter to the invocation context.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.ctx = self.ctx.with_param(name, value);
        self
    }

    /// Adds a metadata entry to the invocation context.
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.ctx = self.ctx.with_metadata(key, value);
        self
    }

    /// Builds the request and its context.
    ///
    /// # Errors
    ///
    /// Returns the first deferred setter error, or [`TestError::RequestBuild`]
    /// for an invalid URI.
    pub fn build(self) -> Result<(Request, EndpointContext), TestError> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let mut builder = http::Request::builder().method(self.method).uri(self.uri);
        for (name, value) in self.headers {
            builder = builder.header(name, value);
        }

        let request = builder
            .body(self.body)
            .map_err(|e| TestError::RequestBuild(e.to_string()))?;

        Ok((request, self.ctx))
    }

    fn fail(&mut self, err: TestError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_methods() {
        let cases = [
            (TestRequest::get("/x"), Method::GET),
            (TestRequest::post("/x"), Method::POST),
            (TestRequest::put("/x"), Method::PUT),
            (TestRequest::patch("/x"), Method::PATCH),
            (TestRequest::delete("/x"), Method::DELETE),
        ];

        for (builder, method) in cases {
            let (request, _) = builder.build().unwrap();
            assert_eq!(request.method(), method);
        }
    }

    #[test]
    fn test_repeated_header_keeps_all_values() {
        let (request, _) = TestRequest::get("/users")
            .header("x-tag", "a")
            .header("x-tag", "b")
            .build()
            .unwrap();

        let values: Vec<_> = request.headers().get_all("x-tag").iter().collect();
        assert_eq!(values, vec!["a", "b"]);
    }

    #[test]
    fn test_json_body() {
        let (request, _) = TestRequest::post("/users")
            .json(&json!({"name": "Alice"}))
            .build()
            .unwrap();

        assert_eq!(
            request.headers().get("content-type").unwrap(),
            "application/json"
        );
        assert_eq!(request.body().as_ref(), b"{\"name\":\"Alice\"}");
    }

    #[test]
    fn test_raw_body() {
        let (request, _) = TestRequest::post("/data").body("raw data").build().unwrap();
        assert_eq!(request.body().as_ref(), b"raw data");
    }

    #[test]
    fn test_context() {
        let (_, ctx) = TestRequest::get("/users/1")
            .param("id", "1")
            .metadata("tenant", "acme")
            .build()
            .unwrap();

        assert_eq!(ctx.param("id"), Some("1"));
        assert_eq!(ctx.metadata("tenant"), Some("acme"));
    }

    #[test]
    fn test_no_params_means_none() {
        let (_, ctx) = TestRequest::get("/").build().unwrap();
        assert!(ctx.params().is_none());
    }

    #[test]
    fn test_invalid_header_deferred() {
        let result = TestRequest::get("/")
            .header("bad header", "x")
            .header("x-ok", "y")
            .build();

        assert!(matches!(result, Err(TestError::InvalidHeader(_))));
    }

    #[test]
    fn test_invalid_uri() {
        let result = TestRequest::get("http://[::1").build();
        assert!(matches!(result, Err(TestError::RequestBuild(_))));
    }
}
