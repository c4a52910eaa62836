//! Callback registration and invocation.
//!
//! A callback receives the validated input (if an input schema is set) and
//! the merged middleware context (if any middleware is set). Returned errors
//! and panics are both captured as a [`CallbackError`].

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use quickapi_core::{BoxFuture, CallbackError};
use quickapi_extract::Reply;
use quickapi_middleware::ContextMap;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A type-erased endpoint callback.
pub type Callback = Arc<dyn Fn(CallbackInput) -> BoxFuture<'static, anyhow::Result<Reply>> + Send + Sync>;

/// What a callback is invoked with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallbackInput {
    /// Validated input. `None` when the endpoint has no input schema.
    pub input: Option<Value>,
    /// Merged middleware context. `None` when the endpoint has no middlewares.
    pub ctx: Option<ContextMap>,
}

impl CallbackInput {
    /// Creates a callback input.
    #[must_use]
    pub fn new(input: Option<Value>, ctx: Option<ContextMap>) -> Self {
        Self { input, ctx }
    }

    /// Decodes the validated input into `T`.
    ///
    /// An absent input decodes from `null`.
    ///
    /// # Errors
    ///
    /// Returns the deserializer error if the input does not fit `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        match &self.input {
            Some(value) => T::deserialize(value),
            None => T::deserialize(&Value::Null),
        }
    }

    /// Looks up a value in the validated input by JSON pointer,
    /// e.g. `/body/id`.
    #[must_use]
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        self.input.as_ref().and_then(|value| value.pointer(pointer))
    }

    /// Decodes a single middleware context entry.
    #[must_use]
    pub fn context<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.ctx.as_ref().and_then(|ctx| ctx.get(key))
    }
}

/// Erases an async function into a [`Callback`].
///
/// The function may return anything convertible into a [`Reply`]: a JSON
/// [`Value`], a finished response, or a `Reply` itself.
///
/// # Example
///
/// ```
/// use quickapi::callback::{callback, CallbackInput};
/// use serde_json::json;
///
/// let greet = callback(|input: CallbackInput| async move {
///     let name = input.pointer("/query/name").cloned().unwrap_or(json!("world"));
///     Ok(json!({ "greeting": name }))
/// });
/// # let _ = greet;
/// ```
pub fn callback<F, Fut, R>(func: F) -> Callback
where
    F: Fn(CallbackInput) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
    R: Into<Reply>,
{
    Arc::new(move |input: CallbackInput| -> BoxFuture<'static, anyhow::Result<Reply>> {
        let fut = func(input);
        Box::pin(async move { fut.await.map(Into::into) })
    })
}

/// Runs the callback, turning errors and panics into a [`CallbackError`].
pub(crate) async fn invoke(callback: &Callback, input: CallbackInput) -> Result<Reply, CallbackError> {
    let outcome = AssertUnwindSafe(async { callback(input).await })
        .catch_unwind()
        .await;

    match outcome {
        Ok(Ok(reply)) => Ok(reply),
        Ok(Err(err)) => Err(CallbackError::from_error(&err)),
        Err(payload) => Err(CallbackError::from_panic(payload.as_ref())),
    }
}
