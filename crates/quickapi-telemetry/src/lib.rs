//! Structured logging for QuickApi services.
//!
//! QuickApi endpoints emit `tracing` spans and events. This crate installs
//! the subscriber that renders them:
//!
//! - **JSON** output for production log pipelines
//! - **Pretty** output for local development
//! - Level filtering through [`tracing_subscriber::EnvFilter`] directives
//!
//! Every invocation runs inside an `endpoint` span carrying `request_id`,
//! `http.method` and `http.path`, so each event can be traced back to the
//! invocation that produced it.
//!
//! # Example
//!
//! ```rust,no_run
//! use quickapi_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::development()).expect("logging");
//! tracing::info!("ready");
//! ```

#![doc(html_root_url = "https://docs.rs/quickapi-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, fields, init_logging, LogConfig};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
