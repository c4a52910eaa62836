//! Typed configuration for QuickApi services.
//!
//! Configuration is layered (defaults, then a TOML or JSON file, then
//! environment variables) and strict: unknown fields are rejected.
//!
//! # Example
//!
//! ```no_run
//! use quickapi_config::ConfigLoader;
//!
//! # fn main() -> Result<(), quickapi_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_dotenv()?
//!     .with_optional_file("quickapi.toml")?
//!     .with_env_prefix("QUICKAPI")
//!     .load()?;
//!
//! let controller = config.responses.to_controller()?;
//! # let _ = controller;
//! # Ok(())
//! # }
//! ```
//!
//! # File Format
//!
//! ```toml
//! [logging]
//! enabled = true
//! level = "info"
//! format = "json"
//! include_location = false
//! service_name = "orders"
//!
//! [responses]
//! schema_error_status = 400
//! callback_error_status = 500
//!
//! [body]
//! max_bytes = 2097152
//! ```
//!
//! # Environment Overrides
//!
//! Variables use `PREFIX__SECTION__KEY`:
//!
//! - `QUICKAPI__LOGGING__LEVEL=debug`
//! - `QUICKAPI__RESPONSES__SCHEMA_ERROR_STATUS=422`
//! - `QUICKAPI__BODY__MAX_BYTES=65536`

#![doc(html_root_url = "https://docs.rs/quickapi-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::*;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
