//! Configuration section types.

use http::StatusCode;
use quickapi_core::DefaultController;
use quickapi_telemetry::LogConfig;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON formatted logs (production).
    #[default]
    Json,
    /// Human-readable pretty format (development).
    Pretty,
}

/// Logging section.
///
/// # Example
///
/// ```
/// use quickapi_config::{LogFormat, LoggingSection};
///
/// let section = LoggingSection {
///     format: LogFormat::Pretty,
///     ..Default::default()
/// };
/// assert!(!section.to_log_config().json_format);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Filter directives (e.g., "info", "quickapi=debug,warn").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include source file and line in logs.
    #[serde(default)]
    pub include_location: bool,

    /// Service name logged at startup.
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            include_location: false,
            service_name: default_service_name(),
        }
    }
}

impl LoggingSection {
    /// Converts into the telemetry crate's [`LogConfig`].
    #[must_use]
    pub fn to_log_config(&self) -> LogConfig {
        let base = match self.format {
            LogFormat::Json => LogConfig::production(),
            LogFormat::Pretty => LogConfig::development(),
        };

        LogConfig {
            enabled: self.enabled,
            level: self.level.clone(),
            file_line_info: self.include_location,
            service_name: self.service_name.clone(),
            ..base
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_service_name() -> String {
    "quickapi-service".to_string()
}

/// Error response section, consumed by the default controller.
///
/// # Example
///
/// ```toml
/// [responses]
/// schema_error_status = 422
/// callback_error_status = 500
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ResponsesSection {
    /// Status for input and output schema failures.
    #[serde(default = "default_schema_error_status")]
    pub schema_error_status: u16,

    /// Status for callback and middleware failures.
    #[serde(default = "default_callback_error_status")]
    pub callback_error_status: u16,
}

impl Default for ResponsesSection {
    fn default() -> Self {
        Self {
            schema_error_status: default_schema_error_status(),
            callback_error_status: default_callback_error_status(),
        }
    }
}

impl ResponsesSection {
    /// Builds a [`DefaultController`] with the configured statuses.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a status is outside 400..=599.
    pub fn to_controller(&self) -> Result<DefaultController, ConfigError> {
        Ok(DefaultController::new()
            .with_schema_error_status(error_status(
                "responses.schema_error_status",
                self.schema_error_status,
            )?)
            .with_callback_error_status(error_status(
                "responses.callback_error_status",
                self.callback_error_status,
            )?))
    }
}

fn error_status(field: &str, code: u16) -> Result<StatusCode, ConfigError> {
    if !(400..=599).contains(&code) {
        return Err(ConfigError::invalid_value(
            field,
            format!("{code} is not an error status (400-599)"),
        ));
    }
    StatusCode::from_u16(code).map_err(|e| ConfigError::invalid_value(field, e.to_string()))
}

fn default_schema_error_status() -> u16 {
    400
}

fn default_callback_error_status() -> u16 {
    500
}

/// Request body section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BodySection {
    /// Largest request body, in bytes, collected from a streaming request.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
}

impl Default for BodySection {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
        }
    }
}

fn default_max_bytes() -> usize {
    2 * 1024 * 1024
}
