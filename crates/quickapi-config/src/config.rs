//! Root configuration type.

use serde::{Deserialize, Serialize};

use crate::{BodySection, ConfigError, LogFormat, LoggingSection, ResponsesSection};

/// Complete QuickApi configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load it from files and
/// environment variables.
///
/// # Example
///
/// ```
/// use quickapi_config::QuickApiConfig;
///
/// let config = QuickApiConfig::default();
/// assert_eq!(config.responses.schema_error_status, 400);
/// assert_eq!(config.responses.callback_error_status, 500);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct QuickApiConfig {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSection,

    /// Error response configuration.
    #[serde(default)]
    pub responses: ResponsesSection,

    /// Request body configuration.
    #[serde(default)]
    pub body: BodySection,
}

impl QuickApiConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - The log level is not a valid filter directive
    /// - An error status is outside 400..=599
    /// - The body limit is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        quickapi_telemetry::create_env_filter(&self.logging.level)
            .map_err(|e| ConfigError::invalid_value("logging.level", e.to_string()))?;

        self.responses.to_controller()?;

        if self.body.max_bytes == 0 {
            return Err(ConfigError::invalid_value(
                "body.max_bytes",
                "must be greater than zero",
            ));
        }

        Ok(())
    }

    /// Development preset: pretty debug logs with source locations.
    ///
    /// # Example
    ///
    /// ```
    /// use quickapi_config::QuickApiConfig;
    ///
    /// let config = QuickApiConfig::development();
    /// assert_eq!(config.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();
        config.logging.level = "debug".to_string();
        config.logging.format = LogFormat::Pretty;
        config.logging.include_location = true;
        config
    }

    /// Production preset: JSON logs at info level.
    ///
    /// # Example
    ///
    /// ```
    /// use quickapi_config::{LogFormat, QuickApiConfig};
    ///
    /// let config = QuickApiConfig::production();
    /// assert_eq!(config.logging.format, LogFormat::Json);
    /// ```
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();
        config.logging.level = "info".to_string();
        config.logging.format = LogFormat::Json;
        config
    }
}
