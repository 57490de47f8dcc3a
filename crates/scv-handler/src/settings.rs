//! Runtime settings read from the process environment
//!
//! Only operational knobs live here. What the handler does to a product is
//! decided per event by its `ResourceProperties`.

use crate::error::HandlerError;
use std::str::FromStr;
use std::time::Duration;

/// Log filter directive variable
pub const LOG_FILTER_VAR: &str = "RUST_LOG";
/// Log format variable (`json` or `text`)
pub const LOG_FORMAT_VAR: &str = "SCV_LOG_FORMAT";
/// Response upload timeout variable, in seconds
pub const RESPONSE_TIMEOUT_VAR: &str = "SCV_RESPONSE_TIMEOUT_SECS";

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line
    #[default]
    Json,
    /// Human-readable lines
    Text,
}

impl FromStr for LogFormat {
    type Err = HandlerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "text" | "pretty" => Ok(LogFormat::Text),
            other => Err(HandlerError::Config(format!(
                "{LOG_FORMAT_VAR}: unknown log format {other:?}"
            ))),
        }
    }
}

/// Handler runtime settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeSettings {
    /// `tracing` filter directives
    pub log_filter: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Timeout for the response upload
    pub response_timeout: Duration,
}

impl RuntimeSettings {
    /// Create default settings
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read settings from the process environment
    ///
    /// # Errors
    /// `HandlerError::Config` on a malformed value.
    pub fn from_env() -> Result<Self, HandlerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through a variable lookup
    ///
    /// # Errors
    /// `HandlerError::Config` on a malformed value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, HandlerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(filter) = lookup(LOG_FILTER_VAR).filter(|v| !v.trim().is_empty()) {
            settings.log_filter = filter;
        }
        if let Some(format) = lookup(LOG_FORMAT_VAR) {
            settings.log_format = format.parse()?;
        }
        if let Some(raw) = lookup(RESPONSE_TIMEOUT_VAR) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                HandlerError::Config(format!("{RESPONSE_TIMEOUT_VAR}: not a number of seconds: {raw:?}"))
            })?;
            if secs == 0 {
                return Err(HandlerError::Config(format!("{RESPONSE_TIMEOUT_VAR} must be positive")));
            }
            settings.response_timeout = Duration::from_secs(secs);
        }

        Ok(settings)
    }

    /// With log filter
    #[inline]
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// With log format
    #[inline]
    #[must_use]
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            log_format: LogFormat::Json,
            response_timeout: Duration::from_secs(30),
        }
    }
}
