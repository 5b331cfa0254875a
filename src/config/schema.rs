//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Root configuration for the response header pipeline.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PipelineConfig {
    /// Cookie rewriting options.
    pub cookies: CookieConfig,

    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Cookie rewriting configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CookieConfig {
    /// Rewrite backend host occurrences in `Set-Cookie` to the client-facing host.
    pub rewrite_domain: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            rewrite_domain: true,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}
