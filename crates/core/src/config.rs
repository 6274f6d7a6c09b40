//! Configuration management for the Grounded Q&A binaries.
//!
//! Configuration is deliberately small: the model endpoint and model
//! identifier are fixed constants, the credential comes from the
//! environment, and a handful of knobs can be overridden via environment
//! variables or command-line flags. The resolved `AppConfig` is an
//! explicit value handed to the answer service at construction — there is
//! no ambient global state.

use serde::{Deserialize, Serialize};

/// Base URL of the Gemini REST API.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used for grounded question answering.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-09-2025";

/// Total attempts per question, including the first one.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Per-attempt request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Main application configuration.
///
/// This struct holds all options that affect behavior across the CLI and
/// the web service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the model API
    pub api_base: String,

    /// Model identifier
    pub model: String,

    /// API credential. Defaults to empty, in which case calls fail
    /// authentication and surface through the terminal-failure answer
    /// path rather than aborting the process.
    pub api_key: String,

    /// Total attempts per question (first call + retries)
    pub max_attempts: u32,

    /// Per-attempt request timeout in seconds
    pub request_timeout_secs: u64,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: String::new(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and defaults.
    ///
    /// Environment variables:
    /// - `GEMINI_API_KEY`: API credential
    /// - `GROUNDED_API_BASE`: Override the API base URL
    /// - `GROUNDED_MODEL`: Override the model identifier
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use grounded_core::config::AppConfig;
    ///
    /// let config = AppConfig::load();
    /// println!("Model: {}", config.model);
    /// ```
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Ok(api_base) = std::env::var("GROUNDED_API_BASE") {
            config.api_base = api_base;
        }

        if let Ok(model) = std::env::var("GROUNDED_MODEL") {
            config.model = model;
        }

        if let Ok(api_key) = std::env::var("GEMINI_API_KEY") {
            config.api_key = api_key;
        }

        config.log_level = std::env::var("RUST_LOG").ok();

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        config
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// This method merges command-line flags with the loaded
    /// configuration, giving precedence to CLI flags over environment
    /// variables.
    pub fn with_overrides(
        mut self,
        model: Option<String>,
        api_key: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(model) = model {
            self.model = model;
        }

        if let Some(api_key) = api_key {
            self.api_key = api_key;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.api_key, "");
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(!config.verbose);
        assert!(!config.no_color);
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default();
        let overridden = config.with_overrides(
            Some("gemini-exp".to_string()),
            Some("secret".to_string()),
            None,
            true,
            false,
        );

        assert_eq!(overridden.model, "gemini-exp");
        assert_eq!(overridden.api_key, "secret");
        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_overrides_keep_existing_values() {
        let config = AppConfig::default().with_overrides(None, None, None, false, true);

        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(config.no_color);
        assert!(config.log_level.is_none());
    }
}
