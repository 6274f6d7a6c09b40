//! Assembly of the answer service from configuration.
//!
//! Both caller-facing surfaces (the CLI loop and the web endpoint) build
//! their service here, so there is exactly one place that knows how the
//! client and the retry policy are wired together.

use crate::client::ModelClient;
use crate::providers::GeminiClient;
use crate::service::{AnswerService, RetryPolicy};
use grounded_core::{AppConfig, AppResult};
use std::sync::Arc;
use std::time::Duration;

/// Create a model client from configuration.
///
/// # Errors
/// Returns an error if the underlying HTTP client cannot be constructed.
pub fn create_client(config: &AppConfig) -> AppResult<Arc<dyn ModelClient>> {
    let client = GeminiClient::new(
        &config.api_base,
        &config.model,
        &config.api_key,
        Duration::from_secs(config.request_timeout_secs),
    )?;

    Ok(Arc::new(client))
}

/// Create an answer service from configuration.
pub fn create_service(config: &AppConfig) -> AppResult<AnswerService> {
    let client = create_client(config)?;
    let retry = RetryPolicy {
        max_attempts: config.max_attempts,
        ..RetryPolicy::default()
    };

    Ok(AnswerService::new(client, retry))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client_from_default_config() {
        let client = create_client(&AppConfig::default()).unwrap();
        assert_eq!(client.provider_name(), "gemini");
    }

    #[test]
    fn test_create_service_from_default_config() {
        assert!(create_service(&AppConfig::default()).is_ok());
    }
}
