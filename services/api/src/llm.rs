//! Generative text model providers
//!
//! The recipe pipeline only needs "prompt in, text out", so providers sit
//! behind the [`LlmProvider`] trait. The Gemini provider talks to Google's
//! Generative Language API; the fake provider returns canned text for tests
//! and offline development.

mod fake;
mod gemini;

pub use fake::FakeProvider;
pub use gemini::GeminiProvider;

use async_trait::async_trait;
use std::{fmt, sync::Arc, time::Duration};
use thiserror::Error;
use tracing::info;

use crate::config::LlmConfig;

/// Error type for model calls
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API request timed out after {0:?}")]
    Timeout(Duration),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to decode API response: {0}")]
    InvalidResponse(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

/// A generative text model.
///
/// Consumes one prompt and produces free-form text. Nothing about the shape
/// of that text is guaranteed; callers must validate it.
#[async_trait]
pub trait LlmProvider: Send + Sync + fmt::Debug {
    /// Send a prompt and return the model's text response
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    /// Provider name, e.g. "gemini" or "fake"
    fn provider_name(&self) -> &'static str;

    /// Model identifier sent to the provider
    fn model_name(&self) -> &str;
}

/// Build the provider selected by configuration
pub fn create_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
    let provider: Arc<dyn LlmProvider> = match config.provider.as_str() {
        "gemini" => {
            let api_key = config
                .api_key
                .clone()
                .filter(|k| !k.is_empty())
                .ok_or_else(|| LlmError::NotConfigured("llm.api_key is not set".to_string()))?;
            Arc::new(GeminiProvider::new(
                api_key,
                config.model.clone(),
                config.base_url.clone(),
                Duration::from_secs(config.timeout_secs),
            )?)
        }
        "fake" => Arc::new(FakeProvider::with_sample_recipe()),
        other => {
            return Err(LlmError::NotConfigured(format!(
                "Unknown provider: {}",
                other
            )));
        }
    };

    info!(
        "Using {} model provider ({})",
        provider.provider_name(),
        provider.model_name()
    );
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn llm_config(provider: &str, api_key: Option<&str>) -> LlmConfig {
        LlmConfig {
            provider: provider.to_string(),
            model: "gemini-1.5-flash".to_string(),
            api_key: api_key.map(str::to_string),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 30,
        }
    }

    #[test]
    fn test_create_fake_provider() {
        let provider = create_provider(&llm_config("fake", None)).unwrap();
        assert_eq!(provider.provider_name(), "fake");
    }

    #[test]
    fn test_create_gemini_provider() {
        let provider = create_provider(&llm_config("gemini", Some("secret"))).unwrap();
        assert_eq!(provider.provider_name(), "gemini");
        assert_eq!(provider.model_name(), "gemini-1.5-flash");
    }

    #[test]
    fn test_gemini_requires_api_key() {
        let err = create_provider(&llm_config("gemini", None)).unwrap_err();
        assert!(matches!(err, LlmError::NotConfigured(_)));

        let err = create_provider(&llm_config("gemini", Some(""))).unwrap_err();
        assert!(matches!(err, LlmError::NotConfigured(_)));
    }

    #[test]
    fn test_unknown_provider() {
        let err = create_provider(&llm_config("oracle", None)).unwrap_err();
        assert!(err.to_string().contains("Unknown provider: oracle"));
    }
}
