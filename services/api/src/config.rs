//! Service configuration
//!
//! Built-in defaults overridden by `RECIPES_`-prefixed environment variables,
//! with `__` separating nested keys, e.g. `RECIPES_LLM__API_KEY` or
//! `RECIPES_STORAGE__BACKEND=memory`.

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub storage: StorageConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: String,
}

/// Generative model configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// "gemini" or "fake"
    pub provider: String,
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: String,
    /// Upper bound for a single model call
    pub timeout_secs: u64,
}

/// Storage backend selection
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// "postgres" or "memory"
    pub backend: String,
}

impl StorageConfig {
    pub fn is_memory(&self) -> bool {
        self.backend.eq_ignore_ascii_case("memory")
    }
}

impl AppConfig {
    /// Load configuration from defaults and the environment
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("server.bind_addr", "0.0.0.0:3001")?
            .set_default("llm.provider", "gemini")?
            .set_default("llm.model", "gemini-1.5-flash")?
            .set_default(
                "llm.base_url",
                "https://generativelanguage.googleapis.com/v1beta",
            )?
            .set_default("llm.timeout_secs", 30)?
            .set_default("storage.backend", "postgres")?
            .add_source(
                Environment::with_prefix("RECIPES")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: AppConfig = config.try_deserialize()?;

        match app_config.storage.backend.to_ascii_lowercase().as_str() {
            "postgres" | "memory" => {}
            other => {
                return Err(ConfigError::Message(format!(
                    "Unknown storage backend: {}",
                    other
                )));
            }
        }

        if app_config.llm.timeout_secs == 0 {
            return Err(ConfigError::Message(
                "llm.timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(app_config)
    }
}
