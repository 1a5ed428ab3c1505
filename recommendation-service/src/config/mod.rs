use secrecy::{ExposeSecret, Secret};
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_API_URL: &str = "https://gpu.aet.cit.tum.de/api/chat/completions";
pub const DEFAULT_MODEL: &str = "llama3:latest";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct RecommendationConfig {
    pub common: core_config::Config,
    pub llm: LlmConfig,
}

/// Upstream chat-completion settings.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_url: String,
    /// Bearer token. Absence is not fatal at startup; each request then fails.
    pub api_key: Option<Secret<String>>,
    pub model: String,
    pub timeout: Duration,
    /// Replaces the built-in prompt when set.
    pub prompt_template: Option<String>,
}

impl LlmConfig {
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().is_empty())
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            prompt_template: None,
        }
    }
}

impl RecommendationConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load(DEFAULT_PORT)?;

        let timeout_secs: u64 = get_env("LLM_TIMEOUT_SECS", &DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("LLM_TIMEOUT_SECS is invalid: {}", e))
            })?;

        Ok(RecommendationConfig {
            common,
            llm: LlmConfig {
                api_url: get_env("LLM_API_URL", DEFAULT_API_URL),
                api_key: env::var("CHAIR_API_KEY").ok().map(Secret::new),
                model: get_env("LLM_MODEL", DEFAULT_MODEL),
                timeout: Duration::from_secs(timeout_secs),
                prompt_template: env::var("RECOMMENDATION_PROMPT_TEMPLATE").ok(),
            },
        })
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
