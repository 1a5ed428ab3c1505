#![allow(dead_code)]

use recommendation_service::config::{LlmConfig, RecommendationConfig};
use recommendation_service::services::providers::ChatProvider;
use recommendation_service::Application;
use secrecy::Secret;
use std::sync::Arc;
use std::time::Duration;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-api-key";
pub const COMPLETIONS_PATH: &str = "/api/chat/completions";

pub struct TestApp {
    pub address: String,
    pub port: u16,
}

impl TestApp {
    /// Spawn against a real Open WebUI provider configured by `llm`.
    pub async fn spawn(llm: LlmConfig) -> Self {
        let app = Application::build(test_config(llm))
            .await
            .expect("Failed to build test application");
        Self::run(app).await
    }

    /// Spawn with the provider pointed at a wiremock server.
    pub async fn spawn_with_upstream(upstream: &MockServer) -> Self {
        Self::spawn(upstream_llm_config(upstream)).await
    }

    /// Spawn around an injected provider.
    pub async fn spawn_with_provider(provider: Arc<dyn ChatProvider>) -> Self {
        let app = Application::build_with_provider(test_config(LlmConfig::default()), provider)
            .await
            .expect("Failed to build test application");
        Self::run(app).await
    }

    async fn run(app: Application) -> Self {
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        TestApp { address, port }
    }

    pub async fn post_recommend(&self, body: &serde_json::Value) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/recommend", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

pub fn upstream_llm_config(upstream: &MockServer) -> LlmConfig {
    LlmConfig {
        api_url: format!("{}{}", upstream.uri(), COMPLETIONS_PATH),
        api_key: Some(Secret::new(TEST_API_KEY.to_string())),
        timeout: Duration::from_secs(5),
        ..LlmConfig::default()
    }
}

fn test_config(llm: LlmConfig) -> RecommendationConfig {
    RecommendationConfig {
        common: service_core::config::Config {
            port: 0, // Random port
            log_level: "debug".to_string(),
            otlp_endpoint: None,
        },
        llm,
    }
}
