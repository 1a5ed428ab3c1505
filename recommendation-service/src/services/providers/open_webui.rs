//! Open WebUI chat-completion provider.
//!
//! Speaks the OpenAI-style `/api/chat/completions` contract: one POST with a
//! `messages` array, reply text read from `choices[0].message.content`.

use super::{ChatProvider, ProviderError};
use crate::config::LlmConfig;
use crate::services::metrics;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use service_core::observability::TracedRequestExt;
use std::time::Instant;

/// Open WebUI provider.
#[derive(Clone)]
pub struct OpenWebUiProvider {
    config: LlmConfig,
    client: Client,
}

impl OpenWebUiProvider {
    /// Build the provider and its pooled HTTP client.
    pub fn new(config: LlmConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// POST the completion request and read the whole body as text.
    async fn post_completion(
        &self,
        api_key: &str,
        request: &ChatCompletionRequest<'_>,
    ) -> Result<(StatusCode, String), ProviderError> {
        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(request)
            .with_trace_context()
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        Ok((status, body))
    }

    fn api_key(&self) -> Result<&str, ProviderError> {
        match self.config.api_key.as_ref().map(|k| k.expose_secret()) {
            Some(key) if !key.is_empty() => Ok(key.as_str()),
            _ => Err(ProviderError::NotConfigured(
                "CHAIR_API_KEY environment variable is required".to_string(),
            )),
        }
    }
}

#[async_trait]
impl ChatProvider for OpenWebUiProvider {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let api_key = self.api_key()?;

        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Sending request to chat-completion API"
        );

        let started = Instant::now();
        let sent = self.post_completion(api_key, &request).await;
        metrics::record_upstream_latency(self.provider_name(), started.elapsed());
        let (status, body) = sent?;

        tracing::debug!(
            status = %status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Chat-completion API responded"
        );

        if !status.is_success() {
            return Err(ProviderError::Transport(format!(
                "{} from {}: {}",
                status, self.config.api_url, body
            )));
        }

        parse_completion(&body)
    }

    fn provider_name(&self) -> &'static str {
        "open_webui"
    }
}

/// Pull the first choice's content out of a response body and trim it.
fn parse_completion(body: &str) -> Result<String, ProviderError> {
    let response: ChatCompletionResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content.trim().to_string())
        .ok_or_else(|| {
            ProviderError::InvalidResponse("Unexpected response format from API".to_string())
        })
}

// ============================================================================
// Chat-completion API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}
