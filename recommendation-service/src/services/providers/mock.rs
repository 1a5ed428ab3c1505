//! Mock provider for testing.

use super::{ChatProvider, ProviderError};
use async_trait::async_trait;
use std::sync::Mutex;

enum Reply {
    Text(String),
    Transport(String),
    Malformed(String),
}

/// Canned-reply provider that remembers every prompt it was given.
pub struct MockChatProvider {
    reply: Reply,
    prompts: Mutex<Vec<String>>,
}

impl MockChatProvider {
    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with `reply`, trimmed like the real provider does.
    pub fn replying(reply: impl Into<String>) -> Self {
        Self::with_reply(Reply::Text(reply.into()))
    }

    /// Always fail with a transport error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_reply(Reply::Transport(message.into()))
    }

    /// Always fail as if the upstream body had no usable completion.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::with_reply(Reply::Malformed(message.into()))
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatProvider for MockChatProvider {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        match &self.reply {
            Reply::Text(text) => Ok(text.trim().to_string()),
            Reply::Transport(message) => Err(ProviderError::Transport(message.clone())),
            Reply::Malformed(message) => Err(ProviderError::InvalidResponse(message.clone())),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
