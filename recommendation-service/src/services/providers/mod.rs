//! Chat-completion provider abstraction.
//!
//! The recommendation handler only sees `ChatProvider`, so the real
//! Open WebUI client and the test mock are interchangeable.

pub mod mock;
pub mod open_webui;

use async_trait::async_trait;
use thiserror::Error;

pub use mock::MockChatProvider;
pub use open_webui::OpenWebUiProvider;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Missing credentials. Raised before any network activity.
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    /// Network failure, timeout or non-2xx status.
    #[error("API request failed: {0}")]
    Transport(String),

    /// The upstream answered with a body we cannot read a completion from.
    #[error("Failed to parse API response: {0}")]
    InvalidResponse(String),
}

/// A single-turn chat-completion backend.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send `prompt` as one user message and return the trimmed reply text.
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Short name for logs and metrics labels.
    fn provider_name(&self) -> &'static str;
}
