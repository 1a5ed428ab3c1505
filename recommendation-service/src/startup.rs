//! Application startup and lifecycle management.

use crate::config::RecommendationConfig;
use crate::handlers;
use crate::services::providers::{ChatProvider, OpenWebUiProvider};
use crate::services::{PromptTemplate, RecommendationService};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    tracing::{make_request_span, request_id_middleware},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub recommendations: RecommendationService,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::service_info))
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route("/recommend", post(handlers::recommend))
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<axum::body::Body>))
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the Open WebUI provider from `config`.
    pub async fn build(config: RecommendationConfig) -> Result<Self, AppError> {
        let provider = OpenWebUiProvider::new(config.llm.clone())
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;

        if config.llm.has_api_key() {
            tracing::info!(
                model = %config.llm.model,
                api_url = %config.llm.api_url,
                "Initialized chat-completion provider"
            );
        } else {
            tracing::warn!("CHAIR_API_KEY not set - recommendation requests will fail");
        }

        Self::build_with_provider(config, Arc::new(provider)).await
    }

    /// Build the application around an explicit provider.
    pub async fn build_with_provider(
        config: RecommendationConfig,
        provider: Arc<dyn ChatProvider>,
    ) -> Result<Self, AppError> {
        let template = match &config.llm.prompt_template {
            Some(text) => PromptTemplate::parse(text).map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("RECOMMENDATION_PROMPT_TEMPLATE: {}", e))
            })?,
            None => PromptTemplate::default(),
        };

        let state = AppState {
            recommendations: RecommendationService::new(provider, template),
        };

        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until SIGINT/SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        tracing::info!("Recommendation service listening on port {}", self.port);

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
