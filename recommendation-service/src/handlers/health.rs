use crate::services::get_metrics;
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub const SERVICE_NAME: &str = "LLM Recommendation Service";

/// Liveness probe. Never touches the upstream.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({ "status": "healthy", "service": SERVICE_NAME })),
    )
}

pub async fn service_info() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "service": SERVICE_NAME,
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Generates personalized food recommendations using an LLM chat-completion API",
            "endpoints": {
                "health": "/health",
                "recommend": "/recommend",
                "metrics": "/metrics"
            }
        })),
    )
}

pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}
