//! Router-level tests with an injected mock provider; no upstream socket.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::TestApp;
use recommendation_service::config::{LlmConfig, RecommendationConfig};
use recommendation_service::services::providers::MockChatProvider;
use recommendation_service::services::{PromptTemplate, RecommendationService};
use recommendation_service::startup::{build_router, AppState};
use recommendation_service::Application;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

fn router(provider: Arc<MockChatProvider>) -> axum::Router {
    build_router(AppState {
        recommendations: RecommendationService::new(provider, PromptTemplate::default()),
    })
}

fn recommend_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/recommend")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn recommend_passes_reply_through() {
    let provider = Arc::new(MockChatProvider::replying("Veggie Curry\n"));
    let response = router(provider.clone())
        .oneshot(recommend_request(json!({
            "favorite_menu": ["Dal"],
            "todays_menu": ["Veggie Curry", "Schnitzel"]
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"recommendation": "Veggie Curry"}));
    assert_eq!(provider.prompts().len(), 1);
}

#[tokio::test]
async fn both_lists_empty_reports_favorites() {
    let provider = Arc::new(MockChatProvider::replying("unused"));
    let response = router(provider.clone())
        .oneshot(recommend_request(json!({"favorite_menu": [], "todays_menu": []})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({"detail": "favorite_menu cannot be empty"})
    );
    assert!(provider.prompts().is_empty());
}

#[tokio::test]
async fn missing_field_is_422_with_detail() {
    let provider = Arc::new(MockChatProvider::replying("unused"));
    let response = router(provider.clone())
        .oneshot(recommend_request(json!({"todays_menu": ["Soup"]})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("missing field `favorite_menu`"));
    assert!(provider.prompts().is_empty());
}

#[tokio::test]
async fn provider_failure_is_500_with_cause() {
    let provider = Arc::new(MockChatProvider::failing("connection refused"));
    let response = router(provider)
        .oneshot(recommend_request(json!({
            "favorite_menu": ["Dal"],
            "todays_menu": ["Veggie Curry"]
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({"detail": "Failed to generate recommendation: API request failed: connection refused"})
    );
}

#[tokio::test]
async fn health_does_not_consult_provider() {
    let provider = Arc::new(MockChatProvider::failing("down"));
    let response = router(provider.clone())
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(provider.prompts().is_empty());
}

#[tokio::test]
async fn unknown_route_is_404() {
    let provider = Arc::new(MockChatProvider::replying("unused"));
    let response = router(provider)
        .oneshot(Request::builder().uri("/docs").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn spawned_app_serves_injected_provider() {
    let provider = Arc::new(MockChatProvider::replying("Schnitzel"));
    let app = TestApp::spawn_with_provider(provider.clone()).await;

    let response = app
        .post_recommend(&json!({"favorite_menu": ["Wiener"], "todays_menu": ["Schnitzel"]}))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(provider.prompts().len(), 1);
}

#[tokio::test]
async fn invalid_custom_template_fails_startup() {
    let config = RecommendationConfig {
        common: service_core::config::Config {
            port: 0,
            log_level: "debug".to_string(),
            otlp_endpoint: None,
        },
        llm: LlmConfig {
            prompt_template: Some("No placeholders here".to_string()),
            ..LlmConfig::default()
        },
    };

    let result = Application::build(config).await;
    let err = result.err().expect("startup should fail");
    assert!(err.to_string().contains("RECOMMENDATION_PROMPT_TEMPLATE"));
}
