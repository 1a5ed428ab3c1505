use recommendation_service::config::RecommendationConfig;
use recommendation_service::services::init_metrics;
use recommendation_service::Application;
use service_core::observability::{init_tracing, shutdown_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = RecommendationConfig::load()?;

    init_tracing(
        "recommendation-service",
        &config.common.log_level,
        config.common.otlp_endpoint.as_deref(),
    );
    init_metrics();

    let application = Application::build(config).await?;
    let result = application.run_until_stopped().await;

    shutdown_tracing();
    result?;

    Ok(())
}
