//! Metrics collection for recommendation-service.
//!
//! Everything is recorded through the `metrics` facade; the Prometheus
//! recorder is installed once by the binary.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Later calls are no-ops.
pub fn init_metrics() {
    if METRICS_HANDLE.get().is_some() {
        return;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let _ = METRICS_HANDLE.set(handle);
        }
        Err(e) => tracing::warn!("Failed to install Prometheus recorder: {}", e),
    }
}

/// Get metrics output in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

pub fn record_recommendation(outcome: &'static str) {
    counter!("recommendations_total", "outcome" => outcome).increment(1);
}

pub fn record_upstream_latency(provider: &'static str, elapsed: Duration) {
    histogram!("recommendation_upstream_duration_seconds", "provider" => provider)
        .record(elapsed.as_secs_f64());
}

/// Run `scenario` on a current-thread runtime against a private Prometheus
/// recorder and return what it rendered.
#[cfg(test)]
pub(crate) fn capture<F>(scenario: F) -> String
where
    F: std::future::Future<Output = ()>,
{
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    metrics::with_local_recorder(&recorder, || runtime.block_on(scenario));
    handle.render()
}
