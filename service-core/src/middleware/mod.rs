//! Axum middleware shared across services.

pub mod metrics;
pub mod tracing;
