//! HTTP handlers for recommendation-service.

pub mod health;
pub mod recommend;

pub use health::{health_check, metrics_endpoint, service_info};
pub use recommend::recommend;
