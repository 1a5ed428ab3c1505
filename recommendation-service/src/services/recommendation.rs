//! Recommendation flow: validate, format, call upstream, wrap.

use super::metrics;
use super::prompt::PromptTemplate;
use super::providers::{ChatProvider, ProviderError};
use crate::dtos::{first_field_message, RecommendRequest, RecommendResponse};
use service_core::error::AppError;
use std::sync::Arc;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl From<ValidationErrors> for RecommendationError {
    fn from(errors: ValidationErrors) -> Self {
        RecommendationError::InvalidInput(first_field_message(&errors))
    }
}

impl From<RecommendationError> for AppError {
    fn from(err: RecommendationError) -> Self {
        match err {
            RecommendationError::InvalidInput(message) => {
                AppError::BadRequest(anyhow::anyhow!(message))
            }
            RecommendationError::Provider(e) => AppError::InternalError(anyhow::anyhow!(
                "Failed to generate recommendation: {}",
                e
            )),
        }
    }
}

#[derive(Clone)]
pub struct RecommendationService {
    provider: Arc<dyn ChatProvider>,
    template: PromptTemplate,
}

impl RecommendationService {
    pub fn new(provider: Arc<dyn ChatProvider>, template: PromptTemplate) -> Self {
        Self { provider, template }
    }

    pub async fn recommend(
        &self,
        request: &RecommendRequest,
    ) -> Result<RecommendResponse, RecommendationError> {
        if let Err(errors) = request.validate() {
            metrics::record_recommendation("invalid_input");
            return Err(errors.into());
        }

        let prompt = self
            .template
            .render(&request.favorite_menu, &request.todays_menu);

        let recommendation = match self.provider.complete(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(
                    provider = self.provider.provider_name(),
                    error = %e,
                    "Error generating recommendation"
                );
                metrics::record_recommendation(outcome_label(&e));
                return Err(e.into());
            }
        };

        if !request.todays_menu.iter().any(|dish| dish == &recommendation) {
            tracing::warn!(
                recommendation = %recommendation,
                "Recommendation does not name a dish from today's menu"
            );
        }

        metrics::record_recommendation("success");
        Ok(RecommendResponse { recommendation })
    }
}

fn outcome_label(err: &ProviderError) -> &'static str {
    match err {
        ProviderError::NotConfigured(_) => "not_configured",
        ProviderError::Transport(_) => "upstream_transport",
        ProviderError::InvalidResponse(_) => "upstream_format",
    }
}
