use crate::dtos::{RecommendRequest, RecommendResponse};
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use service_core::error::AppError;

pub async fn recommend(
    State(state): State<AppState>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Json<RecommendResponse>, AppError> {
    let Json(payload) = payload?;

    tracing::info!(
        favorites = payload.favorite_menu.len(),
        todays = payload.todays_menu.len(),
        "Generating recommendation"
    );

    let response = state.recommendations.recommend(&payload).await?;
    Ok(Json(response))
}
