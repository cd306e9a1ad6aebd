use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::AnimeRecord,
    routes::AppState,
    services::{metadata, recommendations},
};

pub const MAX_LIMIT: usize = 25;

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub title: String,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub favorite: AnimeRecord,
    pub recommendations: Vec<String>,
}

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    if let Some(limit) = request.limit {
        if limit == 0 || limit > MAX_LIMIT {
            return Err(AppError::InvalidInput(format!(
                "limit must be between 1 and {}",
                MAX_LIMIT
            )));
        }
    }

    let title = request.title.trim();

    tracing::info!(
        request_id = %request_id,
        title = %title,
        limit = ?request.limit,
        "Processing recommendation request"
    );

    let provider = state.provider.as_ref();
    let favorite = metadata::resolve(provider, title, state.config.search_limit).await?;
    let titles = recommendations::recommend(
        provider,
        &favorite,
        &state.recommend_options(request.limit),
    )
    .await?;

    tracing::info!(
        request_id = %request_id,
        recommended = titles.len(),
        "Recommendation request completed"
    );

    Ok(Json(RecommendationResponse {
        favorite,
        recommendations: titles,
    }))
}
