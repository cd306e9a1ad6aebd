use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::RequestId,
    models::{AnimeRecord, Genre},
    routes::AppState,
    services::metadata,
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: String,
}

/// Resolves a title to its canonical record
pub async fn search(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<AnimeRecord>> {
    let title = params.q.trim();

    tracing::info!(request_id = %request_id, query = %title, "Resolving anime");

    let record = metadata::resolve(state.provider.as_ref(), title, state.config.search_limit).await?;
    Ok(Json(record))
}

/// Lists the provider's genre catalogue
pub async fn genres(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Genre>>> {
    let genres = state.provider.list_genres().await?;
    Ok(Json(genres))
}
