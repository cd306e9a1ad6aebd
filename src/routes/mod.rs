use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::{
    config::Config,
    middleware::{make_span_with_request_id, request_id_middleware},
    services::{providers::AnimeProvider, recommendations::RecommendOptions},
};

pub mod anime;
pub mod page;
pub mod recommendations;

/// Shared, read-only application state
pub struct AppState {
    pub provider: Arc<dyn AnimeProvider>,
    pub config: Config,
}

impl AppState {
    pub fn new(provider: Arc<dyn AnimeProvider>, config: Config) -> Self {
        Self { provider, config }
    }

    /// Recommendation options from config, with an optional per-request limit
    pub fn recommend_options(&self, limit: Option<usize>) -> RecommendOptions {
        RecommendOptions {
            limit: limit.unwrap_or(self.config.recommendation_limit),
            max_genre_queries: self.config.max_genre_queries,
            candidates_per_genre: self.config.candidates_per_genre,
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(page::index))
        .route("/recommend", post(page::recommend))
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/anime/search", get(anime::search))
        .route("/genres", get(anime::genres))
        .route("/recommendations", post(recommendations::recommend))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
