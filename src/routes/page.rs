use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    Extension, Form,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::AppError,
    middleware::RequestId,
    routes::AppState,
    services::{metadata, recommendations},
    views::{self, PageView},
};

#[derive(Debug, Deserialize)]
pub struct RecommendForm {
    #[serde(default)]
    pub anime_name: String,
}

const SERVICE_UNAVAILABLE_MESSAGE: &str =
    "The anime database could not be reached right now. Please try again in a moment.";

/// Landing page with the search form
pub async fn index() -> Html<String> {
    Html(views::render(&PageView::welcome()))
}

/// Form submission: resolve the favorite, recommend, render
///
/// Every failure ends up as a message on the page; nothing here is fatal.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Form(form): Form<RecommendForm>,
) -> (StatusCode, Html<String>) {
    let (status, view) = build_view(&state, &request_id, form.anime_name.trim()).await;
    (status, Html(views::render(&view)))
}

async fn build_view(state: &AppState, request_id: &RequestId, name: &str) -> (StatusCode, PageView) {
    if name.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            PageView::with_message(name, "Please enter an anime name."),
        );
    }

    let provider = state.provider.as_ref();

    let favorite = match metadata::resolve(provider, name, state.config.search_limit).await {
        Ok(record) => record,
        Err(AppError::NotFound(_)) => {
            tracing::info!(request_id = %request_id, query = %name, "No anime matched");
            return (
                StatusCode::NOT_FOUND,
                PageView::with_message(
                    name,
                    format!(
                        "Could not find details for '{}'. Please try another name.",
                        name
                    ),
                ),
            );
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, query = %name, "Failed to resolve anime");
            return (
                e.status_code(),
                PageView::with_message(name, SERVICE_UNAVAILABLE_MESSAGE),
            );
        }
    };

    let mut view = PageView {
        query: name.to_string(),
        ..PageView::default()
    };

    if favorite.genres.is_empty() {
        view.message = Some(
            "Could not find genres for your chosen anime, so no recommendations can be made."
                .to_string(),
        );
        view.favorite = Some(favorite);
        return (StatusCode::OK, view);
    }

    let status = match recommendations::recommend(provider, &favorite, &state.recommend_options(None)).await {
        Ok(titles) if titles.is_empty() => {
            view.message = Some(
                "Could not find suitable recommendations based on your anime's genres."
                    .to_string(),
            );
            StatusCode::OK
        }
        Ok(titles) => {
            view.recommendations = titles;
            StatusCode::OK
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, title = %favorite.title, "Failed to build recommendations");
            view.message = Some(SERVICE_UNAVAILABLE_MESSAGE.to_string());
            e.status_code()
        }
    };

    view.favorite = Some(favorite);
    (status, view)
}
