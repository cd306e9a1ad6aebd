use std::sync::Arc;

use anime_recommender::{
    config::Config,
    routes::{create_router, AppState},
    services::providers::{JikanProvider, PacedProvider},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "anime_recommender=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let jikan = JikanProvider::new(config.jikan_api_url.clone(), config.http_timeout())?;
    let provider = PacedProvider::new(jikan, config.pacing_delay());

    tracing::info!(
        api_url = %config.jikan_api_url,
        pacing_ms = config.pacing_ms,
        "Anime provider configured"
    );

    let address = config.bind_address();
    let state = Arc::new(AppState::new(Arc::new(provider), config));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
