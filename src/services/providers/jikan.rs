/// Jikan v4 API provider (unofficial MyAnimeList API)
///
/// API Flow:
/// 1. Title Search: /anime?q={title} → ranked hits with MyAnimeList IDs
/// 2. Details: /anime/{id} → full record including genres
/// 3. Candidates: /anime?genres={genre_id}&order_by=score&sort=desc
/// 4. Genre catalogue: /genres/anime
///
/// Jikan is unauthenticated and rate limited; pacing is applied by wrapping this
/// provider in a `PacedProvider`.
use crate::{
    error::{AppError, AppResult},
    models::{AnimeRecord, Genre, GenreId, JikanAnime, JikanGenre, JikanResponse},
    services::providers::AnimeProvider,
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::time::Duration;

const USER_AGENT: &str = concat!("anime-recommender/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct JikanProvider {
    http_client: HttpClient,
    api_url: String,
}

impl JikanProvider {
    pub fn new(api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_url, endpoint)
    }

    /// GET an endpoint and unwrap the `data` envelope
    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> AppResult<T> {
        let url = self.url(endpoint);

        let response = self.http_client.get(&url).query(params).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Jikan API returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        Self::parse_envelope(&response_text)
    }

    fn parse_envelope<T: DeserializeOwned>(body: &str) -> AppResult<T> {
        serde_json::from_str::<JikanResponse<T>>(body)
            .map(|envelope| envelope.data)
            .map_err(|e| {
                tracing::error!(error = %e, response = %body, "Failed to deserialize Jikan response");
                AppError::ExternalApi(format!("Failed to parse Jikan response: {}", e))
            })
    }
}

#[async_trait::async_trait]
impl AnimeProvider for JikanProvider {
    async fn search_anime(&self, query: &str, limit: u32) -> AppResult<Vec<AnimeRecord>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let hits: Vec<JikanAnime> = self
            .get(
                "/anime",
                &[("q", query.to_string()), ("limit", limit.to_string())],
            )
            .await?;

        let records: Vec<AnimeRecord> = hits.into_iter().map(AnimeRecord::from).collect();

        tracing::info!(
            query = %query,
            results = records.len(),
            provider = self.name(),
            "Anime search completed"
        );

        Ok(records)
    }

    async fn fetch_anime(&self, id: u32) -> AppResult<AnimeRecord> {
        let anime: JikanAnime = self.get(&format!("/anime/{}", id), &[]).await?;
        let record = AnimeRecord::from(anime);

        tracing::info!(
            anime_id = id,
            title = %record.title,
            genres = record.genres.len(),
            provider = self.name(),
            "Anime details fetched"
        );

        Ok(record)
    }

    async fn anime_by_genre(&self, genre_id: GenreId, limit: u32) -> AppResult<Vec<AnimeRecord>> {
        let hits: Vec<JikanAnime> = self
            .get(
                "/anime",
                &[
                    ("genres", genre_id.to_string()),
                    ("order_by", "score".to_string()),
                    ("sort", "desc".to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;

        tracing::debug!(
            genre_id = %genre_id,
            results = hits.len(),
            provider = self.name(),
            "Genre listing fetched"
        );

        Ok(hits.into_iter().map(AnimeRecord::from).collect())
    }

    async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        let genres: Vec<JikanGenre> = self.get("/genres/anime", &[]).await?;

        tracing::info!(
            genres = genres.len(),
            provider = self.name(),
            "Genre catalogue fetched"
        );

        Ok(genres.into_iter().map(Genre::from).collect())
    }

    fn name(&self) -> &'static str {
        "jikan"
    }
}
