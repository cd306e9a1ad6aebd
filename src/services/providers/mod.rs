/// Anime metadata provider abstraction
///
/// All outbound calls to the anime metadata API live behind `AnimeProvider`, so
/// services stay testable without network access. `JikanProvider` talks to the
/// real API; `PacedProvider` wraps any provider with the fixed pacing policy.
use crate::{
    error::AppResult,
    models::{AnimeRecord, Genre, GenreId},
};

pub mod jikan;
pub mod paced;

pub use jikan::JikanProvider;
pub use paced::PacedProvider;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait AnimeProvider: Send + Sync {
    /// Search titles by free text, best match first
    async fn search_anime(&self, query: &str, limit: u32) -> AppResult<Vec<AnimeRecord>>;

    /// Fetch the full record for an external id
    async fn fetch_anime(&self, id: u32) -> AppResult<AnimeRecord>;

    /// List titles tagged with a genre, highest rated first
    async fn anime_by_genre(&self, genre_id: GenreId, limit: u32) -> AppResult<Vec<AnimeRecord>>;

    /// Genre catalogue known to the provider
    async fn list_genres(&self) -> AppResult<Vec<Genre>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
