use std::time::Duration;

use crate::{
    error::AppResult,
    models::{AnimeRecord, Genre, GenreId},
    services::{pacing::Pacer, providers::AnimeProvider},
};

/// Applies the fixed pacing delay before every call to the wrapped provider
pub struct PacedProvider<P> {
    inner: P,
    pacer: Pacer,
}

impl<P: AnimeProvider> PacedProvider<P> {
    pub fn new(inner: P, delay: Duration) -> Self {
        Self {
            inner,
            pacer: Pacer::new(delay),
        }
    }
}

#[async_trait::async_trait]
impl<P: AnimeProvider> AnimeProvider for PacedProvider<P> {
    async fn search_anime(&self, query: &str, limit: u32) -> AppResult<Vec<AnimeRecord>> {
        self.pacer.wait().await;
        self.inner.search_anime(query, limit).await
    }

    async fn fetch_anime(&self, id: u32) -> AppResult<AnimeRecord> {
        self.pacer.wait().await;
        self.inner.fetch_anime(id).await
    }

    async fn anime_by_genre(&self, genre_id: GenreId, limit: u32) -> AppResult<Vec<AnimeRecord>> {
        self.pacer.wait().await;
        self.inner.anime_by_genre(genre_id, limit).await
    }

    async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        self.pacer.wait().await;
        self.inner.list_genres().await
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}
