use crate::{
    error::{AppError, AppResult},
    models::AnimeRecord,
    services::providers::AnimeProvider,
};

/// Resolves a free-text title to its canonical record
///
/// Two calls, in order: a search, then a detail lookup for the first hit's
/// id. Any pacing is the provider's concern. The caller is expected to have
/// trimmed `title`; an empty title is rejected before any outbound call.
pub async fn resolve(
    provider: &dyn AnimeProvider,
    title: &str,
    search_limit: u32,
) -> AppResult<AnimeRecord> {
    if title.is_empty() {
        return Err(AppError::InvalidInput(
            "Please enter an anime name.".to_string(),
        ));
    }

    let hits = provider.search_anime(title, search_limit).await?;

    let best = hits
        .into_iter()
        .next()
        .ok_or_else(|| AppError::NotFound(format!("No anime found for '{}'", title)))?;

    tracing::debug!(
        query = %title,
        anime_id = best.id,
        matched_title = %best.title,
        "Resolved search hit, fetching details"
    );

    provider.fetch_anime(best.id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Genre, GenreId};
    use crate::services::providers::{MockAnimeProvider, PacedProvider};
    use mockall::predicate::eq;
    use mockall::Sequence;
    use std::time::Duration;
    use tokio::time::Instant;
    use tokio_test::{assert_err, assert_ok};

    fn record(id: u32, title: &str, genres: &[(u32, &str)]) -> AnimeRecord {
        AnimeRecord {
            id,
            title: title.to_string(),
            score: Some(8.0),
            synopsis: String::new(),
            genres: genres
                .iter()
                .map(|(id, name)| Genre {
                    id: GenreId(*id),
                    name: name.to_string(),
                })
                .collect(),
            url: format!("https://myanimelist.net/anime/{}", id),
        }
    }

    #[tokio::test]
    async fn test_resolve_searches_then_fetches_details() {
        let mut mock = MockAnimeProvider::new();
        let mut seq = Sequence::new();

        mock.expect_search_anime()
            .with(eq("Naruto"), eq(10))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| {
                Ok(vec![
                    record(20, "Naruto", &[]),
                    record(1735, "Naruto: Shippuuden", &[]),
                ])
            });
        mock.expect_fetch_anime()
            .with(eq(20))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|id| Ok(record(id, "Naruto", &[(1, "Action"), (2, "Adventure")])));

        let resolved = assert_ok!(resolve(&mock, "Naruto", 10).await);
        assert_eq!(resolved.id, 20);
        assert_eq!(resolved.genres.len(), 2);
    }

    #[tokio::test]
    async fn test_zero_results_is_not_found() {
        let mut mock = MockAnimeProvider::new();
        mock.expect_search_anime().returning(|_, _| Ok(vec![]));
        mock.expect_fetch_anime().never();

        let result = resolve(&mock, "zzzzqqq", 10).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_empty_title_makes_no_calls() {
        let mut mock = MockAnimeProvider::new();
        mock.expect_search_anime().never();

        let result = resolve(&mock, "", 10).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_search_failure_propagates_as_api_error() {
        let mut mock = MockAnimeProvider::new();
        mock.expect_search_anime().returning(|_, _| {
            Err(AppError::ExternalApi(
                "Jikan API returned status 503 Service Unavailable".to_string(),
            ))
        });

        let err = assert_err!(resolve(&mock, "Bleach", 10).await);
        assert!(err.is_api_error());
    }

    #[tokio::test]
    async fn test_detail_failure_propagates() {
        let mut mock = MockAnimeProvider::new();
        mock.expect_search_anime()
            .returning(|_, _| Ok(vec![record(269, "Bleach", &[])]));
        mock.expect_fetch_anime()
            .returning(|_| Err(AppError::ExternalApi("timeout".to_string())));

        let err = assert_err!(resolve(&mock, "Bleach", 10).await);
        assert!(err.is_api_error());
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_resolves_respect_pacing_delay() {
        let mut mock = MockAnimeProvider::new();
        mock.expect_search_anime()
            .returning(|q, _| Ok(vec![record(1, q, &[(1, "Action")])]));
        mock.expect_fetch_anime()
            .returning(|id| Ok(record(id, "Cowboy Bebop", &[(1, "Action")])));

        let provider = PacedProvider::new(mock, Duration::from_secs(1));
        let start = Instant::now();

        assert_ok!(resolve(&provider, "Cowboy Bebop", 10).await);
        let first_done = start.elapsed();
        assert_ok!(resolve(&provider, "Cowboy Bebop", 10).await);

        // search + detail per resolve, each paced one second after the last
        assert!(first_done >= Duration::from_secs(1));
        assert!(start.elapsed() >= Duration::from_secs(3));
    }
}
