use std::{cmp::Ordering, collections::HashSet};

use serde::Serialize;

use crate::{
    error::{AppError, AppResult},
    models::AnimeRecord,
    services::providers::AnimeProvider,
};

/// Knobs for one recommendation request
#[derive(Debug, Clone, Copy)]
pub struct RecommendOptions {
    /// Maximum number of titles returned
    pub limit: usize,
    /// Only the first N genres of the favorite are queried
    pub max_genre_queries: usize,
    /// Titles requested per genre query
    pub candidates_per_genre: u32,
}

impl Default for RecommendOptions {
    fn default() -> Self {
        Self {
            limit: 5,
            max_genre_queries: 7,
            candidates_per_genre: 25,
        }
    }
}

/// Titles considered for recommendation, assembled per request
///
/// Deduplicated by external id on insertion. The source title (exact title
/// match, or the same external id) never enters the pool.
#[derive(Debug)]
pub struct CandidatePool {
    source_id: u32,
    source_title: String,
    seen: HashSet<u32>,
    candidates: Vec<AnimeRecord>,
}

impl CandidatePool {
    pub fn for_source(source: &AnimeRecord) -> Self {
        Self {
            source_id: source.id,
            source_title: source.title.clone(),
            seen: HashSet::new(),
            candidates: Vec::new(),
        }
    }

    /// Adds a candidate, returning whether it was accepted
    pub fn insert(&mut self, candidate: AnimeRecord) -> bool {
        if candidate.id == self.source_id || candidate.title == self.source_title {
            return false;
        }
        if !self.seen.insert(candidate.id) {
            return false;
        }
        self.candidates.push(candidate);
        true
    }

    pub fn extend(&mut self, candidates: impl IntoIterator<Item = AnimeRecord>) {
        for candidate in candidates {
            self.insert(candidate);
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn as_slice(&self) -> &[AnimeRecord] {
        &self.candidates
    }
}

/// A candidate after scoring against the favorite
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub title: String,
    pub shared_genres: usize,
    pub score: Option<f64>,
    pub url: String,
}

/// Number of genre identifiers the two records have in common
pub fn shared_genres(a: &AnimeRecord, b: &AnimeRecord) -> usize {
    a.genre_set().intersection(&b.genre_set()).count()
}

/// Higher external score first; unscored titles last
fn compare_popularity(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Scores and orders candidates against `source`
///
/// Candidates sharing no genre, and any candidate titled exactly like the
/// source, are dropped. Order: shared genre count descending, then external
/// score descending with unscored last, then pool order. Titles are
/// unique in the output; the first (best ranked) occurrence wins.
pub fn rank_candidates(source: &AnimeRecord, candidates: &[AnimeRecord]) -> Vec<ScoredCandidate> {
    let source_genres = source.genre_set();

    let mut scored: Vec<ScoredCandidate> = candidates
        .iter()
        .filter(|candidate| candidate.title != source.title)
        .filter_map(|candidate| {
            let overlap = candidate.genre_set().intersection(&source_genres).count();
            (overlap > 0).then(|| ScoredCandidate {
                title: candidate.title.clone(),
                shared_genres: overlap,
                score: candidate.score,
                url: candidate.url.clone(),
            })
        })
        .collect();

    // stable sort keeps pool order for full ties
    scored.sort_by(|a, b| {
        b.shared_genres
            .cmp(&a.shared_genres)
            .then_with(|| compare_popularity(a.score, b.score))
    });

    let mut titles = HashSet::new();
    scored.retain(|candidate| titles.insert(candidate.title.clone()));
    scored
}

/// Top `limit` recommended titles for `source`, from an already built pool
pub fn top_titles(source: &AnimeRecord, candidates: &[AnimeRecord], limit: usize) -> Vec<String> {
    rank_candidates(source, candidates)
        .into_iter()
        .take(limit)
        .map(|candidate| candidate.title)
        .collect()
}

/// Queries one genre listing per favorite genre and unions the results
///
/// A failed genre query is logged and skipped. The pool is only an error when
/// every query failed.
pub async fn build_candidate_pool(
    provider: &dyn AnimeProvider,
    source: &AnimeRecord,
    options: &RecommendOptions,
) -> AppResult<CandidatePool> {
    let mut pool = CandidatePool::for_source(source);

    let genres: Vec<_> = source
        .genres
        .iter()
        .take(options.max_genre_queries)
        .collect();

    let mut failures = 0;

    for genre in &genres {
        match provider
            .anime_by_genre(genre.id, options.candidates_per_genre)
            .await
        {
            Ok(hits) => {
                let before = pool.len();
                pool.extend(hits);
                tracing::debug!(
                    genre_id = %genre.id,
                    genre = %genre.name,
                    added = pool.len() - before,
                    "Merged genre listing into candidate pool"
                );
            }
            Err(e) => {
                failures += 1;
                tracing::error!(
                    error = %e,
                    genre_id = %genre.id,
                    genre = %genre.name,
                    "Genre listing failed"
                );
            }
        }
    }

    if failures > 0 {
        tracing::warn!(
            success_count = genres.len() - failures,
            error_count = failures,
            "Partial candidate pool"
        );
    }

    if !genres.is_empty() && failures == genres.len() {
        return Err(AppError::ExternalApi(
            "Failed to fetch any genre listings".to_string(),
        ));
    }

    Ok(pool)
}

/// Recommends titles sharing genres with `source`
///
/// An empty result is a valid outcome (no genres, nothing left after
/// exclusion, or nothing shares a genre) and the caller renders it as such.
pub async fn recommend(
    provider: &dyn AnimeProvider,
    source: &AnimeRecord,
    options: &RecommendOptions,
) -> AppResult<Vec<String>> {
    if options.limit == 0 || source.genres.is_empty() {
        return Ok(vec![]);
    }

    let pool = build_candidate_pool(provider, source, options).await?;
    let titles = top_titles(source, pool.as_slice(), options.limit);

    tracing::info!(
        title = %source.title,
        pool_size = pool.len(),
        recommended = titles.len(),
        "Recommendations computed"
    );

    Ok(titles)
}
