use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt::Display};

/// Stable external genre key (Jikan `mal_id`)
///
/// Genres are matched across titles by this identifier, never by display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenreId(pub u32);

impl Display for GenreId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

/// Set of genre identifiers used as scoring input
pub type GenreSet = BTreeSet<GenreId>;

/// Canonical anime metadata, alive for a single request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimeRecord {
    pub id: u32,
    pub title: String,
    pub score: Option<f64>,
    pub synopsis: String,
    pub genres: Vec<Genre>,
    pub url: String,
}

impl AnimeRecord {
    pub fn genre_set(&self) -> GenreSet {
        self.genres.iter().map(|g| g.id).collect()
    }

    pub fn genre_names(&self) -> Vec<&str> {
        self.genres.iter().map(|g| g.name.as_str()).collect()
    }
}

// ============================================================================
// Jikan API Types
// ============================================================================

/// Envelope used by every Jikan v4 endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct JikanResponse<T> {
    pub data: T,
}

/// Anime entry as returned by `/anime` and `/anime/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct JikanAnime {
    pub mal_id: u32,
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub genres: Vec<JikanGenre>,
}

/// Genre reference embedded in an anime entry, or an item of `/genres/anime`
#[derive(Debug, Clone, Deserialize)]
pub struct JikanGenre {
    pub mal_id: u32,
    pub name: String,
}

impl From<JikanGenre> for Genre {
    fn from(genre: JikanGenre) -> Self {
        Genre {
            id: GenreId(genre.mal_id),
            name: genre.name,
        }
    }
}

impl From<JikanAnime> for AnimeRecord {
    fn from(anime: JikanAnime) -> Self {
        AnimeRecord {
            id: anime.mal_id,
            title: anime.title,
            score: anime.score,
            synopsis: anime.synopsis.unwrap_or_default(),
            genres: anime.genres.into_iter().map(Genre::from).collect(),
            url: anime.url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_id_display() {
        assert_eq!(format!("{}", GenreId(22)), "22");
    }

    #[test]
    fn test_genre_id_serializes_transparently() {
        let json = serde_json::to_string(&GenreId(4)).unwrap();
        assert_eq!(json, "4");
    }

    #[test]
    fn test_jikan_anime_deserialization() {
        let json = r#"{
            "mal_id": 5114,
            "url": "https://myanimelist.net/anime/5114/Fullmetal_Alchemist__Brotherhood",
            "title": "Fullmetal Alchemist: Brotherhood",
            "score": 9.1,
            "synopsis": "After a horrific alchemy experiment goes wrong...",
            "genres": [
                {"mal_id": 1, "type": "anime", "name": "Action", "url": "https://myanimelist.net/anime/genre/1/Action"},
                {"mal_id": 2, "type": "anime", "name": "Adventure", "url": "https://myanimelist.net/anime/genre/2/Adventure"}
            ],
            "episodes": 64
        }"#;

        let anime: JikanAnime = serde_json::from_str(json).unwrap();
        assert_eq!(anime.mal_id, 5114);
        assert_eq!(anime.score, Some(9.1));
        assert_eq!(anime.genres.len(), 2);
        assert_eq!(anime.genres[1].name, "Adventure");
    }

    #[test]
    fn test_jikan_anime_with_null_fields() {
        let json = r#"{
            "mal_id": 60000,
            "url": "https://myanimelist.net/anime/60000",
            "title": "Upcoming Show",
            "score": null,
            "synopsis": null
        }"#;

        let record: AnimeRecord = serde_json::from_str::<JikanAnime>(json).unwrap().into();
        assert_eq!(record.score, None);
        assert_eq!(record.synopsis, "");
        assert!(record.genres.is_empty());
    }

    #[test]
    fn test_jikan_anime_to_record_keeps_genre_order() {
        let anime = JikanAnime {
            mal_id: 1,
            url: "https://myanimelist.net/anime/1".to_string(),
            title: "Cowboy Bebop".to_string(),
            score: Some(8.75),
            synopsis: Some("Crime is timeless.".to_string()),
            genres: vec![
                JikanGenre { mal_id: 24, name: "Sci-Fi".to_string() },
                JikanGenre { mal_id: 1, name: "Action".to_string() },
            ],
        };

        let record: AnimeRecord = anime.into();
        assert_eq!(record.genre_names(), vec!["Sci-Fi", "Action"]);
        assert_eq!(
            record.genre_set().into_iter().collect::<Vec<_>>(),
            vec![GenreId(1), GenreId(24)]
        );
    }

    #[test]
    fn test_envelope_deserialization() {
        let json = r#"{"pagination": {"has_next_page": false}, "data": []}"#;
        let response: JikanResponse<Vec<JikanAnime>> = serde_json::from_str(json).unwrap();
        assert!(response.data.is_empty());
    }
}
