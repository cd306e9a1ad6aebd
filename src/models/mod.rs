mod anime;

pub use anime::{AnimeRecord, Genre, GenreId, GenreSet, JikanAnime, JikanGenre, JikanResponse};
