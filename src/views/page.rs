use crate::models::AnimeRecord;

/// Characters of synopsis shown before the "read more" link
pub const SYNOPSIS_PREVIEW_CHARS: usize = 250;

pub const WELCOME_MESSAGE: &str = "Enter an anime you enjoy to get recommendations!";

/// Everything the recommendation page can show
#[derive(Debug, Default, Clone)]
pub struct PageView {
    pub query: String,
    pub message: Option<String>,
    pub favorite: Option<AnimeRecord>,
    pub recommendations: Vec<String>,
}

impl PageView {
    pub fn welcome() -> Self {
        Self {
            message: Some(WELCOME_MESSAGE.to_string()),
            ..Self::default()
        }
    }

    pub fn with_message(query: &str, message: impl Into<String>) -> Self {
        Self {
            query: query.to_string(),
            message: Some(message.into()),
            ..Self::default()
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Cuts on a char boundary; an ellipsis marks the cut
pub fn synopsis_preview(synopsis: &str) -> String {
    let mut chars = synopsis.chars();
    let preview: String = chars.by_ref().take(SYNOPSIS_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", preview)
    } else {
        preview
    }
}

fn render_favorite(anime: &AnimeRecord) -> String {
    let score = anime
        .score
        .map(|s| format!("{:.2}", s))
        .unwrap_or_else(|| "N/A".to_string());

    let genres: String = anime
        .genre_names()
        .iter()
        .map(|name| format!(r#"<span class="genre">{}</span>"#, escape_html(name)))
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        r#"<section class="favorite">
  <h2>Your Anime: {title}</h2>
  <p><strong>Score:</strong> {score}</p>
  <p><strong>Genres:</strong> {genres}</p>
  <p><strong>Synopsis:</strong> {synopsis} <a href="{url}" target="_blank" rel="noopener">Read more on MyAnimeList</a></p>
</section>
"#,
        title = escape_html(&anime.title),
        score = score,
        genres = genres,
        synopsis = escape_html(&synopsis_preview(&anime.synopsis)),
        url = escape_html(&anime.url),
    )
}

fn render_recommendations(titles: &[String]) -> String {
    let items: String = titles
        .iter()
        .map(|title| format!("    <li>{}</li>\n", escape_html(title)))
        .collect();

    format!(
        "<section class=\"recommendations\">\n  <h2>Recommended for You:</h2>\n  <ul>\n{}  </ul>\n</section>\n",
        items
    )
}

/// Renders the whole page
pub fn render(view: &PageView) -> String {
    let mut body = String::new();

    if let Some(message) = &view.message {
        body.push_str(&format!(
            "<p class=\"message\">{}</p>\n",
            escape_html(message)
        ));
    }
    if let Some(favorite) = &view.favorite {
        body.push_str(&render_favorite(favorite));
    }
    if !view.recommendations.is_empty() {
        body.push_str(&render_recommendations(&view.recommendations));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Anime Recommender</title>
</head>
<body>
  <h1>Anime Recommender</h1>
  <form action="/recommend" method="post">
    <label for="anime_name">Your favorite anime:</label>
    <input type="text" id="anime_name" name="anime_name" value="{query}" placeholder="e.g., Attack on Titan" required>
    <button type="submit">Find My Next Anime!</button>
  </form>
{body}</body>
</html>
"#,
        query = escape_html(&view.query),
        body = body,
    )
}
