use reqwest::Client;
use tracing::debug;

use movienight_core::Movie;

use crate::error::TmdbError;
use crate::models::{MovieDetails, SearchResponse};
use crate::Result;

const BASE_URL: &str = "https://api.themoviedb.org/3";
const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
const OVERVIEW_MAX_CHARS: usize = 200;

pub struct TmdbClient {
    client: Client,
    api_key: String,
}

impl TmdbClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Search for a movie by title and return the best match, fully
    /// populated from the detail endpoint. `Ok(None)` when nothing
    /// matched.
    pub async fn search(&self, query: &str) -> Result<Option<Movie>> {
        let response = self
            .client
            .get(self.url("/search/movie"))
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", query),
                ("include_adult", "false"),
                ("language", "en-US"),
            ])
            .send()
            .await?;
        let search: SearchResponse = self.handle_response(response).await?;

        let Some(best) = search.results.into_iter().next() else {
            debug!(query, "TMDB search returned no results");
            return Ok(None);
        };
        debug!(query, id = best.id, title = %best.title, "TMDB best match");

        let details = self.get_details(best.id).await?;
        Ok(Some(build_movie(details)))
    }

    /// GET /movie/{id} — carries the imdb_id the search endpoint lacks.
    async fn get_details(&self, movie_id: i64) -> Result<MovieDetails> {
        let response = self
            .client
            .get(self.url(&format!("/movie/{movie_id}")))
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", "en-US"),
            ])
            .send()
            .await?;
        self.handle_response(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{BASE_URL}{path}")
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(TmdbError::Api {
                status_code: status.as_u16(),
                message: body,
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

/// Build the immutable `Movie` snapshot from the TMDB detail record.
fn build_movie(details: MovieDetails) -> Movie {
    let year = details
        .release_date
        .as_deref()
        .and_then(|d| d.split('-').next())
        .and_then(|y| y.parse::<i32>().ok())
        .unwrap_or(0);

    Movie {
        id: details.id,
        title: details.title,
        year,
        rating: (details.vote_average * 10.0).round() / 10.0,
        overview: truncate_overview(&details.overview),
        poster_url: details
            .poster_path
            .map(|p| format!("{IMAGE_BASE_URL}{p}")),
        imdb_url: details
            .imdb_id
            .filter(|id| !id.is_empty())
            .map(|id| format!("https://www.imdb.com/title/{id}/")),
    }
}

/// Cut the overview at 200 characters, marking the cut with an ellipsis.
fn truncate_overview(overview: &str) -> String {
    if overview.chars().count() <= OVERVIEW_MAX_CHARS {
        return overview.to_string();
    }
    let cut: String = overview.chars().take(OVERVIEW_MAX_CHARS).collect();
    format!("{}...", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> MovieDetails {
        MovieDetails {
            id: 27205,
            title: "Inception".to_string(),
            release_date: Some("2010-07-15".to_string()),
            vote_average: 8.369,
            overview: "Cobb, a skilled thief.".to_string(),
            poster_path: Some("/poster.jpg".to_string()),
            imdb_id: Some("tt1375666".to_string()),
        }
    }

    #[test]
    fn builds_full_movie() {
        let movie = build_movie(details());
        assert_eq!(movie.id, 27205);
        assert_eq!(movie.year, 2010);
        assert_eq!(movie.rating, 8.4);
        assert_eq!(
            movie.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/poster.jpg")
        );
        assert_eq!(
            movie.imdb_url.as_deref(),
            Some("https://www.imdb.com/title/tt1375666/")
        );
    }

    #[test]
    fn missing_release_date_gives_year_zero() {
        let movie = build_movie(MovieDetails {
            release_date: None,
            ..details()
        });
        assert_eq!(movie.year, 0);
    }

    #[test]
    fn missing_poster_and_imdb_are_none() {
        let movie = build_movie(MovieDetails {
            poster_path: None,
            imdb_id: None,
            ..details()
        });
        assert!(movie.poster_url.is_none());
        assert!(movie.imdb_url.is_none());
    }

    #[test]
    fn short_overview_untouched() {
        assert_eq!(truncate_overview("Short."), "Short.");
    }

    #[test]
    fn long_overview_cut_at_200_with_ellipsis() {
        let long = "a".repeat(250);
        let truncated = truncate_overview(&long);
        assert_eq!(truncated.chars().count(), 203);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn truncation_is_char_safe() {
        let long = "ü".repeat(250);
        let truncated = truncate_overview(&long);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);
    }
}
