//! Raw TMDB wire shapes. Only the fields this bot reads.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResult {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct MovieDetails {
    pub id: i64,
    pub title: String,
    pub release_date: Option<String>,
    pub vote_average: f64,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub imdb_id: Option<String>,
}
