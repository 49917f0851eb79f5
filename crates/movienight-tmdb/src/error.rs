use thiserror::Error;

/// Errors returned by the TMDB client.
#[derive(Debug, Error)]
pub enum TmdbError {
    /// Transport-level failure (connect, timeout, TLS, …).
    #[error("TMDB request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// TMDB answered with a non-success status.
    #[error("TMDB API error {status_code}: {message}")]
    Api { status_code: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("TMDB response decode error: {0}")]
    Json(#[from] serde_json::Error),
}
