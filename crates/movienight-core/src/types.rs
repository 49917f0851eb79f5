use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable metadata snapshot for a single title.
///
/// Produced once by the TMDB lookup and never mutated afterwards. The
/// overview is pre-truncated to 200 characters (plus an ellipsis marker)
/// so downstream formatting never has to worry about message limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// TMDB numeric identifier.
    pub id: i64,
    pub title: String,
    /// Release year; 0 when TMDB has no release date.
    pub year: i32,
    /// Vote average rounded to one decimal (0.0–10.0).
    pub rating: f64,
    /// Synopsis, truncated to ≤200 chars with a trailing "..." when cut.
    pub overview: String,
    /// Full w500 poster URL, if TMDB has a poster.
    pub poster_url: Option<String>,
    /// IMDb detail-page URL, if TMDB knows the IMDb id.
    pub imdb_url: Option<String>,
}

/// A confirmed, active suggestion. At most one per user; a new confirmed
/// suggestion from the same user replaces the prior one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub movie: Movie,
    /// Display name of the suggesting user, as shown in poll intros.
    pub suggested_by: String,
    /// Stable platform identifier of the suggesting user (the store key).
    pub suggested_by_id: String,
    /// Creation instant; `get_all_suggestions` orders by this field.
    pub timestamp: DateTime<Utc>,
}

/// A provisional suggestion awaiting a "yes" confirmation.
///
/// Expires five minutes after creation and is lazily deleted on the next
/// read past that instant. Never persisted — a restart drops pending
/// state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingSuggestion {
    pub movie: Movie,
    pub user_id: String,
    pub user_name: String,
    pub expires_at: DateTime<Utc>,
}

/// A reply the command layer hands back to the channel adapter.
#[derive(Debug, Clone)]
pub struct CommandReply {
    pub text: String,
    /// When set, the adapter sends the image with `text` as its caption,
    /// falling back to a plain text message if the image send fails.
    pub image_url: Option<String>,
}

impl CommandReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image_url: None,
        }
    }
}

/// A fully built weekly poll, ready for the transport to send.
#[derive(Debug, Clone)]
pub struct PollContent {
    /// Message posted right before the poll, listing the candidates.
    pub intro: String,
    /// Poll question.
    pub question: String,
    /// One option per suggestion, in creation order.
    pub options: Vec<String>,
    /// How many options a voter may pick.
    pub selectable_count: u8,
}
