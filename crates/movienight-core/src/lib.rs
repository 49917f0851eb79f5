//! `movienight-core` — shared types, configuration, and the core error type.
//!
//! Everything the other crates agree on lives here: the `Movie` metadata
//! snapshot, the suggestion lifecycle entities, reply/poll shapes exchanged
//! between the command layer and the channel adapter, and the figment-based
//! config loader.

pub mod config;
pub mod error;
pub mod types;

pub use config::MovieNightConfig;
pub use error::{CoreError, Result};
pub use types::{CommandReply, Movie, PendingSuggestion, PollContent, Suggestion};
