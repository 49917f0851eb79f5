use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, error, instrument};

use movienight_core::config::PENDING_TTL_SECS;
use movienight_core::{Movie, PendingSuggestion, Suggestion};

use crate::error::{Result, StoreError};
use crate::snapshot::Snapshot;

/// A confirmed suggestion plus its arrival sequence number.
///
/// Timestamps are the primary sort key for `get_all_suggestions`; the
/// sequence breaks ties by arrival order even though the entries live in
/// an unordered map.
struct Entry {
    seq: u64,
    suggestion: Suggestion,
}

#[derive(Default)]
struct StoreState {
    suggestions: HashMap<String, Entry>,
    pending: HashMap<String, PendingSuggestion>,
    locked: bool,
    next_seq: u64,
}

/// Thread-safe suggestion store shared via `Arc` across the command
/// handlers, the scheduler, and the HTTP surface.
///
/// All mutations run to completion under one `Mutex`, so no two store
/// operations ever interleave; the lock flag is the only gate the
/// suggestion lifecycle needs beyond that.
pub struct SuggestionStore {
    state: Mutex<StoreState>,
    /// When set, confirmed suggestions and the lock flag are rewritten to
    /// this snapshot file on every persisted mutation.
    snapshot_path: Option<PathBuf>,
}

impl SuggestionStore {
    /// Ephemeral store with no durability. Used in tests and available
    /// for deployments that accept losing state on restart.
    pub fn in_memory() -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            snapshot_path: None,
        }
    }

    /// Durable store backed by the JSON snapshot at `path`.
    ///
    /// A missing or corrupt snapshot starts the store empty; that is
    /// logged by the snapshot loader and is not an error.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut state = StoreState::default();

        if let Some(snapshot) = Snapshot::load(&path) {
            state.locked = snapshot.locked;
            // The snapshot is written in creation order, so positional
            // sequence numbers reproduce the original tie-breaking.
            for (seq, (user_id, suggestion)) in snapshot.suggestions.into_iter().enumerate() {
                state.suggestions.insert(
                    user_id,
                    Entry {
                        seq: seq as u64,
                        suggestion,
                    },
                );
            }
            state.next_seq = state.suggestions.len() as u64;
        }

        Self {
            state: Mutex::new(state),
            snapshot_path: Some(path),
        }
    }

    /// Insert or replace the confirmed suggestion for `user_id` and drop
    /// any pending entry for that user. Fails while the store is locked.
    #[instrument(skip(self, movie), fields(user_id, title = %movie.title))]
    pub fn add_suggestion(&self, movie: Movie, user_id: &str, user_name: &str) -> Result<()> {
        self.insert_suggestion_at(movie, user_id, user_name, Utc::now())
    }

    fn insert_suggestion_at(
        &self,
        movie: Movie,
        user_id: &str,
        user_name: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.locked {
            return Err(StoreError::Locked);
        }

        let seq = state.next_seq;
        state.next_seq += 1;
        state.suggestions.insert(
            user_id.to_string(),
            Entry {
                seq,
                suggestion: Suggestion {
                    movie,
                    suggested_by: user_name.to_string(),
                    suggested_by_id: user_id.to_string(),
                    timestamp,
                },
            },
        );
        state.pending.remove(user_id);

        self.save(&state);
        Ok(())
    }

    /// Insert or replace the pending suggestion for `user_id`, expiring
    /// five minutes from now. Fails while the store is locked. Pending
    /// state is never persisted.
    #[instrument(skip(self, movie), fields(user_id, title = %movie.title))]
    pub fn set_pending_suggestion(&self, movie: Movie, user_id: &str, user_name: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.locked {
            return Err(StoreError::Locked);
        }

        let expires_at = Utc::now() + Duration::seconds(PENDING_TTL_SECS);
        state.pending.insert(
            user_id.to_string(),
            PendingSuggestion {
                movie,
                user_id: user_id.to_string(),
                user_name: user_name.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    /// Return the live pending suggestion for `user_id`, if any.
    ///
    /// An entry whose expiry has passed is deleted here, on read — there
    /// is no background sweep. Garbage is bounded at one stale entry per
    /// user.
    pub fn get_pending_suggestion(&self, user_id: &str) -> Option<PendingSuggestion> {
        self.pending_at(user_id, Utc::now())
    }

    fn pending_at(&self, user_id: &str, now: DateTime<Utc>) -> Option<PendingSuggestion> {
        let mut state = self.state.lock().unwrap();
        match state.pending.get(user_id) {
            Some(pending) if pending.expires_at > now => Some(pending.clone()),
            Some(_) => {
                debug!(user_id, "pending suggestion expired; removing");
                state.pending.remove(user_id);
                None
            }
            None => None,
        }
    }

    pub fn get_suggestion(&self, user_id: &str) -> Option<Suggestion> {
        let state = self.state.lock().unwrap();
        state.suggestions.get(user_id).map(|e| e.suggestion.clone())
    }

    /// All confirmed suggestions, ascending by creation timestamp with
    /// ties broken by arrival order.
    pub fn get_all_suggestions(&self) -> Vec<Suggestion> {
        let state = self.state.lock().unwrap();
        let mut entries: Vec<_> = state
            .suggestions
            .values()
            .map(|e| (e.suggestion.timestamp, e.seq, e.suggestion.clone()))
            .collect();
        entries.sort_by_key(|(timestamp, seq, _)| (*timestamp, *seq));
        entries.into_iter().map(|(_, _, s)| s).collect()
    }

    pub fn get_suggestion_count(&self) -> usize {
        self.state.lock().unwrap().suggestions.len()
    }

    pub fn is_locked(&self) -> bool {
        self.state.lock().unwrap().locked
    }

    /// Engage the weekly lock. Idempotent — locking a locked store is a
    /// no-op apart from the snapshot rewrite.
    #[instrument(skip(self))]
    pub fn lock(&self) {
        let mut state = self.state.lock().unwrap();
        state.locked = true;
        self.save(&state);
    }

    #[instrument(skip(self))]
    pub fn unlock(&self) {
        let mut state = self.state.lock().unwrap();
        state.locked = false;
        self.save(&state);
    }

    /// Clear both collections and release the lock, regardless of prior
    /// state. Fired by the weekly reset trigger.
    #[instrument(skip(self))]
    pub fn reset(&self) {
        let mut state = self.state.lock().unwrap();
        state.suggestions.clear();
        state.pending.clear();
        state.locked = false;
        state.next_seq = 0;
        self.save(&state);
    }

    /// Rewrite the snapshot file. Failures are logged and otherwise
    /// ignored: the in-memory state stays authoritative for the rest of
    /// the process lifetime, and the next successful write catches up.
    fn save(&self, state: &StoreState) {
        let Some(ref path) = self.snapshot_path else {
            return;
        };

        let mut entries: Vec<_> = state
            .suggestions
            .iter()
            .map(|(user_id, e)| (e.suggestion.timestamp, e.seq, user_id.clone(), e.suggestion.clone()))
            .collect();
        entries.sort_by_key(|(timestamp, seq, _, _)| (*timestamp, *seq));

        let snapshot = Snapshot {
            suggestions: entries
                .into_iter()
                .map(|(_, _, user_id, suggestion)| (user_id, suggestion))
                .collect(),
            locked: state.locked,
        };

        if let Err(e) = snapshot.write(path) {
            error!(path = %path.display(), error = %e, "failed to write suggestion snapshot");
        }
    }
}
