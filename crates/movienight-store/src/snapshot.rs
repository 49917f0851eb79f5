//! On-disk snapshot of the persisted store fields.
//!
//! The file holds the confirmed suggestions (as `[user_id, Suggestion]`
//! pairs, already sorted by creation order) and the lock flag. Pending
//! suggestions are not part of the snapshot. Timestamps serialize as
//! RFC 3339 and round-trip to the same instant via chrono's serde impl.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use movienight_core::Suggestion;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub suggestions: Vec<(String, Suggestion)>,
    pub locked: bool,
}

impl Snapshot {
    /// Read a snapshot from `path`.
    ///
    /// A missing file is a normal first start. A corrupt file is logged
    /// and discarded — the bot starts from empty state rather than
    /// refusing to come up.
    pub fn load(path: &Path) -> Option<Snapshot> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read snapshot; starting empty");
                return None;
            }
        };

        match serde_json::from_str::<Snapshot>(&raw) {
            Ok(snapshot) => {
                info!(
                    path = %path.display(),
                    suggestions = snapshot.suggestions.len(),
                    locked = snapshot.locked,
                    "loaded suggestion snapshot"
                );
                Some(snapshot)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corrupt snapshot; starting empty");
                None
            }
        }
    }

    /// Write the full snapshot to `path`, creating parent directories as
    /// needed. The write is synchronous; callers decide how to handle a
    /// failure (the store logs it and keeps memory authoritative).
    pub fn write(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
    }
}
