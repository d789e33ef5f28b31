//! # State Persistence
//!
//! Keeps the `SearchState` across runs in a single JSON snapshot
//! (`~/.ghsearch/state.json` by default):
//!
//! ```text
//! { "key": "rootGithubSearch", "saved_at": "2026-...Z", "state": { ... } }
//! ```
//!
//! Rehydrated once at startup, rewritten whenever the state changes. There is
//! no versioning; a snapshot that doesn't parse is ignored and overwritten.
//! Writes use atomic rename (write `.tmp`, then `rename()`).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::core::state::SearchState;

/// Fixed key stored in every snapshot.
pub const STORAGE_KEY: &str = "rootGithubSearch";

#[derive(Serialize, Deserialize, Debug)]
struct Snapshot {
    key: String,
    saved_at: DateTime<Utc>,
    state: SearchState,
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Load the snapshot at `path`.
///
/// Returns `Ok(None)` if there is no file or it belongs to a different key.
pub fn load_state(path: &Path) -> io::Result<Option<SearchState>> {
    if !path.exists() {
        return Ok(None);
    }
    let json = fs::read_to_string(path)?;
    let snapshot: Snapshot =
        serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    if snapshot.key != STORAGE_KEY {
        warn!(
            "Ignoring snapshot {} with foreign key {:?}",
            path.display(),
            snapshot.key
        );
        return Ok(None);
    }

    debug!("Snapshot saved at {}", snapshot.saved_at.to_rfc3339());
    Ok(Some(snapshot.state))
}

/// Write `state` to `path`, creating parent directories as needed.
pub fn save_state(path: &Path, state: &SearchState) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let snapshot = Snapshot {
        key: STORAGE_KEY.to_string(),
        saved_at: Utc::now(),
        state: state.clone(),
    };
    atomic_write_json(path, &snapshot)
}

/// The snapshot file for one run. Remembers what it last wrote so unchanged
/// state isn't rewritten on every loop iteration.
pub struct StateFile {
    path: Option<PathBuf>,
    last_saved: Option<SearchState>,
}

impl StateFile {
    /// `None` disables persistence entirely.
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            last_saved: None,
        }
    }

    /// Read the snapshot. Failures are logged and treated as "nothing saved".
    pub fn restore(&mut self) -> Option<SearchState> {
        let path = self.path.as_ref()?;
        match load_state(path) {
            Ok(Some(state)) => {
                info!("Restored search state from {}", path.display());
                self.last_saved = Some(state.clone());
                Some(state)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to read snapshot {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Write `state` if it differs from the last write.
    pub fn save_if_changed(&mut self, state: &SearchState) {
        let Some(path) = self.path.as_ref() else {
            return;
        };
        if self.last_saved.as_ref() == Some(state) {
            return;
        }
        match save_state(path, state) {
            Ok(()) => {
                debug!("Snapshot written to {}", path.display());
                self.last_saved = Some(state.clone());
            }
            Err(e) => warn!("Failed to write snapshot {}: {}", path.display(), e),
        }
    }
}
