/// Local fallback persistence for sessions with no resolvable identity
///
/// Two independently keyed JSON files - one for log entries, one for action
/// events - loaded once at startup and rewritten in full on every mutation.
/// This mirrors how the journal behaves when the remote record store is not
/// configured: data stays on the device, scoped to nobody.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{EnergyAction, EnergyEntry};
use crate::storage::StorageError;

const LOGS_FILE: &str = "energy-logs.json";
const ACTIONS_FILE: &str = "energy-actions.json";

/// JSON-file-backed store for anonymous sessions
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open the store in the given directory, creating it if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        tracing::info!("Local fallback store at: {:?}", dir);
        Ok(Self { dir })
    }

    /// Open the store in the default per-user data directory
    pub fn open_default() -> Result<Self, StorageError> {
        Self::open(default_data_dir())
    }

    /// Load all persisted entries, or an empty list if nothing was saved yet
    ///
    /// A corrupt or unreadable file degrades to the empty list rather than
    /// failing the session, matching how the original surface treats its
    /// local cache.
    pub fn load_entries(&self) -> Vec<EnergyEntry> {
        read_collection(&self.dir.join(LOGS_FILE))
    }

    /// Load all persisted actions, or an empty list
    pub fn load_actions(&self) -> Vec<EnergyAction> {
        read_collection(&self.dir.join(ACTIONS_FILE))
    }

    /// Rewrite the entries file in full
    pub fn save_entries(&self, entries: &[EnergyEntry]) -> Result<(), StorageError> {
        write_collection(&self.dir.join(LOGS_FILE), entries)
    }

    /// Rewrite the actions file in full
    pub fn save_actions(&self, actions: &[EnergyAction]) -> Result<(), StorageError> {
        write_collection(&self.dir.join(ACTIONS_FILE), actions)
    }
}

fn read_collection<T: serde::de::DeserializeOwned>(path: &Path) -> Vec<T> {
    match fs::read_to_string(path) {
        Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!("Discarding unreadable fallback file {:?}: {}", path, e);
            Vec::new()
        }),
        Err(_) => Vec::new(),
    }
}

fn write_collection<T: serde::Serialize>(path: &Path, items: &[T]) -> Result<(), StorageError> {
    let json = serde_json::to_string(items)?;
    fs::write(path, json)?;
    Ok(())
}

/// Default data directory, preferring the platform data dir and falling back
/// to the home directory, then the temp dir
pub fn default_data_dir() -> PathBuf {
    if let Some(mut dir) = dirs::data_dir() {
        dir.push("energy-journal");
        return dir;
    }
    if let Some(mut dir) = dirs::home_dir() {
        dir.push(".energy-journal");
        return dir;
    }
    let mut dir = std::env::temp_dir();
    dir.push("energy-journal");
    dir
}
