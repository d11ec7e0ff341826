//! The user's watchlist: matter snapshots kept in one JSON file.
//!
//! The file holds a JSON array of matters exactly as the API returned them,
//! in the order they were added. Entries are unique by `MatterId`.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use legisight_core::Matter;
use thiserror::Error;
use tracing::{info, warn};

const APP_DIR: &str = "legisight";
const WATCHLIST_FILENAME: &str = "watchlist.json";

#[derive(Error, Debug)]
pub enum WatchlistError {
    #[error("no platform data directory available")]
    NoDataDir,
    #[error("watchlist I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("serialising watchlist: {0}")]
    Json(#[from] serde_json::Error),
}

/// Matters the user is following, unique by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Watchlist {
    entries: Vec<Matter>,
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored entries, dropping any repeated ids (first one wins).
    pub fn from_entries(entries: Vec<Matter>) -> Self {
        let mut list = Self::new();
        for matter in entries {
            list.add(matter);
        }
        list
    }

    /// Add a matter unless one with the same id is already present.
    ///
    /// Returns `true` if the watchlist changed.
    pub fn add(&mut self, matter: Matter) -> bool {
        if self.contains(matter.id) {
            return false;
        }
        self.entries.push(matter);
        true
    }

    /// Remove the entry with `matter_id`, returning it if present.
    pub fn remove(&mut self, matter_id: i64) -> Option<Matter> {
        let idx = self.entries.iter().position(|m| m.id == matter_id)?;
        Some(self.entries.remove(idx))
    }

    pub fn contains(&self, matter_id: i64) -> bool {
        self.entries.iter().any(|m| m.id == matter_id)
    }

    pub fn entries(&self) -> &[Matter] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// File-backed persistence for a [`Watchlist`].
#[derive(Debug, Clone)]
pub struct WatchlistStore {
    path: PathBuf,
}

impl WatchlistStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<data dir>/legisight/watchlist.json`.
    pub fn default_location() -> Result<Self, WatchlistError> {
        let data_dir = dirs::data_dir().ok_or(WatchlistError::NoDataDir)?;
        Ok(Self::new(data_dir.join(APP_DIR).join(WATCHLIST_FILENAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored watchlist.
    ///
    /// A missing file is an empty watchlist. An unreadable or corrupt file is
    /// logged and also treated as empty; the next save overwrites it.
    pub fn load(&self) -> Watchlist {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Watchlist::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot read watchlist, starting empty");
                return Watchlist::new();
            }
        };

        if raw.trim().is_empty() {
            return Watchlist::new();
        }

        match serde_json::from_str::<Vec<Matter>>(&raw) {
            Ok(entries) => {
                let list = Watchlist::from_entries(entries);
                info!(count = list.len(), path = %self.path.display(), "loaded watchlist");
                list
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "corrupt watchlist, starting empty");
                Watchlist::new()
            }
        }
    }

    /// Write the watchlist atomically (temp file in the same directory, synced,
    /// then renamed over the old file).
    pub fn save(&self, list: &Watchlist) -> Result<(), WatchlistError> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|source| self.io_error(dir, source))?;

        let json = serde_json::to_vec_pretty(list.entries())?;
        let mut tmp =
            tempfile::NamedTempFile::new_in(dir).map_err(|source| self.io_error(dir, source))?;
        tmp.write_all(&json)
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|source| self.io_error(tmp.path(), source))?;
        tmp.persist(&self.path)
            .map_err(|e| self.io_error(&self.path, e.error))?;

        info!(count = list.len(), path = %self.path.display(), "saved watchlist");
        Ok(())
    }

    fn io_error(&self, path: &Path, source: io::Error) -> WatchlistError {
        WatchlistError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
