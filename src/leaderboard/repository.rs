//! JSON file repository for the leaderboard.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, instrument, warn};

use crate::leaderboard::{
    LEADERBOARD_CAPACITY, LeaderboardEntry, LeaderboardError, LeaderboardErrorKind, rank,
};

/// Sink for winning scores.
pub trait Scoreboard {
    /// Records a winning game.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError`] if the score could not be persisted.
    fn record(&self, entry: LeaderboardEntry) -> Result<(), LeaderboardError>;
}

/// Leaderboard persisted as a single JSON array in one file.
///
/// Clones share the same write lock, so every insert in the process is
/// serialized through load → rank → save. Writes replace the file in one
/// rename, so reads need no lock.
#[derive(Debug, Clone)]
pub struct LeaderboardRepository {
    path: PathBuf,
    strict: bool,
    lock: Arc<Mutex<()>>,
}

impl LeaderboardRepository {
    /// Creates a repository backed by the file at `path`.
    ///
    /// The file does not need to exist yet.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn new(path: impl AsRef<Path>) -> Self {
        info!("Creating LeaderboardRepository");
        Self {
            path: path.as_ref().to_path_buf(),
            strict: false,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Report corrupt content as [`LeaderboardErrorKind::StoreCorrupt`]
    /// instead of reading it as an empty leaderboard.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the leaderboard, treating a missing, empty, or unreadable store
    /// as having no entries. Never fails.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Vec<LeaderboardEntry> {
        match self.try_load() {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "Discarding unreadable leaderboard");
                Vec::new()
            }
        }
    }

    /// Reads the leaderboard, surfacing corruption and read errors.
    ///
    /// A missing or empty store is still an empty leaderboard.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError`] with kind `StoreReadFailure` if the file
    /// cannot be read, or `StoreCorrupt` if it is not a JSON entry array.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn try_load(&self) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No leaderboard file yet");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(LeaderboardError::new(
                    LeaderboardErrorKind::StoreReadFailure,
                    format!("Failed to read '{}': {}", self.path.display(), e),
                ));
            }
        };

        if contents.trim().is_empty() {
            debug!("Leaderboard file is empty");
            return Ok(Vec::new());
        }

        let entries: Vec<LeaderboardEntry> = serde_json::from_str(&contents).map_err(|e| {
            LeaderboardError::corrupt(format!("Failed to parse '{}': {}", self.path.display(), e))
        })?;

        debug!(count = entries.len(), "Leaderboard loaded");
        Ok(entries)
    }

    /// Reads the leaderboard honoring the configured strictness.
    ///
    /// # Errors
    ///
    /// Only in strict mode; see [`Self::try_load`].
    pub fn entries(&self) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        if self.strict {
            self.try_load()
        } else {
            Ok(self.load())
        }
    }

    /// Overwrites the store with `entries`, keeping at most the first ten.
    ///
    /// The new contents go to a sibling `.tmp` file that is then renamed over
    /// the store, so concurrent readers see either the old or the new
    /// leaderboard and never a partial one.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError`] with kind `StoreWriteFailure` if the file
    /// cannot be written.
    #[instrument(skip(self, entries), fields(path = %self.path.display(), count = entries.len()))]
    pub fn save(&self, entries: &[LeaderboardEntry]) -> Result<(), LeaderboardError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.write_store(entries)
    }

    /// Merges `entry` into the stored top ten and persists the result.
    ///
    /// Returns the leaderboard as written.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError`] if the write fails, or in strict mode if
    /// the existing store cannot be read.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn insert(
        &self,
        entry: LeaderboardEntry,
    ) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut entries = self.entries()?;
        rank(&mut entries, entry, LEADERBOARD_CAPACITY);
        self.write_store(&entries)?;

        info!(
            difficulty = %entry.difficulty(),
            attempts = entry.attempts(),
            count = entries.len(),
            "Score recorded"
        );
        Ok(entries)
    }

    /// Caller must hold `self.lock`.
    fn write_store(&self, entries: &[LeaderboardEntry]) -> Result<(), LeaderboardError> {
        if entries.len() > LEADERBOARD_CAPACITY {
            warn!(count = entries.len(), "Truncating leaderboard before save");
        }
        let kept = &entries[..entries.len().min(LEADERBOARD_CAPACITY)];

        let contents = serde_json::to_string_pretty(kept).map_err(|e| {
            LeaderboardError::write_failure(format!("Failed to serialize leaderboard: {}", e))
        })?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| {
                LeaderboardError::write_failure(format!(
                    "Failed to create '{}': {}",
                    dir.display(),
                    e
                ))
            })?;
        }

        let staging = self.staging_path()?;
        fs::write(&staging, contents).map_err(|e| {
            LeaderboardError::write_failure(format!(
                "Failed to write '{}': {}",
                staging.display(),
                e
            ))
        })?;

        if let Err(e) = fs::rename(&staging, &self.path) {
            if let Err(cleanup) = fs::remove_file(&staging) {
                warn!(error = %cleanup, "Failed to remove staging file");
            }
            return Err(LeaderboardError::write_failure(format!(
                "Failed to replace '{}': {}",
                self.path.display(),
                e
            )));
        }

        debug!("Leaderboard saved");
        Ok(())
    }

    fn staging_path(&self) -> Result<PathBuf, LeaderboardError> {
        let name = self.path.file_name().ok_or_else(|| {
            LeaderboardError::write_failure(format!(
                "'{}' does not name a file",
                self.path.display()
            ))
        })?;
        let mut staging = name.to_os_string();
        staging.push(".tmp");
        Ok(self.path.with_file_name(staging))
    }
}

impl Scoreboard for LeaderboardRepository {
    fn record(&self, entry: LeaderboardEntry) -> Result<(), LeaderboardError> {
        self.insert(entry).map(|_| ())
    }
}
