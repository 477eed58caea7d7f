//! Leaderboard store error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong with the durable store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum LeaderboardErrorKind {
    /// Store content is not a JSON array of entries.
    #[display("store corrupt")]
    StoreCorrupt,
    /// Store exists but could not be read.
    #[display("store read failure")]
    StoreReadFailure,
    /// Store could not be written.
    #[display("store write failure")]
    StoreWriteFailure,
}

/// Leaderboard error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Leaderboard error ({}): {} at {}:{}", kind, message, file, line)]
pub struct LeaderboardError {
    /// Error category.
    pub kind: LeaderboardErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl LeaderboardError {
    /// Creates a new leaderboard error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: LeaderboardErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Shorthand for a [`LeaderboardErrorKind::StoreCorrupt`] error.
    #[track_caller]
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::new(LeaderboardErrorKind::StoreCorrupt, message)
    }

    /// Shorthand for a [`LeaderboardErrorKind::StoreWriteFailure`] error.
    #[track_caller]
    pub fn write_failure(message: impl Into<String>) -> Self {
        Self::new(LeaderboardErrorKind::StoreWriteFailure, message)
    }
}
