//! Guess rejection errors.

use crate::leaderboard::LeaderboardError;

use super::outcome::{GuessOutcome, Message};

/// Error returned when a guess cannot be evaluated or its result not recorded.
#[derive(Debug, Clone, derive_more::Display)]
pub enum GuessError {
    /// No game is in progress for this caller.
    #[display("A new game has not been started. Please select a difficulty.")]
    NoActiveSession,

    /// The raw input is not an integer. Nothing was consumed.
    #[display("Please enter a valid number.")]
    InvalidInput(String),

    /// The game was won but the leaderboard could not be written.
    #[display("Failed to record score: {}", error)]
    Unrecorded {
        /// The winning outcome. The game has already ended.
        won: Box<GuessOutcome>,
        /// Why the score was not written.
        error: LeaderboardError,
    },
}

impl GuessError {
    /// Recoverable errors are shown to the player; the rest surface as failures.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, GuessError::Unrecorded { .. })
    }

    /// Player-facing messages for this error.
    ///
    /// An unrecorded win still reports the win, followed by the failure.
    pub fn messages(&self) -> Vec<Message> {
        match self {
            GuessError::NoActiveSession => vec![Message::info(self.to_string())],
            GuessError::InvalidInput(_) => vec![Message::error(self.to_string())],
            GuessError::Unrecorded { won, .. } => {
                let mut messages = won.messages.clone();
                messages.push(Message::error("Your score could not be saved."));
                messages
            }
        }
    }
}

impl std::error::Error for GuessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GuessError::Unrecorded { error, .. } => Some(error),
            _ => None,
        }
    }
}
