//! Player-facing results of game operations.

use super::difficulty::Difficulty;
use super::rules::Parity;
use serde::{Deserialize, Serialize};

/// Severity of a player-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    /// Neutral information.
    Info,
    /// A won game.
    Success,
    /// A miss that keeps the game going.
    Warning,
    /// Rejected input or a lost game.
    Error,
}

/// A message for the player, in the order it was emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Severity.
    pub level: MessageLevel,
    /// Display text.
    pub text: String,
}

impl Message {
    /// Informational message.
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            text: text.into(),
        }
    }

    /// Success message.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            text: text.into(),
        }
    }

    /// Warning message.
    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            text: text.into(),
        }
    }

    /// Error message.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            text: text.into(),
        }
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// What the caller may see of an in-progress game. Never carries the secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    /// Difficulty being played.
    pub difficulty: Difficulty,
    /// Lowest possible secret.
    pub lo: i64,
    /// Highest possible secret.
    pub hi: i64,
    /// Remaining attempts.
    pub attempts_left: u32,
    /// Every guess so far, oldest first.
    pub history: Vec<i64>,
}

/// Result of a start operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartOutcome {
    /// The freshly started game.
    pub view: SessionView,
    /// Warning (if the difficulty was substituted) then the start notice.
    pub messages: Vec<Message>,
}

/// How a single guess resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Verdict {
    /// Below the secret, game continues.
    TooLow,
    /// Above the secret, game continues.
    TooHigh,
    /// Secret found.
    Won {
        /// The secret.
        secret: i64,
        /// Attempts consumed including the winning one.
        attempts_taken: u32,
    },
    /// Out of attempts.
    Lost {
        /// The secret.
        secret: i64,
    },
}

impl Verdict {
    /// Whether this verdict ended the game.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Verdict::Won { .. } | Verdict::Lost { .. })
    }
}

/// Result of a syntactically valid guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessOutcome {
    /// How the guess resolved.
    pub verdict: Verdict,
    /// Parity hint, only on non-terminal guesses past the threshold.
    pub hint: Option<Parity>,
    /// Verdict message then hint message.
    pub messages: Vec<Message>,
    /// The game after the guess, or `None` once it has been cleared.
    pub session: Option<SessionView>,
}
