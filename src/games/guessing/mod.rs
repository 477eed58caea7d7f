//! Number guessing game: difficulty table, rules, and session state machine.

mod difficulty;
mod error;
mod game;
mod outcome;
mod rules;

pub use difficulty::{Difficulty, DifficultyProfile, DifficultyTable, Resolved};
pub use error::GuessError;
pub use game::{GameSession, SessionState};
pub use outcome::{GuessOutcome, Message, MessageLevel, SessionView, StartOutcome, Verdict};
pub use rules::{Comparison, HINT_THRESHOLD, Parity};
