//! Strictly Guess library - number guessing game with a persisted leaderboard
//!
//! # Architecture
//!
//! - **Games**: the guessing game state machine, difficulty table, and rules
//! - **Leaderboard**: top-ten scores persisted as a JSON file
//! - **Session**: caller-scoped game storage
//! - **Service**: start/guess/reset/leaderboard operations
//! - **Server**: HTTP API over the service
//!
//! # Example
//!
//! ```no_run
//! use strictly_guess::{DifficultyTable, LeaderboardRepository, SessionState};
//!
//! # fn example() -> anyhow::Result<()> {
//! let table = DifficultyTable::standard();
//! let leaderboard = LeaderboardRepository::new("leaderboard.json");
//!
//! let mut state = SessionState::new();
//! state.start(&table, Some("easy"), &mut rand::rng());
//! let outcome = state.guess(&table, "25", &leaderboard)?;
//! for message in &outcome.messages {
//!     println!("{}", message);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod games;
mod leaderboard;
mod server;
mod service;
mod session;
mod terminal;

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError};

// Crate-level exports - Game types
pub use games::guessing::{
    Comparison, Difficulty, DifficultyProfile, DifficultyTable, GameSession, GuessError,
    GuessOutcome, HINT_THRESHOLD, Message, MessageLevel, Parity, Resolved, SessionState,
    SessionView, StartOutcome, Verdict,
};

// Crate-level exports - Leaderboard
pub use leaderboard::{
    LEADERBOARD_CAPACITY, LeaderboardEntry, LeaderboardError, LeaderboardErrorKind,
    LeaderboardRepository, Scoreboard, rank,
};

// Crate-level exports - Server
pub use server::{
    ApiError, GameStatusResponse, GuessRequest, MessagesResponse, RawGuess, StartRequest, router,
    serve,
};

// Crate-level exports - Service and sessions
pub use service::GameService;
pub use session::{SessionId, SessionManager};

// Crate-level exports - Terminal client
pub use terminal::{Command as TerminalCommand, play, render_leaderboard};
