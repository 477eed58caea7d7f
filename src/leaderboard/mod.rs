//! Persisted top-ten leaderboard.

mod error;
mod models;
mod repository;

pub use error::{LeaderboardError, LeaderboardErrorKind};
pub use models::{LEADERBOARD_CAPACITY, LeaderboardEntry, rank};
pub use repository::{LeaderboardRepository, Scoreboard};
