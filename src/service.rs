//! Game operations exposed to the presentation layer.

use rand::Rng;
use tracing::{debug, info, instrument};

use crate::games::guessing::{
    DifficultyTable, GuessError, GuessOutcome, Message, SessionView, StartOutcome,
};
use crate::leaderboard::{LeaderboardEntry, LeaderboardError, LeaderboardRepository};
use crate::session::SessionManager;

/// Service layer combining the difficulty table, caller sessions, and the
/// leaderboard into the start/guess/reset/leaderboard operations.
#[derive(Debug, Clone)]
pub struct GameService {
    table: DifficultyTable,
    sessions: SessionManager,
    leaderboard: LeaderboardRepository,
}

impl GameService {
    /// Creates a service backed by the given leaderboard.
    #[instrument(skip(table, leaderboard), fields(path = %leaderboard.path().display()))]
    pub fn new(table: DifficultyTable, leaderboard: LeaderboardRepository) -> Self {
        info!("Creating GameService");
        Self {
            table,
            sessions: SessionManager::new(),
            leaderboard,
        }
    }

    /// Session storage.
    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Leaderboard repository.
    pub fn leaderboard_repository(&self) -> &LeaderboardRepository {
        &self.leaderboard
    }

    /// Starts a new game for `session_id` with a thread-local RNG.
    pub fn start_game(&self, session_id: &str, difficulty: Option<&str>) -> StartOutcome {
        self.start_game_with(session_id, difficulty, &mut rand::rng())
    }

    /// Starts a new game for `session_id`, drawing the secret from `rng`.
    #[instrument(skip(self, rng))]
    pub fn start_game_with<R: Rng>(
        &self,
        session_id: &str,
        difficulty: Option<&str>,
        rng: &mut R,
    ) -> StartOutcome {
        self.sessions
            .with_session(session_id, |state| state.start(&self.table, difficulty, rng))
    }

    /// Submits a raw guess for `session_id`.
    ///
    /// # Errors
    ///
    /// See [`crate::SessionState::guess`].
    #[instrument(skip(self))]
    pub fn submit_guess(&self, session_id: &str, raw: &str) -> Result<GuessOutcome, GuessError> {
        let outcome = self.sessions.with_session(session_id, |state| {
            state.guess(&self.table, raw, &self.leaderboard)
        })?;
        debug!(verdict = ?outcome.verdict, "Guess evaluated");
        Ok(outcome)
    }

    /// Clears any game for `session_id`.
    #[instrument(skip(self))]
    pub fn reset_game(&self, session_id: &str) -> Message {
        self.sessions.with_session(session_id, |state| state.reset())
    }

    /// Caller-visible view of the game in progress, if any.
    #[instrument(skip(self))]
    pub fn session_view(&self, session_id: &str) -> Option<SessionView> {
        self.sessions.get_session(session_id).view(&self.table)
    }

    /// Current top ten.
    ///
    /// # Errors
    ///
    /// Only when the repository is strict and the store is unreadable.
    #[instrument(skip(self))]
    pub fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        self.leaderboard.entries()
    }
}
