//! Guessing game state machine.
//!
//! A caller owns one [`SessionState`]. It is either empty (no game) or holds
//! a [`GameSession`] in progress. Winning, losing, and resetting all return it
//! to empty; there is no separate finished state to carry around.

use std::num::IntErrorKind;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::difficulty::{Difficulty, DifficultyProfile, DifficultyTable};
use super::error::GuessError;
use super::outcome::{GuessOutcome, Message, SessionView, StartOutcome, Verdict};
use super::rules::{self, Comparison};
use crate::leaderboard::{LeaderboardEntry, Scoreboard};

/// One player's game in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    difficulty: Difficulty,
    secret: i64,
    attempts_left: u32,
    history: Vec<i64>,
}

impl GameSession {
    /// Starts a game with a secret drawn uniformly from the profile's range.
    #[instrument(skip(profile, rng), fields(difficulty = %profile.difficulty()))]
    pub fn new<R: Rng>(profile: &DifficultyProfile, rng: &mut R) -> Self {
        let secret = rng.random_range(*profile.lo()..=*profile.hi());
        Self::with_secret(profile, secret)
    }

    /// Starts a game with a chosen secret.
    pub fn with_secret(profile: &DifficultyProfile, secret: i64) -> Self {
        if !profile.contains(secret) {
            warn!(lo = profile.lo(), hi = profile.hi(), "Secret outside difficulty range");
        }
        Self {
            difficulty: *profile.difficulty(),
            secret,
            attempts_left: *profile.max_attempts(),
            history: Vec::new(),
        }
    }

    /// Difficulty being played.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// The number to guess. Server-side only; [`SessionView`] omits it.
    pub fn secret(&self) -> i64 {
        self.secret
    }

    /// Remaining attempts.
    pub fn attempts_left(&self) -> u32 {
        self.attempts_left
    }

    /// Guesses so far, oldest first.
    pub fn history(&self) -> &[i64] {
        &self.history
    }

    /// Caller-visible snapshot.
    pub fn view(&self, table: &DifficultyTable) -> SessionView {
        let profile = table.profile(self.difficulty);
        SessionView {
            difficulty: self.difficulty,
            lo: *profile.lo(),
            hi: *profile.hi(),
            attempts_left: self.attempts_left,
            history: self.history.clone(),
        }
    }
}

/// Caller-scoped session storage: at most one game at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    game: Option<GameSession>,
}

impl SessionState {
    /// Empty state with no game.
    pub fn new() -> Self {
        Self::default()
    }

    /// The game in progress, if any.
    pub fn game(&self) -> Option<&GameSession> {
        self.game.as_ref()
    }

    /// Whether a game is in progress.
    pub fn in_progress(&self) -> bool {
        self.game.is_some()
    }

    /// Caller-visible snapshot of the game in progress.
    pub fn view(&self, table: &DifficultyTable) -> Option<SessionView> {
        self.game.as_ref().map(|g| g.view(table))
    }

    /// Starts a new game, replacing any game in progress.
    ///
    /// A missing or unknown difficulty plays medium and adds a warning.
    #[instrument(skip(self, table, rng))]
    pub fn start<R: Rng>(
        &mut self,
        table: &DifficultyTable,
        requested: Option<&str>,
        rng: &mut R,
    ) -> StartOutcome {
        let resolved = table.resolve(requested);
        let game = GameSession::new(table.profile(resolved.difficulty), rng);
        self.install(table, game, resolved.substituted)
    }

    /// Starts a new game with a fixed secret, replacing any game in progress.
    #[instrument(skip(self, table, secret))]
    pub fn start_with_secret(
        &mut self,
        table: &DifficultyTable,
        requested: Option<&str>,
        secret: i64,
    ) -> StartOutcome {
        let resolved = table.resolve(requested);
        let game = GameSession::with_secret(table.profile(resolved.difficulty), secret);
        self.install(table, game, resolved.substituted)
    }

    fn install(
        &mut self,
        table: &DifficultyTable,
        game: GameSession,
        substituted: bool,
    ) -> StartOutcome {
        let profile = table.profile(game.difficulty);
        let mut messages = Vec::with_capacity(2);
        if substituted {
            messages.push(Message::warning(
                "Invalid difficulty selected. Defaulting to medium.",
            ));
        }
        messages.push(Message::info(format!(
            "New {} game started! Guess a number between {} and {}.",
            game.difficulty.title(),
            profile.lo(),
            profile.hi()
        )));

        info!(
            difficulty = %game.difficulty,
            attempts = game.attempts_left,
            replaced = self.game.is_some(),
            "Game started"
        );

        let view = game.view(table);
        self.game = Some(game);
        StartOutcome { view, messages }
    }

    /// Evaluates one guess.
    ///
    /// A valid guess always consumes one attempt and is appended to history
    /// before it is compared. A win is recorded on `scoreboard`; the game is
    /// cleared before recording, so a failed write still ends the game.
    ///
    /// # Errors
    ///
    /// - [`GuessError::NoActiveSession`] if no game is in progress.
    /// - [`GuessError::InvalidInput`] if `raw` is not an integer; nothing is
    ///   consumed.
    /// - [`GuessError::Unrecorded`] if a winning score cannot be persisted.
    ///   The error carries the winning outcome.
    #[instrument(skip(self, table, scoreboard))]
    pub fn guess<S: Scoreboard + ?Sized>(
        &mut self,
        table: &DifficultyTable,
        raw: &str,
        scoreboard: &S,
    ) -> Result<GuessOutcome, GuessError> {
        let Some(game) = self.game.as_mut() else {
            warn!("Guess without an active game");
            return Err(GuessError::NoActiveSession);
        };

        let value = parse_guess(raw).ok_or_else(|| {
            warn!(raw, "Rejected non-integer guess");
            GuessError::InvalidInput(raw.to_string())
        })?;

        let max_attempts = *table.profile(game.difficulty).max_attempts();
        game.attempts_left = game.attempts_left.saturating_sub(1);
        game.history.push(value);

        let difficulty = game.difficulty;
        let secret = game.secret;
        let attempts_left = game.attempts_left;
        let guesses = game.history.len();
        debug!(value, attempts_left, guesses, "Guess recorded");

        let (verdict, miss_message) = match rules::compare(value, secret) {
            Comparison::Exact => {
                let attempts_taken = rules::attempts_taken(max_attempts, attempts_left);
                self.game = None;
                info!(%difficulty, attempts_taken, "Game won");
                debug!(secret, "Winning secret");

                let outcome = GuessOutcome {
                    verdict: Verdict::Won {
                        secret,
                        attempts_taken,
                    },
                    hint: None,
                    messages: vec![Message::success(format!(
                        "Correct! The number was {}. It took you {} attempts.",
                        secret, attempts_taken
                    ))],
                    session: None,
                };

                let entry = LeaderboardEntry::new(difficulty, attempts_taken);
                return match scoreboard.record(entry) {
                    Ok(()) => Ok(outcome),
                    Err(error) => Err(GuessError::Unrecorded {
                        won: Box::new(outcome),
                        error,
                    }),
                };
            }
            Comparison::TooLow => (Verdict::TooLow, Message::warning("Too low! Try again.")),
            Comparison::TooHigh => (Verdict::TooHigh, Message::warning("Too high! Try again.")),
        };
        let mut messages = vec![miss_message];

        if attempts_left == 0 {
            self.game = None;
            info!(%difficulty, guesses, "Game lost");
            debug!(secret, "Unguessed secret");
            messages.push(Message::error(format!(
                "Game Over! The number was {}.",
                secret
            )));
            return Ok(GuessOutcome {
                verdict: Verdict::Lost { secret },
                hint: None,
                messages,
                session: None,
            });
        }

        let hint = rules::hint_due(guesses).then(|| rules::parity(secret));
        if let Some(parity) = hint {
            messages.push(Message::info(format!("Hint: The number is {}.", parity)));
        }

        Ok(GuessOutcome {
            verdict,
            hint,
            messages,
            session: self.view(table),
        })
    }

    /// Clears any game in progress. Safe to call with no game.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> Message {
        if self.game.take().is_some() {
            info!("Game reset");
        } else {
            debug!("Reset with no game in progress");
        }
        Message::info("Game reset. Please select a difficulty to start a new game.")
    }
}

/// Parses a trimmed integer guess.
///
/// Integers beyond `i64` saturate: they are still valid guesses, and no
/// secret lies that far out, so they resolve as plain misses.
fn parse_guess(raw: &str) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(value) => Some(value),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}
