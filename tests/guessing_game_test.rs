//! Tests for the guessing game state machine.

use std::cell::RefCell;

use rand::SeedableRng;
use rand::rngs::StdRng;

use strictly_guess::{
    Difficulty, DifficultyTable, GameSession, GuessError, LeaderboardEntry, LeaderboardError,
    MessageLevel, Parity, Scoreboard, SessionState, Verdict,
};

/// Scoreboard that keeps entries in memory.
#[derive(Default)]
struct RecordingScoreboard {
    entries: RefCell<Vec<LeaderboardEntry>>,
}

impl Scoreboard for RecordingScoreboard {
    fn record(&self, entry: LeaderboardEntry) -> Result<(), LeaderboardError> {
        self.entries.borrow_mut().push(entry);
        Ok(())
    }
}

/// Scoreboard whose writes always fail.
struct FailingScoreboard;

impl Scoreboard for FailingScoreboard {
    fn record(&self, _entry: LeaderboardEntry) -> Result<(), LeaderboardError> {
        Err(LeaderboardError::write_failure("disk full"))
    }
}

fn texts(messages: &[strictly_guess::Message]) -> Vec<&str> {
    messages.iter().map(|m| m.text.as_str()).collect()
}

#[test]
fn test_secret_drawn_within_range() {
    let table = DifficultyTable::standard();
    let mut rng = StdRng::seed_from_u64(7);

    for profile in table.profiles() {
        let mut seen_lo = false;
        let mut seen_hi = false;
        for _ in 0..5_000 {
            let game = GameSession::new(profile, &mut rng);
            assert!(
                profile.contains(game.secret()),
                "{} outside {:?}",
                game.secret(),
                profile
            );
            seen_lo |= game.secret() == *profile.lo();
            seen_hi |= game.secret() == *profile.hi();
        }
        if *profile.difficulty() == Difficulty::Easy {
            assert!(seen_lo && seen_hi, "Both ends of 1..=50 should be drawn");
        }
    }
}

#[test]
fn test_easy_scenario_wins_in_four() {
    let table = DifficultyTable::standard();
    let scoreboard = RecordingScoreboard::default();
    let mut state = SessionState::new();
    state.start_with_secret(&table, Some("easy"), 25);

    let outcome = state.guess(&table, "10", &scoreboard).expect("Valid guess");
    assert_eq!(outcome.verdict, Verdict::TooLow);
    assert_eq!(texts(&outcome.messages), ["Too low! Try again."]);
    assert_eq!(outcome.session.as_ref().map(|v| v.attempts_left), Some(9));

    let outcome = state.guess(&table, "30", &scoreboard).expect("Valid guess");
    assert_eq!(outcome.verdict, Verdict::TooHigh);
    assert_eq!(outcome.hint, None);
    assert_eq!(outcome.session.as_ref().map(|v| v.attempts_left), Some(8));

    let outcome = state.guess(&table, "40", &scoreboard).expect("Valid guess");
    assert_eq!(outcome.verdict, Verdict::TooHigh);
    assert_eq!(outcome.hint, Some(Parity::Odd));
    assert_eq!(
        texts(&outcome.messages),
        ["Too high! Try again.", "Hint: The number is odd."]
    );
    let view = outcome.session.expect("Game continues");
    assert_eq!(view.attempts_left, 7);
    assert_eq!(view.history, [10, 30, 40]);

    let outcome = state.guess(&table, "25", &scoreboard).expect("Valid guess");
    assert_eq!(
        outcome.verdict,
        Verdict::Won {
            secret: 25,
            attempts_taken: 4
        }
    );
    assert_eq!(outcome.hint, None);
    assert_eq!(
        texts(&outcome.messages),
        ["Correct! The number was 25. It took you 4 attempts."]
    );
    assert_eq!(outcome.messages[0].level, MessageLevel::Success);
    assert!(outcome.session.is_none());
    assert!(!state.in_progress());

    assert_eq!(
        *scoreboard.entries.borrow(),
        [LeaderboardEntry::new(Difficulty::Easy, 4)]
    );
}

#[test]
fn test_medium_loss_after_seven_misses() {
    let table = DifficultyTable::standard();
    let scoreboard = RecordingScoreboard::default();
    let mut state = SessionState::new();
    state.start_with_secret(&table, Some("medium"), 50);

    for n in 1..=6 {
        let outcome = state.guess(&table, "1", &scoreboard).expect("Valid guess");
        assert_eq!(outcome.verdict, Verdict::TooLow);
        assert_eq!(
            outcome.session.map(|v| v.attempts_left),
            Some(7 - n),
            "Guess {n}"
        );
    }

    let outcome = state.guess(&table, "1", &scoreboard).expect("Valid guess");
    assert_eq!(outcome.verdict, Verdict::Lost { secret: 50 });
    assert_eq!(
        texts(&outcome.messages),
        ["Too low! Try again.", "Game Over! The number was 50."]
    );
    assert_eq!(outcome.hint, None);
    assert!(outcome.session.is_none());
    assert!(!state.in_progress());
    assert!(scoreboard.entries.borrow().is_empty());

    let err = state.guess(&table, "50", &scoreboard).unwrap_err();
    assert!(matches!(err, GuessError::NoActiveSession));
}

#[test]
fn test_valid_guess_consumes_exactly_one_attempt() {
    let table = DifficultyTable::standard();
    let scoreboard = RecordingScoreboard::default();
    let mut state = SessionState::new();
    state.start_with_secret(&table, Some("easy"), 33);

    for (i, raw) in ["1", "50", " 20 ", "-4", "+40"].iter().enumerate() {
        let before = state.game().expect("In progress").attempts_left();
        state.guess(&table, raw, &scoreboard).expect("Valid guess");
        let game = state.game().expect("Still in progress");
        assert_eq!(game.attempts_left(), before - 1);
        assert_eq!(game.history().len(), i + 1);
    }
    assert_eq!(state.game().unwrap().history(), [1, 50, 20, -4, 40]);
}

#[test]
fn test_invalid_input_is_discarded() {
    let table = DifficultyTable::standard();
    let scoreboard = RecordingScoreboard::default();
    let mut state = SessionState::new();
    state.start_with_secret(&table, Some("hard"), 120);

    for raw in ["abc", "", "12.5", "1e3", "ten"] {
        let err = state.guess(&table, raw, &scoreboard).unwrap_err();
        assert!(matches!(err, GuessError::InvalidInput(_)), "{raw:?}");
        assert!(err.is_recoverable());
        assert_eq!(texts(&err.messages()), ["Please enter a valid number."]);
    }

    let game = state.game().expect("Still in progress");
    assert_eq!(game.attempts_left(), 5);
    assert!(game.history().is_empty());
}

#[test]
fn test_guess_without_game() {
    let table = DifficultyTable::standard();
    let scoreboard = RecordingScoreboard::default();
    let mut state = SessionState::new();

    let err = state.guess(&table, "abc", &scoreboard).unwrap_err();
    assert!(matches!(err, GuessError::NoActiveSession));
    assert!(err.is_recoverable());
    assert_eq!(err.messages()[0].level, MessageLevel::Info);
    assert_eq!(state, SessionState::new());
}

#[test]
fn test_hint_on_every_guess_past_threshold() {
    let table = DifficultyTable::standard();
    let scoreboard = RecordingScoreboard::default();
    let mut state = SessionState::new();
    state.start_with_secret(&table, Some("hard"), 100);

    let hints: Vec<_> = ["1", "199", "2", "198"]
        .iter()
        .map(|raw| state.guess(&table, raw, &scoreboard).expect("Valid guess").hint)
        .collect();
    assert_eq!(hints, [None, None, Some(Parity::Even), Some(Parity::Even)]);

    let last = state.guess(&table, "3", &scoreboard).expect("Valid guess");
    assert_eq!(last.verdict, Verdict::Lost { secret: 100 });
    assert_eq!(last.hint, None);
}

#[test]
fn test_invalid_difficulty_defaults_to_medium() {
    let table = DifficultyTable::standard();
    let mut state = SessionState::new();
    let mut rng = StdRng::seed_from_u64(1);

    let outcome = state.start(&table, Some("extreme"), &mut rng);
    assert_eq!(outcome.messages.len(), 2);
    assert_eq!(outcome.messages[0].level, MessageLevel::Warning);
    assert_eq!(
        outcome.messages[0].text,
        "Invalid difficulty selected. Defaulting to medium."
    );
    assert_eq!(
        outcome.messages[1].text,
        "New Medium game started! Guess a number between 1 and 100."
    );
    assert_eq!(outcome.view.difficulty, Difficulty::Medium);
    assert_eq!(outcome.view.attempts_left, 7);

    let outcome = state.start(&table, None, &mut rng);
    assert_eq!(outcome.messages[0].level, MessageLevel::Warning);
}

#[test]
fn test_start_replaces_existing_game() {
    let table = DifficultyTable::standard();
    let scoreboard = RecordingScoreboard::default();
    let mut state = SessionState::new();
    state.start_with_secret(&table, Some("easy"), 10);
    state.guess(&table, "5", &scoreboard).expect("Valid guess");
    state.guess(&table, "6", &scoreboard).expect("Valid guess");

    let outcome = state.start_with_secret(&table, Some("hard"), 150);
    assert_eq!(outcome.messages.len(), 1);
    assert_eq!(
        outcome.messages[0].text,
        "New Hard game started! Guess a number between 1 and 200."
    );
    let game = state.game().expect("New game");
    assert_eq!(game.difficulty(), Difficulty::Hard);
    assert_eq!(game.attempts_left(), 5);
    assert!(game.history().is_empty());
}

#[test]
fn test_reset_is_idempotent() {
    let table = DifficultyTable::standard();
    let mut state = SessionState::new();
    state.start_with_secret(&table, Some("easy"), 10);

    let first = state.reset();
    let after_first = state.clone();
    let second = state.reset();

    assert_eq!(first, second);
    assert_eq!(after_first, state);
    assert_eq!(state, SessionState::new());
    assert_eq!(
        first.text,
        "Game reset. Please select a difficulty to start a new game."
    );
}

#[test]
fn test_win_with_failing_store_still_ends_game() {
    let table = DifficultyTable::standard();
    let mut state = SessionState::new();
    state.start_with_secret(&table, Some("easy"), 7);

    let err = state.guess(&table, "7", &FailingScoreboard).unwrap_err();
    assert!(!err.is_recoverable());
    assert!(!state.in_progress());

    let GuessError::Unrecorded { won, .. } = &err else {
        panic!("Expected an unrecorded win, got {err:?}");
    };
    assert_eq!(
        won.verdict,
        Verdict::Won {
            secret: 7,
            attempts_taken: 1
        }
    );
    assert_eq!(
        texts(&err.messages()),
        [
            "Correct! The number was 7. It took you 1 attempts.",
            "Your score could not be saved."
        ]
    );
}

#[test]
fn test_oversized_integers_are_misses() {
    let table = DifficultyTable::standard();
    let scoreboard = RecordingScoreboard::default();
    let mut state = SessionState::new();
    state.start_with_secret(&table, Some("medium"), 50);

    let high = state
        .guess(&table, "99999999999999999999", &scoreboard)
        .expect("Oversized integer is a valid guess");
    assert_eq!(high.verdict, Verdict::TooHigh);

    let low = state
        .guess(&table, "-99999999999999999999", &scoreboard)
        .expect("Oversized integer is a valid guess");
    assert_eq!(low.verdict, Verdict::TooLow);

    let game = state.game().expect("Still in progress");
    assert_eq!(game.attempts_left(), 5);
    assert_eq!(game.history(), [i64::MAX, i64::MIN]);
}

#[test]
fn test_view_hides_secret() {
    let table = DifficultyTable::standard();
    let mut state = SessionState::new();
    state.start_with_secret(&table, Some("easy"), 42);

    let json = serde_json::to_value(state.view(&table).expect("In progress")).unwrap();
    assert!(json.get("secret").is_none());
    assert_eq!(json["difficulty"], "easy");
    assert_eq!(json["lo"], 1);
    assert_eq!(json["hi"], 50);
}
