//! Pure rules for evaluating a guess.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Number of guesses after which parity hints are given.
pub const HINT_THRESHOLD: usize = 3;

/// How a guess compares to the secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    /// Guess is below the secret.
    TooLow,
    /// Guess is above the secret.
    TooHigh,
    /// Guess equals the secret.
    Exact,
}

/// Parity of the secret, revealed as a hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    /// Divisible by two.
    #[display("even")]
    Even,
    /// Not divisible by two.
    #[display("odd")]
    Odd,
}

/// Compares a guess against the secret.
pub fn compare(guess: i64, secret: i64) -> Comparison {
    match guess.cmp(&secret) {
        Ordering::Less => Comparison::TooLow,
        Ordering::Greater => Comparison::TooHigh,
        Ordering::Equal => Comparison::Exact,
    }
}

/// Parity of `value`.
pub fn parity(value: i64) -> Parity {
    if value.rem_euclid(2) == 0 {
        Parity::Even
    } else {
        Parity::Odd
    }
}

/// Whether a game with `guesses` recorded guesses should receive a hint.
pub fn hint_due(guesses: usize) -> bool {
    guesses >= HINT_THRESHOLD
}

/// Attempts consumed so far.
pub fn attempts_taken(max_attempts: u32, attempts_left: u32) -> u32 {
    max_attempts.saturating_sub(attempts_left)
}
