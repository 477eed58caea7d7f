//! Leaderboard domain types.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::games::guessing::Difficulty;

/// Maximum number of entries kept on the leaderboard.
pub const LEADERBOARD_CAPACITY: usize = 10;

/// One winning game: the difficulty and how many attempts it took.
///
/// Serialized as `{"difficulty": "easy", "attempts": 4}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, new)]
pub struct LeaderboardEntry {
    difficulty: Difficulty,
    attempts: u32,
}

/// Merges `entry` into `entries`: append, stable sort by attempts, truncate.
///
/// Entries with equal attempts keep their relative order, so an older score
/// outranks a newer one with the same count.
pub fn rank(entries: &mut Vec<LeaderboardEntry>, entry: LeaderboardEntry, capacity: usize) {
    entries.push(entry);
    entries.sort_by_key(|e| e.attempts);
    entries.truncate(capacity);
}
