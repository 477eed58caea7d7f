//! Difficulty tiers and their fixed profiles.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};
use tracing::{instrument, warn};

/// Difficulty identifier.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Default,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    /// 1–50, ten attempts.
    Easy,
    /// 1–100, seven attempts.
    #[default]
    Medium,
    /// 1–200, five attempts.
    Hard,
}

impl Difficulty {
    /// Capitalized name used in player-facing messages.
    pub fn title(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Range and attempt budget for one difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize)]
pub struct DifficultyProfile {
    difficulty: Difficulty,
    lo: i64,
    hi: i64,
    max_attempts: u32,
}

impl DifficultyProfile {
    /// Whether `value` lies in `[lo, hi]`.
    pub fn contains(&self, value: i64) -> bool {
        (self.lo..=self.hi).contains(&value)
    }
}

/// Result of resolving a requested difficulty identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    /// The difficulty that will actually be played.
    pub difficulty: Difficulty,
    /// True when the request was missing or unknown and the default was used.
    pub substituted: bool,
}

/// Immutable lookup table of the three difficulty profiles.
///
/// Built once at startup and handed to every game operation that needs it.
#[derive(Debug, Clone)]
pub struct DifficultyTable {
    profiles: [DifficultyProfile; 3],
}

impl DifficultyTable {
    /// The standard easy/medium/hard table.
    pub fn standard() -> Self {
        Self {
            profiles: [
                DifficultyProfile {
                    difficulty: Difficulty::Easy,
                    lo: 1,
                    hi: 50,
                    max_attempts: 10,
                },
                DifficultyProfile {
                    difficulty: Difficulty::Medium,
                    lo: 1,
                    hi: 100,
                    max_attempts: 7,
                },
                DifficultyProfile {
                    difficulty: Difficulty::Hard,
                    lo: 1,
                    hi: 200,
                    max_attempts: 5,
                },
            ],
        }
    }

    /// Returns the profile for a difficulty.
    pub fn profile(&self, difficulty: Difficulty) -> &DifficultyProfile {
        match difficulty {
            Difficulty::Easy => &self.profiles[0],
            Difficulty::Medium => &self.profiles[1],
            Difficulty::Hard => &self.profiles[2],
        }
    }

    /// All profiles in easy → hard order.
    pub fn profiles(&self) -> impl Iterator<Item = &DifficultyProfile> {
        Difficulty::iter().map(move |d| self.profile(d))
    }

    /// Resolves a caller-supplied identifier, falling back to the default.
    ///
    /// Matching is exact on the lowercase identifiers, as stored on disk.
    #[instrument(skip(self))]
    pub fn resolve(&self, requested: Option<&str>) -> Resolved {
        match requested.map(Difficulty::from_str) {
            Some(Ok(difficulty)) => Resolved {
                difficulty,
                substituted: false,
            },
            _ => {
                warn!(?requested, "Unknown difficulty, defaulting to medium");
                Resolved {
                    difficulty: Difficulty::default(),
                    substituted: true,
                }
            }
        }
    }
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self::standard()
    }
}
