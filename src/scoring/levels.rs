use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::element::ElementRange;
use crate::error::ScoreError;

/// Score a new profile starts at before any factor applies
pub const DEFAULT_STARTING_SCORE: f64 = 1200.0;
/// Days a vouch must be held before it counts in full
pub const BONDING_PERIOD: u32 = 90;
pub const INVITATION_SCORE_FACTOR: f64 = 0.2;
pub const MAX_VOUCHED_ETH_DAYS: u32 = 180;
pub const MUTUAL_VOUCH_MULTIPLIER: f64 = 0.5;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 2800.0;

/// Qualitative credibility tiers, ordered low to high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreLevel {
    Untrusted,
    Questionable,
    Neutral,
    Reputable,
    Exemplary,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRange {
    pub level: ScoreLevel,
    pub min: f64,
    pub max: f64,
}

impl ScoreRange {
    pub fn contains(&self, score: f64) -> bool {
        score >= self.min && score <= self.max
    }
}

/// Contiguous, non-overlapping partition of [0, 2800]
pub const SCORE_RANGES: [ScoreRange; 5] = [
    ScoreRange { level: ScoreLevel::Untrusted, min: 0.0, max: 799.0 },
    ScoreRange { level: ScoreLevel::Questionable, min: 800.0, max: 1199.0 },
    ScoreRange { level: ScoreLevel::Neutral, min: 1200.0, max: 1599.0 },
    ScoreRange { level: ScoreLevel::Reputable, min: 1600.0, max: 1999.0 },
    ScoreRange { level: ScoreLevel::Exemplary, min: 2000.0, max: 2800.0 },
];

impl ScoreLevel {
    pub const ALL: [ScoreLevel; 5] = [
        ScoreLevel::Untrusted,
        ScoreLevel::Questionable,
        ScoreLevel::Neutral,
        ScoreLevel::Reputable,
        ScoreLevel::Exemplary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreLevel::Untrusted => "untrusted",
            ScoreLevel::Questionable => "questionable",
            ScoreLevel::Neutral => "neutral",
            ScoreLevel::Reputable => "reputable",
            ScoreLevel::Exemplary => "exemplary",
        }
    }

    pub fn range(&self) -> ElementRange {
        let range = &SCORE_RANGES[*self as usize];
        ElementRange {
            min: range.min,
            max: range.max,
        }
    }

    pub fn xp_multiplier(&self) -> f64 {
        score_level_xp_multiplier(*self)
    }
}

impl fmt::Display for ScoreLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoreLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScoreLevel::ALL
            .iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("Unknown score level: {}", s))
    }
}

/// Map a score to its level. Scores outside [0, 2800], or falling between
/// two integer bounds, match no range and are rejected.
pub fn convert_score_to_level(score: f64) -> Result<ScoreLevel, ScoreError> {
    SCORE_RANGES
        .iter()
        .find(|range| range.contains(score))
        .map(|range| range.level)
        .ok_or(ScoreError::InvalidScore(score))
}

/// XP/points scale factor for an actor at the given level
pub fn score_level_xp_multiplier(level: ScoreLevel) -> f64 {
    match level {
        ScoreLevel::Untrusted => 0.2,
        ScoreLevel::Questionable => 0.5,
        ScoreLevel::Neutral => 1.0,
        ScoreLevel::Reputable => 1.25,
        ScoreLevel::Exemplary => 1.5,
    }
}

pub fn scale_xp(points: f64, level: ScoreLevel) -> f64 {
    points * score_level_xp_multiplier(level)
}
