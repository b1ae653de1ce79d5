//! Star scores and per-star vote histograms.

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Lowest accepted star rating.
pub const MIN_SCORE: i32 = 1;

/// Highest accepted star rating.
pub const MAX_SCORE: i32 = 5;

/// A validated 1-5 star rating.
///
/// The database carries a CHECK constraint with the same bounds; this type
/// keeps invalid scores out of the write path before a connection is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(try_from = "i32", into = "i32")]
pub struct Score(i32);

impl Score {
    /// Create a score, rejecting values outside [1,5].
    pub fn new(value: i32) -> Result<Self, DomainError> {
        if !(MIN_SCORE..=MAX_SCORE).contains(&value) {
            return Err(DomainError::ScoreOutOfRange { value });
        }
        Ok(Self(value))
    }

    /// The raw star value.
    pub fn value(&self) -> i32 {
        self.0
    }

    /// Average-score percentage: `avg / 5 * 100`.
    pub fn percentage_of(average: f64) -> f64 {
        (average / MAX_SCORE as f64) * 100.0
    }
}

impl TryFrom<i32> for Score {
    type Error = DomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Score> for i32 {
    fn from(score: Score) -> i32 {
        score.0
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Vote counts per star value, as shown on the leaderboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ScoreHistogram {
    pub score_1: i64,
    pub score_2: i64,
    pub score_3: i64,
    pub score_4: i64,
    pub score_5: i64,
}

impl ScoreHistogram {
    /// Record one vote with the given star value.
    pub fn record(&mut self, score: Score) {
        match score.value() {
            1 => self.score_1 += 1,
            2 => self.score_2 += 1,
            3 => self.score_3 += 1,
            4 => self.score_4 += 1,
            _ => self.score_5 += 1,
        }
    }

    /// Total number of recorded votes.
    pub fn total(&self) -> i64 {
        self.score_1 + self.score_2 + self.score_3 + self.score_4 + self.score_5
    }

    /// Mean star value, or None when no votes are recorded.
    pub fn average(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let weighted = self.score_1
            + 2 * self.score_2
            + 3 * self.score_3
            + 4 * self.score_4
            + 5 * self.score_5;
        Some(weighted as f64 / total as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_score_bounds() {
        assert!(Score::new(0).is_err());
        assert!(Score::new(6).is_err());
        assert!(Score::new(1).is_ok());
        assert!(Score::new(5).is_ok());
    }

    #[test]
    fn test_score_serde_roundtrip() -> Result<(), serde_json::Error> {
        let score = Score::new(4).unwrap();
        let json = serde_json::to_string(&score)?;
        assert_eq!(json, "4");
        let back: Score = serde_json::from_str(&json)?;
        assert_eq!(back, score);

        // Out-of-range values are rejected at deserialization time.
        assert!(serde_json::from_str::<Score>("9").is_err());
        Ok(())
    }

    #[test]
    fn test_percentage() {
        assert_eq!(Score::percentage_of(5.0), 100.0);
        assert_eq!(Score::percentage_of(2.5), 50.0);
    }

    #[test]
    fn test_histogram_average() {
        let mut hist = ScoreHistogram::default();
        assert_eq!(hist.average(), None);

        hist.record(Score::new(5).unwrap());
        hist.record(Score::new(5).unwrap());
        hist.record(Score::new(2).unwrap());
        assert_eq!(hist.total(), 3);
        assert_eq!(hist.average(), Some(4.0));
    }

    proptest! {
        #[test]
        fn prop_score_accepts_exactly_1_to_5(value in -100i32..100) {
            let result = Score::new(value);
            prop_assert_eq!(result.is_ok(), (1..=5).contains(&value));
        }

        #[test]
        fn prop_histogram_average_in_range(counts in proptest::array::uniform5(0i64..1000)) {
            let hist = ScoreHistogram {
                score_1: counts[0],
                score_2: counts[1],
                score_3: counts[2],
                score_4: counts[3],
                score_5: counts[4],
            };
            if let Some(avg) = hist.average() {
                prop_assert!((1.0..=5.0).contains(&avg));
            } else {
                prop_assert_eq!(hist.total(), 0);
            }
        }
    }
}
