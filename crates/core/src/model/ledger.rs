use std::fmt;
use thiserror::Error;

use crate::model::phase::Phase;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ScoreError {
    #[error("score {0} is outside the 0-10 range")]
    OutOfRange(f64),
}

//
// ─── SCORE LEDGER ──────────────────────────────────────────────────────────────
//

/// Ordered per-round scores for one session, in submission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreLedger {
    scores: Vec<f64>,
}

impl ScoreLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a completed round's score.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::OutOfRange` when the score falls outside 0-10.
    pub fn append(&mut self, score: f64) -> Result<(), ScoreError> {
        if !(0.0..=10.0).contains(&score) {
            return Err(ScoreError::OutOfRange(score));
        }
        self.scores.push(score);
        Ok(())
    }

    #[must_use]
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Arithmetic mean of all recorded scores, rounded to one decimal place.
    ///
    /// `None` when no score has been recorded; asking for the aggregate of an
    /// empty ledger is a caller bug, not a user-facing condition.
    #[must_use]
    pub fn average(&self) -> Option<f64> {
        if self.scores.is_empty() {
            return None;
        }
        let sum: f64 = self.scores.iter().sum();
        let mean = sum / self.scores.len() as f64;
        Some((mean * 10.0).round() / 10.0)
    }
}

//
// ─── VERDICT ───────────────────────────────────────────────────────────────────
//

/// Verdict tier over the session aggregate.
///
/// Band lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Average >= 8.
    Outstanding,
    /// Average >= 6.
    SolidPerformance,
    /// Average >= 4.
    NeedsPractice,
    /// Everything below.
    KeepGrinding,
}

impl Verdict {
    /// Tier for a (rounded) aggregate score.
    #[must_use]
    pub fn for_average(average: f64) -> Self {
        if average >= 8.0 {
            Self::Outstanding
        } else if average >= 6.0 {
            Self::SolidPerformance
        } else if average >= 4.0 {
            Self::NeedsPractice
        } else {
            Self::KeepGrinding
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Verdict::Outstanding => "Outstanding",
            Verdict::SolidPerformance => "Solid Performance",
            Verdict::NeedsPractice => "Needs Practice",
            Verdict::KeepGrinding => "Keep Grinding",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//
// ─── PROGRESS ──────────────────────────────────────────────────────────────────
//

/// Fraction of the session completed, for progress display.
///
/// A round counts as done once its evaluation has been reviewed, so the bar
/// fills on review rather than on advance.
#[must_use]
pub fn progress_fraction(round_index: usize, phase: Phase, total_rounds: usize) -> f64 {
    if total_rounds == 0 {
        return 0.0;
    }
    let done = round_index + usize::from(phase == Phase::Reviewed);
    done as f64 / total_rounds as f64
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger_with(scores: &[f64]) -> ScoreLedger {
        let mut ledger = ScoreLedger::new();
        for &score in scores {
            ledger.append(score).unwrap();
        }
        ledger
    }

    #[test]
    fn average_rounds_to_one_decimal() {
        let ledger = ledger_with(&[7.0, 9.0, 5.0]);
        assert_eq!(ledger.average(), Some(7.0));

        let ledger = ledger_with(&[7.0, 7.0, 8.0]);
        // 22 / 3 = 7.333...
        assert_eq!(ledger.average(), Some(7.3));
    }

    #[test]
    fn average_of_empty_ledger_is_none() {
        assert_eq!(ScoreLedger::new().average(), None);
    }

    #[test]
    fn append_rejects_out_of_range_scores() {
        let mut ledger = ScoreLedger::new();
        assert!(matches!(
            ledger.append(10.1),
            Err(ScoreError::OutOfRange(_))
        ));
        assert!(matches!(
            ledger.append(-0.5),
            Err(ScoreError::OutOfRange(_))
        ));
        assert!(ledger.is_empty());
    }

    #[test]
    fn verdict_solid_performance_at_seven() {
        let ledger = ledger_with(&[7.0, 9.0, 5.0]);
        let average = ledger.average().unwrap();
        assert_eq!(average, 7.0);
        assert_eq!(Verdict::for_average(average), Verdict::SolidPerformance);
        assert_eq!(
            Verdict::for_average(average).label(),
            "Solid Performance"
        );
    }

    #[test]
    fn verdict_outstanding_boundary_is_inclusive() {
        let ledger = ledger_with(&[8.0, 8.0, 8.0]);
        let average = ledger.average().unwrap();
        assert_eq!(average, 8.0);
        assert_eq!(Verdict::for_average(average), Verdict::Outstanding);
    }

    #[test]
    fn verdict_lower_tiers() {
        assert_eq!(Verdict::for_average(6.0), Verdict::SolidPerformance);
        assert_eq!(Verdict::for_average(5.9), Verdict::NeedsPractice);
        assert_eq!(Verdict::for_average(4.0), Verdict::NeedsPractice);
        assert_eq!(Verdict::for_average(3.9), Verdict::KeepGrinding);
    }

    #[test]
    fn progress_counts_reviewed_round_as_done() {
        assert_eq!(progress_fraction(0, Phase::Answering, 3), 0.0);
        assert_eq!(progress_fraction(0, Phase::Reviewed, 3), 1.0 / 3.0);
        assert_eq!(progress_fraction(2, Phase::Reviewed, 3), 1.0);
        assert_eq!(progress_fraction(1, Phase::Evaluating, 3), 1.0 / 3.0);
    }
}
