use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ledger::{ScoreLedger, Verdict};
use crate::model::profile::{Difficulty, Role};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionSummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("summary requires at least one recorded score")]
    NoScores,
}

/// Aggregate outcome of a completed interview session.
///
/// Built exactly once when the session reaches its terminal phase; the
/// verdict is derived from the rounded average at construction time.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    role: Role,
    difficulty: Difficulty,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    scores: Vec<f64>,
    average: f64,
    verdict: Verdict,
}

impl SessionSummary {
    /// Builds the summary from a completed session's ledger.
    ///
    /// # Errors
    ///
    /// Returns `SessionSummaryError::InvalidTimeRange` if `completed_at` is
    /// before `started_at`, and `SessionSummaryError::NoScores` for an empty
    /// ledger. Both indicate caller bugs rather than recoverable conditions.
    pub fn from_ledger(
        role: Role,
        difficulty: Difficulty,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        ledger: &ScoreLedger,
    ) -> Result<Self, SessionSummaryError> {
        if completed_at < started_at {
            return Err(SessionSummaryError::InvalidTimeRange);
        }
        let average = ledger.average().ok_or(SessionSummaryError::NoScores)?;

        Ok(Self {
            role,
            difficulty,
            started_at,
            completed_at,
            scores: ledger.scores().to_vec(),
            average,
            verdict: Verdict::for_average(average),
        })
    }

    #[must_use]
    pub fn role(&self) -> &Role {
        &self.role
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Per-round scores in submission order.
    #[must_use]
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    #[must_use]
    pub fn average(&self) -> f64 {
        self.average
    }

    #[must_use]
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
