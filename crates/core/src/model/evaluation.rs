use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum EvaluationError {
    #[error("score {0} is outside the 0-10 range")]
    ScoreOutOfRange(f64),
}

//
// ─── EVALUATION ────────────────────────────────────────────────────────────────
//

/// Structured feedback for one submitted answer.
///
/// Field names match the evaluator's JSON schema, so this deserializes
/// straight off the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Overall score on a 0-10 scale.
    pub score: f64,
    /// Short per-answer verdict label, e.g. "Strong answer".
    pub verdict: String,
    pub technical_accuracy: String,
    pub clarity: String,
    pub depth: String,
    /// What the answer did well, in the evaluator's order.
    pub strengths: Vec<String>,
    /// What to work on, in the evaluator's order.
    pub improvements: Vec<String>,
    /// A model answer for comparison.
    pub ideal_answer: String,
}

impl Evaluation {
    /// Checks that the evaluator kept the score on the 0-10 scale.
    ///
    /// # Errors
    ///
    /// Returns `EvaluationError::ScoreOutOfRange` otherwise; callers treat
    /// that as a malformed response, not a usable evaluation.
    pub fn validate(&self) -> Result<(), EvaluationError> {
        if (0.0..=10.0).contains(&self.score) {
            Ok(())
        } else {
            Err(EvaluationError::ScoreOutOfRange(self.score))
        }
    }

    /// Display tier for this evaluation's score.
    #[must_use]
    pub fn band(&self) -> ScoreBand {
        ScoreBand::for_score(self.score)
    }
}

//
// ─── SCORE BAND ────────────────────────────────────────────────────────────────
//

/// Display tier derived from a score.
///
/// Always recomputed from the score, never stored next to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    /// Score >= 8.
    High,
    /// Score >= 5.
    Medium,
    /// Everything below.
    Low,
}

impl ScoreBand {
    #[must_use]
    pub fn for_score(score: f64) -> Self {
        if score >= 8.0 {
            Self::High
        } else if score >= 5.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
