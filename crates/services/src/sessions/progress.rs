use interview_core::model::{Phase, progress_fraction};

use super::service::InterviewSession;

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionProgress {
    /// One-based round number for display, capped at the total.
    pub round: usize,
    pub total_rounds: usize,
    /// Rounds with a recorded score.
    pub answered: usize,
    /// Completion fraction in [0, 1]; a round counts once it is reviewed.
    pub fraction: f64,
    pub is_complete: bool,
}

impl SessionProgress {
    #[must_use]
    pub fn of(session: &InterviewSession) -> Self {
        let total = session.total_rounds();
        Self {
            round: (session.round() + 1).min(total),
            total_rounds: total,
            answered: session.scores().len(),
            fraction: progress_fraction(session.round(), session.phase(), total),
            is_complete: session.phase() == Phase::Summary,
        }
    }
}
