use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle phase of an interview session.
///
/// A closed set of five states; every orchestrator transition is expressed
/// between these variants, so combinations like "evaluating with no pending
/// call" are unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// A question is being acquired for the current round.
    Loading,
    /// The participant is drafting an answer.
    Answering,
    /// The submitted answer is out for evaluation.
    Evaluating,
    /// The evaluation for the current round is on display.
    Reviewed,
    /// Terminal: the session is complete and the aggregate is available.
    Summary,
}

impl Phase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Loading => "loading",
            Phase::Answering => "answering",
            Phase::Evaluating => "evaluating",
            Phase::Reviewed => "reviewed",
            Phase::Summary => "summary",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
