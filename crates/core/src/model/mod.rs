mod asked;
mod evaluation;
mod ids;
mod ledger;
mod phase;
mod profile;
mod summary;

pub use asked::AskedQuestions;
pub use evaluation::{Evaluation, EvaluationError, ScoreBand};
pub use ids::{QuestionId, SessionId};
pub use ledger::{ScoreError, ScoreLedger, Verdict, progress_fraction};
pub use phase::Phase;
pub use profile::{
    Difficulty, ExperienceLevel, ProfileError, ResumeAttachment, Role, SessionConfig,
};
pub use summary::{SessionSummary, SessionSummaryError};
