#![forbid(unsafe_code)]

pub mod error;
pub mod providers;
pub mod sessions;

pub use interview_core::Clock;

pub use error::{ProviderError, SessionError};
pub use providers::{
    AnswerEvaluator, EvaluationRequest, GeneratedQuestion, InterviewApi, InterviewApiConfig,
    QuestionBank, QuestionProvider, QuestionRequest,
};
pub use sessions::{
    ActiveQuestion, InterviewLoopService, InterviewSession, SessionProgress, SubmitOutcome,
    TOTAL_ROUNDS,
};
