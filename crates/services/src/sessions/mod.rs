mod progress;
mod service;
mod workflow;

pub use progress::SessionProgress;
pub use service::{
    ActiveQuestion, EvalTicket, InterviewSession, LoadTicket, MIN_ANSWER_CHARS, SubmitOutcome,
    TOTAL_ROUNDS,
};
pub use workflow::InterviewLoopService;
