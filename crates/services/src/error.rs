//! Shared error types for the services crate.

use thiserror::Error;

use interview_core::model::{Phase, ScoreError, SessionSummaryError};

/// Errors emitted by provider adapters.
///
/// These never reach the participant directly; the workflow maps them to the
/// human-readable message stored in the session's `last_error`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProviderError {
    #[error("provider is not configured")]
    Disabled,

    #[error("provider request failed with status {status}: {message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("malformed provider response: {0}")]
    Malformed(String),

    #[error("no unseen questions left for this role and difficulty")]
    Exhausted,
}

/// Errors emitted by the session state machine.
///
/// Phase misuse and stale responses are programming or coordination faults,
/// distinct from the recoverable provider failures carried in `last_error`.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("action not allowed while {0}")]
    Phase(Phase),

    #[error("response does not belong to the current session round")]
    StaleResponse,

    #[error("a question is already loaded for this round")]
    QuestionAlreadyLoaded,

    #[error(transparent)]
    Score(#[from] ScoreError),

    #[error(transparent)]
    Summary(#[from] SessionSummaryError),
}
