use std::sync::Arc;

use interview_core::Clock;
use interview_core::model::{Phase, SessionConfig, SessionSummary};

use super::service::{InterviewSession, SubmitOutcome};
use crate::error::{ProviderError, SessionError};
use crate::providers::{AnswerEvaluator, QuestionProvider, QuestionRequest};

const GENERATE_FALLBACK: &str = "Failed to generate question";
const EVALUATE_FALLBACK: &str = "Failed to evaluate answer";
const NETWORK_ERROR: &str = "Network error. Please try again.";

/// Drives interview sessions over the provider ports.
///
/// Holds the providers and a clock; all per-session state lives in the
/// `InterviewSession` values it hands out, so independent sessions never
/// interfere. The exclusive borrow taken for each call keeps a session
/// non-reentrant while an acquisition or evaluation is in flight.
#[derive(Clone)]
pub struct InterviewLoopService {
    clock: Clock,
    questions: Arc<dyn QuestionProvider>,
    evaluator: Arc<dyn AnswerEvaluator>,
}

impl InterviewLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        questions: Arc<dyn QuestionProvider>,
        evaluator: Arc<dyn AnswerEvaluator>,
    ) -> Self {
        Self {
            clock,
            questions,
            evaluator,
        }
    }

    /// Starts a new session for the given configuration.
    #[must_use]
    pub fn start_session(&self, config: SessionConfig) -> InterviewSession {
        InterviewSession::new(config, self.clock.now())
    }

    /// Acquires a question for the current round.
    ///
    /// Provider failures are recoverable: they land in the session's
    /// `last_error` and the call still returns `Ok`, with the session in
    /// `Answering` either way.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Phase` when the session is not loading.
    pub async fn load_question(&self, session: &mut InterviewSession) -> Result<(), SessionError> {
        let ticket = session.load_ticket()?;
        let request = QuestionRequest {
            role: session.config().role().clone(),
            difficulty: session.config().difficulty(),
            exclude_ids: session.asked().snapshot().to_vec(),
        };

        match self.questions.generate_question(&request).await {
            Ok(generated) => session.resolve_question(ticket, generated),
            Err(err) => {
                tracing::warn!(error = %err, round = session.round(), "question acquisition failed");
                session.fail_question(ticket, acquisition_message(&err))
            }
        }
    }

    /// Re-enters `Loading` and retries a failed acquisition.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::QuestionAlreadyLoaded` once the round's
    /// question has landed, and `SessionError::Phase` outside `Answering`.
    pub async fn retry_question(
        &self,
        session: &mut InterviewSession,
    ) -> Result<(), SessionError> {
        session.retry_load()?;
        self.load_question(session).await
    }

    /// Submits the drafted answer and performs at most one evaluation
    /// attempt; re-submission after a failure is a new explicit call.
    ///
    /// Validation rejections and evaluator failures are recoverable and
    /// surface through `last_error`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Phase` when the session is not answering.
    pub async fn submit_answer(&self, session: &mut InterviewSession) -> Result<(), SessionError> {
        match session.submit()? {
            SubmitOutcome::Rejected => Ok(()),
            SubmitOutcome::Evaluate(ticket, request) => {
                match self.evaluator.evaluate_answer(&request).await {
                    Ok(evaluation) => session.resolve_evaluation(ticket, evaluation),
                    Err(err) => {
                        tracing::warn!(error = %err, round = session.round(), "evaluation failed");
                        session.fail_evaluation(ticket, evaluation_message(&err))
                    }
                }
            }
        }
    }

    /// Advances past a reviewed round, loading the next question when one
    /// remains. Returns the phase the session lands in (`Answering` after a
    /// load attempt, `Summary` after the final round).
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Phase` when the session is not reviewed.
    pub async fn next_round(&self, session: &mut InterviewSession) -> Result<Phase, SessionError> {
        if session.advance()? == Phase::Loading {
            self.load_question(session).await?;
        }
        Ok(session.phase())
    }

    /// Builds the aggregate summary, stamped with the clock's current time.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Phase` before the session is complete.
    pub fn finish(&self, session: &InterviewSession) -> Result<SessionSummary, SessionError> {
        session.summary(self.clock.now())
    }
}

/// User-facing message for a failed acquisition. Server-reported errors are
/// shown as-is; transport problems collapse into one retryable message.
fn acquisition_message(err: &ProviderError) -> String {
    match err {
        ProviderError::Api { message, .. } if !message.is_empty() => message.clone(),
        ProviderError::Api { .. } => GENERATE_FALLBACK.to_string(),
        ProviderError::Http(_) => NETWORK_ERROR.to_string(),
        ProviderError::Disabled | ProviderError::Malformed(_) | ProviderError::Exhausted => {
            err.to_string()
        }
    }
}

fn evaluation_message(err: &ProviderError) -> String {
    match err {
        ProviderError::Api { message, .. } if !message.is_empty() => message.clone(),
        ProviderError::Api { .. } => EVALUATE_FALLBACK.to_string(),
        ProviderError::Http(_) => NETWORK_ERROR.to_string(),
        ProviderError::Disabled | ProviderError::Malformed(_) | ProviderError::Exhausted => {
            err.to_string()
        }
    }
}
