use chrono::{DateTime, Utc};

use interview_core::model::{
    AskedQuestions, Evaluation, Phase, QuestionId, ScoreLedger, SessionConfig, SessionId,
    SessionSummary,
};

use super::progress::SessionProgress;
use crate::error::SessionError;
use crate::providers::{EvaluationRequest, GeneratedQuestion};

/// Rounds per session, fixed across all sessions.
pub const TOTAL_ROUNDS: usize = 3;

/// Minimum trimmed answer length before an evaluation call is allowed.
pub const MIN_ANSWER_CHARS: usize = 10;

const ANSWER_TOO_SHORT: &str = "Please write a more complete answer.";
const NO_QUESTION_LOADED: &str = "No question has been loaded yet. Retry loading the question.";

//
// ─── QUESTION & TICKETS ────────────────────────────────────────────────────────
//

/// The question currently on display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveQuestion {
    pub id: QuestionId,
    pub text: String,
}

/// Proof that an acquisition call was started for a specific session round.
///
/// Only mintable by the session itself; a response resolved with a ticket
/// whose session or round no longer matches is discarded as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    session: SessionId,
    round: usize,
}

/// Proof that an evaluation call was started for a specific session round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalTicket {
    session: SessionId,
    round: usize,
}

/// Result of submitting the drafted answer.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Local validation failed; the phase is unchanged and the message is in
    /// `last_error`. No network call may be made.
    Rejected,
    /// The answer passed validation: perform exactly one evaluation attempt
    /// with the request, then resolve or fail the ticket.
    Evaluate(EvalTicket, EvaluationRequest),
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One practice session from role selection through the final summary.
///
/// Owns every piece of per-session state and all phase transitions. The
/// async workflow drives it; external-call results re-enter through the
/// ticket-checked `resolve_*`/`fail_*` pairs so a response can never be
/// applied to a session or round it was not minted for.
#[derive(Debug, Clone)]
pub struct InterviewSession {
    id: SessionId,
    config: SessionConfig,
    round: usize,
    phase: Phase,
    asked: AskedQuestions,
    question: Option<ActiveQuestion>,
    answer: String,
    evaluation: Option<Evaluation>,
    scores: ScoreLedger,
    last_error: Option<String>,
    started_at: DateTime<Utc>,
}

impl InterviewSession {
    /// Creates a session in `Loading` for round zero.
    #[must_use]
    pub fn new(config: SessionConfig, started_at: DateTime<Utc>) -> Self {
        Self {
            id: SessionId::random(),
            config,
            round: 0,
            phase: Phase::Loading,
            asked: AskedQuestions::new(),
            question: None,
            answer: String::new(),
            evaluation: None,
            scores: ScoreLedger::new(),
            last_error: None,
            started_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Zero-based index of the current round.
    #[must_use]
    pub fn round(&self) -> usize {
        self.round
    }

    #[must_use]
    pub fn total_rounds(&self) -> usize {
        TOTAL_ROUNDS
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn asked(&self) -> &AskedQuestions {
        &self.asked
    }

    #[must_use]
    pub fn question(&self) -> Option<&ActiveQuestion> {
        self.question.as_ref()
    }

    /// The participant's current draft answer.
    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn evaluation(&self) -> Option<&Evaluation> {
        self.evaluation.as_ref()
    }

    #[must_use]
    pub fn scores(&self) -> &ScoreLedger {
        &self.scores
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Summary
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress::of(self)
    }

    //
    // ─── ACQUISITION ───────────────────────────────────────────────────────────
    //

    /// Ticket for the acquisition call of the current round.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Phase` outside `Loading`.
    pub fn load_ticket(&self) -> Result<LoadTicket, SessionError> {
        if self.phase != Phase::Loading {
            return Err(SessionError::Phase(self.phase));
        }
        Ok(LoadTicket {
            session: self.id,
            round: self.round,
        })
    }

    /// Applies a successfully acquired question: records its id in the
    /// exclusion set, makes it current, and moves to `Answering`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::StaleResponse` if the ticket no longer matches
    /// the current session round or the session is not loading; nothing is
    /// mutated in that case.
    pub fn resolve_question(
        &mut self,
        ticket: LoadTicket,
        generated: GeneratedQuestion,
    ) -> Result<(), SessionError> {
        self.check_load_ticket(ticket)?;
        self.asked.record(generated.question_id.clone());
        self.question = Some(ActiveQuestion {
            id: generated.question_id,
            text: generated.question,
        });
        self.phase = Phase::Answering;
        Ok(())
    }

    /// Applies a failed acquisition: surfaces the message and still moves to
    /// `Answering` so the participant is never stuck on a spinner. The
    /// previous question (possibly from an earlier round, possibly absent)
    /// is left as-is and the exclusion set does not grow.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::StaleResponse` for mismatched tickets.
    pub fn fail_question(
        &mut self,
        ticket: LoadTicket,
        message: impl Into<String>,
    ) -> Result<(), SessionError> {
        self.check_load_ticket(ticket)?;
        self.last_error = Some(message.into());
        self.phase = Phase::Answering;
        Ok(())
    }

    /// Re-enters `Loading` to retry a failed acquisition.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Phase` outside `Answering` and
    /// `SessionError::QuestionAlreadyLoaded` once the current round's
    /// question has been acquired; a loaded question cannot be traded away.
    pub fn retry_load(&mut self) -> Result<LoadTicket, SessionError> {
        if self.phase != Phase::Answering {
            return Err(SessionError::Phase(self.phase));
        }
        if self.asked.len() > self.round {
            return Err(SessionError::QuestionAlreadyLoaded);
        }
        self.enter_loading();
        self.load_ticket()
    }

    //
    // ─── ANSWERING ─────────────────────────────────────────────────────────────
    //

    /// Replaces the draft answer text.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Phase` outside `Answering`.
    pub fn set_answer(&mut self, text: impl Into<String>) -> Result<(), SessionError> {
        if self.phase != Phase::Answering {
            return Err(SessionError::Phase(self.phase));
        }
        self.answer = text.into();
        Ok(())
    }

    /// Submits the draft answer.
    ///
    /// Answers shorter than [`MIN_ANSWER_CHARS`] after trimming are rejected
    /// in place with a validation message and no ticket, so no evaluation
    /// call is spent on them. A valid answer moves the session to
    /// `Evaluating` and yields the request for the single evaluation attempt.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Phase` outside `Answering`.
    pub fn submit(&mut self) -> Result<SubmitOutcome, SessionError> {
        if self.phase != Phase::Answering {
            return Err(SessionError::Phase(self.phase));
        }
        let Some(question) = &self.question else {
            self.last_error = Some(NO_QUESTION_LOADED.to_string());
            return Ok(SubmitOutcome::Rejected);
        };
        if self.answer.trim().chars().count() < MIN_ANSWER_CHARS {
            self.last_error = Some(ANSWER_TOO_SHORT.to_string());
            return Ok(SubmitOutcome::Rejected);
        }

        self.last_error = None;
        self.phase = Phase::Evaluating;
        let ticket = EvalTicket {
            session: self.id,
            round: self.round,
        };
        let request = EvaluationRequest {
            question_id: question.id.clone(),
            answer: self.answer.clone(),
            difficulty: self.config.difficulty(),
        };
        Ok(SubmitOutcome::Evaluate(ticket, request))
    }

    //
    // ─── EVALUATION ────────────────────────────────────────────────────────────
    //

    /// Applies a successful evaluation: appends the score to the ledger,
    /// stores the evaluation, and moves to `Reviewed`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::StaleResponse` for mismatched tickets and
    /// `SessionError::Score` if the evaluator returned an out-of-range score
    /// despite adapter validation.
    pub fn resolve_evaluation(
        &mut self,
        ticket: EvalTicket,
        evaluation: Evaluation,
    ) -> Result<(), SessionError> {
        self.check_eval_ticket(ticket)?;
        self.scores.append(evaluation.score)?;
        self.evaluation = Some(evaluation);
        self.phase = Phase::Reviewed;
        Ok(())
    }

    /// Applies a failed evaluation: surfaces the message and returns to
    /// `Answering` with the submitted answer text preserved verbatim, so the
    /// participant can resubmit without retyping.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::StaleResponse` for mismatched tickets.
    pub fn fail_evaluation(
        &mut self,
        ticket: EvalTicket,
        message: impl Into<String>,
    ) -> Result<(), SessionError> {
        self.check_eval_ticket(ticket)?;
        self.last_error = Some(message.into());
        self.phase = Phase::Answering;
        Ok(())
    }

    //
    // ─── ADVANCE & SUMMARY ─────────────────────────────────────────────────────
    //

    /// Moves past a reviewed round: to `Loading` for the next round, or to
    /// the terminal `Summary` after the last one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Phase` outside `Reviewed`.
    pub fn advance(&mut self) -> Result<Phase, SessionError> {
        if self.phase != Phase::Reviewed {
            return Err(SessionError::Phase(self.phase));
        }
        if self.round + 1 < TOTAL_ROUNDS {
            self.round += 1;
            self.enter_loading();
        } else {
            self.phase = Phase::Summary;
        }
        Ok(self.phase)
    }

    /// Builds the aggregate summary for a finished session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Phase` before `Summary`; summary invariant
    /// violations propagate as `SessionError::Summary`.
    pub fn summary(&self, completed_at: DateTime<Utc>) -> Result<SessionSummary, SessionError> {
        if self.phase != Phase::Summary {
            return Err(SessionError::Phase(self.phase));
        }
        Ok(SessionSummary::from_ledger(
            self.config.role().clone(),
            self.config.difficulty(),
            self.started_at,
            completed_at,
            &self.scores,
        )?)
    }

    //
    // ─── INTERNALS ─────────────────────────────────────────────────────────────
    //

    fn enter_loading(&mut self) {
        self.answer.clear();
        self.evaluation = None;
        self.last_error = None;
        self.phase = Phase::Loading;
    }

    fn check_load_ticket(&self, ticket: LoadTicket) -> Result<(), SessionError> {
        if self.phase != Phase::Loading || ticket.session != self.id || ticket.round != self.round
        {
            return Err(SessionError::StaleResponse);
        }
        Ok(())
    }

    fn check_eval_ticket(&self, ticket: EvalTicket) -> Result<(), SessionError> {
        if self.phase != Phase::Evaluating
            || ticket.session != self.id
            || ticket.round != self.round
        {
            return Err(SessionError::StaleResponse);
        }
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use interview_core::model::{Difficulty, ExperienceLevel, Role, Verdict};
    use interview_core::time::fixed_now;

    fn config() -> SessionConfig {
        SessionConfig::new(
            Role::new("backend-developer").unwrap(),
            Difficulty::Medium,
            ExperienceLevel::Mid,
        )
    }

    fn session() -> InterviewSession {
        InterviewSession::new(config(), fixed_now())
    }

    fn generated(id: &str) -> GeneratedQuestion {
        GeneratedQuestion {
            question: format!("Question {id}?"),
            question_id: QuestionId::new(id),
        }
    }

    fn evaluation(score: f64) -> Evaluation {
        Evaluation {
            score,
            verdict: "Good answer".to_string(),
            technical_accuracy: "Accurate".to_string(),
            clarity: "Clear".to_string(),
            depth: "Sufficient".to_string(),
            strengths: vec!["Examples".to_string()],
            improvements: vec!["More depth".to_string()],
            ideal_answer: "Ideally...".to_string(),
        }
    }

    /// Drives the session to `Answering` with a question loaded.
    fn load(session: &mut InterviewSession, id: &str) {
        let ticket = session.load_ticket().unwrap();
        session.resolve_question(ticket, generated(id)).unwrap();
    }

    /// Completes the current round with the given score.
    fn complete_round(session: &mut InterviewSession, id: &str, score: f64) {
        load(session, id);
        session
            .set_answer("A sufficiently detailed answer text.")
            .unwrap();
        let SubmitOutcome::Evaluate(ticket, _) = session.submit().unwrap() else {
            panic!("submission should be accepted");
        };
        session.resolve_evaluation(ticket, evaluation(score)).unwrap();
    }

    #[test]
    fn starts_loading_round_zero() {
        let session = session();
        assert_eq!(session.phase(), Phase::Loading);
        assert_eq!(session.round(), 0);
        assert!(session.question().is_none());
        assert!(session.asked().is_empty());
    }

    #[test]
    fn resolve_question_records_exclusion_and_answers() {
        let mut session = session();
        load(&mut session, "q1");

        assert_eq!(session.phase(), Phase::Answering);
        assert_eq!(session.question().unwrap().id, QuestionId::new("q1"));
        assert!(session.asked().contains(&QuestionId::new("q1")));
        assert_eq!(session.last_error(), None);
    }

    #[test]
    fn failed_acquisition_surfaces_error_and_keeps_exclusions() {
        let mut session = session();
        let ticket = session.load_ticket().unwrap();
        session.fail_question(ticket, "Network error. Please try again.").unwrap();

        assert_eq!(session.phase(), Phase::Answering);
        assert!(session.question().is_none());
        assert!(session.asked().is_empty());
        assert_eq!(session.last_error(), Some("Network error. Please try again."));
    }

    #[test]
    fn retry_load_allowed_only_before_acquisition_succeeds() {
        let mut session = session();
        let ticket = session.load_ticket().unwrap();
        session.fail_question(ticket, "boom").unwrap();

        let ticket = session.retry_load().unwrap();
        assert_eq!(session.phase(), Phase::Loading);
        session.resolve_question(ticket, generated("q1")).unwrap();

        let err = session.retry_load().unwrap_err();
        assert_eq!(err, SessionError::QuestionAlreadyLoaded);
    }

    #[test]
    fn short_answer_is_rejected_without_phase_change() {
        let mut session = session();
        load(&mut session, "q1");
        session.set_answer("too short").unwrap();

        let outcome = session.submit().unwrap();
        assert_eq!(outcome, SubmitOutcome::Rejected);
        assert_eq!(session.phase(), Phase::Answering);
        assert_eq!(session.last_error(), Some(ANSWER_TOO_SHORT));
    }

    #[test]
    fn length_check_runs_on_the_trimmed_answer() {
        let mut session = session();
        load(&mut session, "q1");

        // 10+ characters of padding around a 4-character answer.
        session.set_answer("      tiny      ").unwrap();
        assert_eq!(session.submit().unwrap(), SubmitOutcome::Rejected);

        session.set_answer("   short answer    ").unwrap();
        assert!(matches!(session.submit().unwrap(), SubmitOutcome::Evaluate(..)));
    }

    #[test]
    fn valid_submission_moves_to_evaluating_and_clears_error() {
        let mut session = session();
        load(&mut session, "q1");
        session.set_answer("short").unwrap();
        assert_eq!(session.submit().unwrap(), SubmitOutcome::Rejected);
        assert!(session.last_error().is_some());

        session.set_answer("A complete answer with plenty of detail.").unwrap();
        let SubmitOutcome::Evaluate(_, request) = session.submit().unwrap() else {
            panic!("expected evaluation");
        };
        assert_eq!(session.phase(), Phase::Evaluating);
        assert_eq!(session.last_error(), None);
        assert_eq!(request.question_id, QuestionId::new("q1"));
        assert_eq!(request.answer, "A complete answer with plenty of detail.");
        assert_eq!(request.difficulty, Difficulty::Medium);
    }

    #[test]
    fn submit_without_question_is_rejected_locally() {
        let mut session = session();
        let ticket = session.load_ticket().unwrap();
        session.fail_question(ticket, "no luck").unwrap();

        // Answering phase, no question: answer can be typed but not sent.
        session.set_answer("A perfectly long answer without a question.").unwrap();
        assert_eq!(session.submit().unwrap(), SubmitOutcome::Rejected);
        assert_eq!(session.last_error(), Some(NO_QUESTION_LOADED));
    }

    #[test]
    fn evaluation_failure_preserves_the_answer() {
        let mut session = session();
        load(&mut session, "q1");
        let text = "My carefully worded submission text.";
        session.set_answer(text).unwrap();
        let SubmitOutcome::Evaluate(ticket, _) = session.submit().unwrap() else {
            panic!("expected evaluation");
        };

        session.fail_evaluation(ticket, "Failed to evaluate answer").unwrap();
        assert_eq!(session.phase(), Phase::Answering);
        assert_eq!(session.answer(), text);
        assert!(session.last_error().is_some());

        // Resubmitting the identical text succeeds once the evaluator does.
        let SubmitOutcome::Evaluate(ticket, request) = session.submit().unwrap() else {
            panic!("expected evaluation");
        };
        assert_eq!(request.answer, text);
        session.resolve_evaluation(ticket, evaluation(6.0)).unwrap();
        assert_eq!(session.phase(), Phase::Reviewed);
    }

    #[test]
    fn successful_evaluation_updates_ledger_and_reviews() {
        let mut session = session();
        complete_round(&mut session, "q1", 7.5);

        assert_eq!(session.phase(), Phase::Reviewed);
        assert_eq!(session.scores().scores(), [7.5]);
        assert_eq!(session.evaluation().unwrap().score, 7.5);
    }

    #[test]
    fn advance_clears_round_state_and_increments() {
        let mut session = session();
        complete_round(&mut session, "q1", 7.0);

        assert_eq!(session.advance().unwrap(), Phase::Loading);
        assert_eq!(session.round(), 1);
        assert_eq!(session.answer(), "");
        assert!(session.evaluation().is_none());
        assert_eq!(session.last_error(), None);
        // The previous question remains visible until the next one lands.
        assert!(session.question().is_some());
    }

    #[test]
    fn three_reviewed_rounds_end_in_summary() {
        let mut session = session();
        complete_round(&mut session, "q1", 7.0);
        session.advance().unwrap();
        complete_round(&mut session, "q2", 9.0);
        session.advance().unwrap();
        complete_round(&mut session, "q3", 5.0);

        assert_eq!(session.advance().unwrap(), Phase::Summary);
        assert!(session.is_complete());
        assert_eq!(session.scores().scores(), [7.0, 9.0, 5.0]);
        assert_eq!(session.asked().len(), TOTAL_ROUNDS);

        let summary = session.summary(fixed_now()).unwrap();
        assert_eq!(summary.average(), 7.0);
        assert_eq!(summary.verdict(), Verdict::SolidPerformance);
    }

    #[test]
    fn summary_is_terminal() {
        let mut session = session();
        for (id, score) in [("q1", 8.0), ("q2", 8.0), ("q3", 8.0)] {
            complete_round(&mut session, id, score);
            session.advance().unwrap();
        }
        assert!(session.is_complete());

        assert!(matches!(session.advance(), Err(SessionError::Phase(_))));
        assert!(matches!(session.set_answer("x"), Err(SessionError::Phase(_))));
        assert!(matches!(session.submit(), Err(SessionError::Phase(_))));
        assert!(matches!(session.load_ticket(), Err(SessionError::Phase(_))));
    }

    #[test]
    fn stale_question_ticket_is_rejected() {
        let mut session = session();
        let old_ticket = session.load_ticket().unwrap();
        session.resolve_question(old_ticket, generated("q1")).unwrap();

        // The round moved on; the late duplicate response must not apply.
        let err = session
            .resolve_question(old_ticket, generated("q-late"))
            .unwrap_err();
        assert_eq!(err, SessionError::StaleResponse);
        assert_eq!(session.question().unwrap().id, QuestionId::new("q1"));
        assert_eq!(session.asked().len(), 1);
    }

    #[test]
    fn stale_evaluation_from_discarded_session_mutates_nothing() {
        let mut old_session = session();
        load(&mut old_session, "q1");
        old_session.set_answer("An answer from the first session.").unwrap();
        let SubmitOutcome::Evaluate(old_ticket, _) = old_session.submit().unwrap() else {
            panic!("expected evaluation");
        };

        // Restart: the old session is discarded and a new one begins.
        let mut fresh = session();
        load(&mut fresh, "q1");
        fresh.set_answer("An answer from the fresh session.").unwrap();
        let SubmitOutcome::Evaluate(_, _) = fresh.submit().unwrap() else {
            panic!("expected evaluation");
        };

        let err = fresh
            .resolve_evaluation(old_ticket, evaluation(9.9))
            .unwrap_err();
        assert_eq!(err, SessionError::StaleResponse);
        assert!(fresh.evaluation().is_none());
        assert!(fresh.scores().is_empty());
    }

    #[test]
    fn asked_ids_never_exceed_total_rounds() {
        let mut session = session();
        for (id, score) in [("q1", 6.0), ("q2", 6.0), ("q3", 6.0)] {
            complete_round(&mut session, id, score);
            session.advance().unwrap();
        }
        assert_eq!(session.asked().len(), TOTAL_ROUNDS);
        let snapshot = session.asked().snapshot();
        let mut unique = snapshot.to_vec();
        unique.dedup();
        assert_eq!(unique.len(), snapshot.len());
    }
}
