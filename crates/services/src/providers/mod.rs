//! Provider ports for the two external collaborators.
//!
//! One production adapter exists per port (`InterviewApi`), but the traits
//! are the substitution seam: tests drive the orchestrator with
//! deterministic doubles and nothing downstream can tell the difference.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use interview_core::model::{Difficulty, Evaluation, QuestionId, Role};

use crate::error::ProviderError;

mod bank;
mod http;

pub use bank::QuestionBank;
pub use http::{InterviewApi, InterviewApiConfig};

//
// ─── PAYLOADS ──────────────────────────────────────────────────────────────────
//

/// Request for one interview question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRequest {
    pub role: Role,
    pub difficulty: Difficulty,
    /// Ids of questions already shown; the provider must not repeat them.
    pub exclude_ids: Vec<QuestionId>,
}

/// A freshly generated question and its provider-issued id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestion {
    pub question: String,
    pub question_id: QuestionId,
}

/// Request to grade a submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRequest {
    pub question_id: QuestionId,
    pub answer: String,
    pub difficulty: Difficulty,
}

//
// ─── PORTS ─────────────────────────────────────────────────────────────────────
//

/// Source of role- and difficulty-specific questions.
#[async_trait]
pub trait QuestionProvider: Send + Sync {
    /// Returns a question outside the request's exclusion set.
    async fn generate_question(
        &self,
        request: &QuestionRequest,
    ) -> Result<GeneratedQuestion, ProviderError>;
}

/// Grades free-text answers into a structured evaluation.
#[async_trait]
pub trait AnswerEvaluator: Send + Sync {
    async fn evaluate_answer(
        &self,
        request: &EvaluationRequest,
    ) -> Result<Evaluation, ProviderError>;
}
