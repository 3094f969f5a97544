use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

use interview_core::model::Evaluation;

use super::{
    AnswerEvaluator, EvaluationRequest, GeneratedQuestion, QuestionProvider, QuestionRequest,
};
use crate::error::ProviderError;

/// Caller-side request deadline. A hung provider resolves into the normal
/// failure path instead of stalling the session.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug)]
pub struct InterviewApiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl InterviewApiConfig {
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let base_url = env::var("INTERVIEW_API_BASE_URL").ok()?;
        if base_url.trim().is_empty() {
            return None;
        }
        let api_key = env::var("INTERVIEW_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        Some(Self { base_url, api_key })
    }
}

/// HTTP adapter implementing both provider ports against the interview API:
/// `POST {base}/generate-question` and `POST {base}/evaluate-answer`.
#[derive(Clone)]
pub struct InterviewApi {
    client: Client,
    config: Option<InterviewApiConfig>,
}

impl InterviewApi {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(InterviewApiConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<InterviewApiConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ProviderError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let config = self.config.as_ref().ok_or(ProviderError::Disabled)?;
        let url = format!("{}/{}", config.base_url.trim_end_matches('/'), path);

        let mut request = self
            .client
            .post(url)
            .timeout(REQUEST_TIMEOUT)
            .json(body);
        if let Some(key) = &config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body: ErrorBody = response.json().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status,
                message: body.error,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl QuestionProvider for InterviewApi {
    async fn generate_question(
        &self,
        request: &QuestionRequest,
    ) -> Result<GeneratedQuestion, ProviderError> {
        let generated: GeneratedQuestion = self.post("generate-question", request).await?;
        if generated.question.trim().is_empty() {
            return Err(ProviderError::Malformed("empty question text".to_string()));
        }
        if generated.question_id.as_str().trim().is_empty() {
            return Err(ProviderError::Malformed("empty question id".to_string()));
        }
        Ok(generated)
    }
}

#[async_trait]
impl AnswerEvaluator for InterviewApi {
    async fn evaluate_answer(
        &self,
        request: &EvaluationRequest,
    ) -> Result<Evaluation, ProviderError> {
        let envelope: EvaluationEnvelope = self.post("evaluate-answer", request).await?;
        envelope
            .evaluation
            .validate()
            .map_err(|err| ProviderError::Malformed(err.to_string()))?;
        Ok(envelope.evaluation)
    }
}

#[derive(Debug, Default, serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: String,
}

#[derive(Debug, serde::Deserialize)]
struct EvaluationEnvelope {
    evaluation: Evaluation,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
