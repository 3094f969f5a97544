use std::collections::HashMap;

use async_trait::async_trait;
use rand::seq::IndexedRandom;

use interview_core::model::{Difficulty, QuestionId, Role};

use super::{GeneratedQuestion, QuestionProvider, QuestionRequest};
use crate::error::ProviderError;

#[derive(Debug, Clone)]
struct BankEntry {
    id: QuestionId,
    text: String,
}

/// In-memory question source, usable offline and as a deterministic fixture.
///
/// Picks uniformly at random among the questions for a role and difficulty
/// that are outside the exclusion set. An empty remainder is reported as
/// `ProviderError::Exhausted` rather than repeating a question.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    entries: HashMap<(String, Difficulty), Vec<BankEntry>>,
}

impl QuestionBank {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a question under the given role and difficulty.
    #[must_use]
    pub fn with_question(
        mut self,
        role: &Role,
        difficulty: Difficulty,
        id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.entries
            .entry((role.as_str().to_string(), difficulty))
            .or_default()
            .push(BankEntry {
                id: QuestionId::new(id),
                text: text.into(),
            });
        self
    }

    /// Number of questions stored for a role and difficulty.
    #[must_use]
    pub fn pool_size(&self, role: &Role, difficulty: Difficulty) -> usize {
        self.entries
            .get(&(role.as_str().to_string(), difficulty))
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl QuestionProvider for QuestionBank {
    async fn generate_question(
        &self,
        request: &QuestionRequest,
    ) -> Result<GeneratedQuestion, ProviderError> {
        let key = (request.role.as_str().to_string(), request.difficulty);
        let candidates: Vec<&BankEntry> = self
            .entries
            .get(&key)
            .map(|pool| {
                pool.iter()
                    .filter(|entry| !request.exclude_ids.contains(&entry.id))
                    .collect()
            })
            .unwrap_or_default();

        let mut rng = rand::rng();
        let entry = candidates
            .choose(&mut rng)
            .ok_or(ProviderError::Exhausted)?;

        Ok(GeneratedQuestion {
            question: entry.text.clone(),
            question_id: entry.id.clone(),
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
