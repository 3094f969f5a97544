use serde::{Deserialize, Serialize};

use crate::model::ids::QuestionId;

/// Append-only record of the question ids already shown in a session.
///
/// The snapshot is passed as the exclusion filter on the next acquisition
/// call so the provider does not repeat itself. Ids are never removed; the
/// set grows monotonically for the life of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskedQuestions {
    ids: Vec<QuestionId>,
}

impl AskedQuestions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an id unless it is already present.
    ///
    /// Returns whether the id was newly added.
    pub fn record(&mut self, id: QuestionId) -> bool {
        if self.ids.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Ordered ids for use as the next exclusion filter.
    #[must_use]
    pub fn snapshot(&self) -> &[QuestionId] {
        &self.ids
    }

    #[must_use]
    pub fn contains(&self, id: &QuestionId) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
