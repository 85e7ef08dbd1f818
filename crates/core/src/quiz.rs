//! Quiz question selection.
//!
//! A quiz is stateless on the server: every request carries the ids the
//! player has already seen, and the selector answers with one random unseen
//! question from the requested category or with `None` once the category is
//! exhausted.

use std::collections::BTreeSet;

use crate::model::{CategoryId, Question, QuestionId};
use crate::random::Sampler;

/// Category scope of a quiz. Clients send id `0` for "all categories".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizCategory {
    All,
    Only(CategoryId),
}

impl QuizCategory {
    #[must_use]
    pub fn from_raw(id: u64) -> Self {
        if id == 0 {
            Self::All
        } else {
            Self::Only(CategoryId::new(id))
        }
    }

    /// The concrete category, or `None` for `All`.
    #[must_use]
    pub fn category_id(&self) -> Option<CategoryId> {
        match self {
            Self::All => None,
            Self::Only(id) => Some(*id),
        }
    }

    #[must_use]
    pub fn includes(&self, category: CategoryId) -> bool {
        match self {
            Self::All => true,
            Self::Only(id) => *id == category,
        }
    }
}

/// One quiz round as sent by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRequest {
    category: QuizCategory,
    previous_questions: BTreeSet<QuestionId>,
}

impl QuizRequest {
    #[must_use]
    pub fn new(
        category: QuizCategory,
        previous_questions: impl IntoIterator<Item = QuestionId>,
    ) -> Self {
        Self {
            category,
            previous_questions: previous_questions.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn category(&self) -> QuizCategory {
        self.category
    }

    #[must_use]
    pub fn previous_questions(&self) -> &BTreeSet<QuestionId> {
        &self.previous_questions
    }

    #[must_use]
    pub fn has_seen(&self, id: QuestionId) -> bool {
        self.previous_questions.contains(&id)
    }
}

/// Questions from `pool` that belong to the requested category and have not
/// been seen yet, in pool order.
pub fn candidates(pool: impl IntoIterator<Item = Question>, request: &QuizRequest) -> Vec<Question> {
    pool.into_iter()
        .filter(|q| request.category().includes(q.category()))
        .filter(|q| !request.has_seen(q.id()))
        .collect()
}

/// Pick the next quiz question, or `None` when every candidate was seen.
pub fn select_question(
    pool: impl IntoIterator<Item = Question>,
    request: &QuizRequest,
    sampler: &Sampler,
) -> Option<Question> {
    let candidates = candidates(pool, request);
    sampler.choose(&candidates).cloned()
}
