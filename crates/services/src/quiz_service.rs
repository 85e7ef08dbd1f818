use std::sync::Arc;

use storage::repository::QuestionRepository;
use trivia_core::Sampler;
use trivia_core::model::Question;
use trivia_core::quiz::{self, QuizRequest};

use crate::error::QuizServiceError;

/// Serves one random unseen question per quiz round.
#[derive(Clone)]
pub struct QuizService {
    sampler: Sampler,
    questions: Arc<dyn QuestionRepository>,
}

impl QuizService {
    #[must_use]
    pub fn new(sampler: Sampler, questions: Arc<dyn QuestionRepository>) -> Self {
        Self { sampler, questions }
    }

    /// Pick the next question for a quiz round.
    ///
    /// Returns `Ok(None)` once every question of the category appears in the
    /// request's history. The request itself is left untouched; the client
    /// appends the returned id before asking again.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if repository access fails.
    pub async fn next_question(
        &self,
        request: &QuizRequest,
    ) -> Result<Option<Question>, QuizServiceError> {
        let pool = self
            .questions
            .questions_by_category(request.category().category_id())
            .await?;
        let picked = quiz::select_question(pool, request, &self.sampler);
        match &picked {
            Some(question) => tracing::debug!(question_id = %question.id(), "quiz question selected"),
            None => tracing::debug!(
                seen = request.previous_questions().len(),
                "quiz category exhausted"
            ),
        }
        Ok(picked)
    }
}
