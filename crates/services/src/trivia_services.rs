use std::sync::Arc;

use storage::repository::Storage;
use trivia_core::Sampler;

use crate::category_service::CategoryService;
use crate::error::AppServicesError;
use crate::question_service::QuestionService;
use crate::quiz_service::QuizService;

/// Assembles the services behind the HTTP layer from one `Storage`.
#[derive(Clone)]
pub struct TriviaServices {
    categories: Arc<CategoryService>,
    questions: Arc<QuestionService>,
    quiz: Arc<QuizService>,
}

impl TriviaServices {
    #[must_use]
    pub fn new(storage: &Storage, sampler: Sampler, page_size: u32) -> Self {
        let categories = Arc::new(CategoryService::new(Arc::clone(&storage.categories)));
        let questions = Arc::new(QuestionService::new(
            page_size,
            Arc::clone(&storage.questions),
            Arc::clone(&storage.categories),
        ));
        let quiz = Arc::new(QuizService::new(sampler, Arc::clone(&storage.questions)));
        Self {
            categories,
            questions,
            quiz,
        }
    }

    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn sqlite(
        db_url: &str,
        sampler: Sampler,
        page_size: u32,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::new(&storage, sampler, page_size))
    }

    #[must_use]
    pub fn categories(&self) -> Arc<CategoryService> {
        Arc::clone(&self.categories)
    }

    #[must_use]
    pub fn questions(&self) -> Arc<QuestionService> {
        Arc::clone(&self.questions)
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }
}
