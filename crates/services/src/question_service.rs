use std::sync::Arc;

use storage::repository::{CategoryRepository, QuestionRepository, StorageError};
use trivia_core::model::{Category, CategoryId, Question, QuestionDraft, QuestionId};
use trivia_core::pagination::{self, PageRequest};

use crate::error::QuestionServiceError;

/// One page of questions plus the context a listing view needs.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total_questions: u64,
    pub categories: Vec<Category>,
}

/// Every question of a single category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryQuestions {
    pub category: Category,
    pub questions: Vec<Question>,
}

/// Orchestrates question listing, creation, deletion and search.
#[derive(Clone)]
pub struct QuestionService {
    page_size: u32,
    questions: Arc<dyn QuestionRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl QuestionService {
    #[must_use]
    pub fn new(
        page_size: u32,
        questions: Arc<dyn QuestionRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            page_size: page_size.max(1),
            questions,
            categories,
        }
    }

    /// Fetch a page of questions, refusing pages that hold no data.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::PageOutOfRange` when the page is empty,
    /// including page 0 and any page of an empty store.
    /// Returns `QuestionServiceError::Storage` if repository access fails.
    pub async fn list_page(&self, page: u32) -> Result<QuestionPage, QuestionServiceError> {
        let total_questions = self.questions.count_questions().await?;
        let out_of_range = QuestionServiceError::PageOutOfRange {
            page,
            total_pages: pagination::total_pages(total_questions, self.page_size),
        };
        let Ok(request) = PageRequest::new(page, self.page_size) else {
            return Err(out_of_range);
        };
        if !request.is_within(total_questions) {
            tracing::debug!(page, total_questions, "requested page is past the end");
            return Err(out_of_range);
        }

        self.load_page(request, total_questions).await
    }

    /// Fetch a page of questions without the range check.
    ///
    /// Used to refresh a listing after a mutation, where an empty page is a
    /// valid answer. Page 0 is read as page 1.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Storage` if repository access fails.
    pub async fn page_snapshot(&self, page: u32) -> Result<QuestionPage, QuestionServiceError> {
        let total_questions = self.questions.count_questions().await?;
        let request = PageRequest::new(page.max(1), self.page_size)?;
        self.load_page(request, total_questions).await
    }

    async fn load_page(
        &self,
        request: PageRequest,
        total_questions: u64,
    ) -> Result<QuestionPage, QuestionServiceError> {
        let questions = self.questions.list_questions(request).await?;
        let categories = self.categories.list_categories().await?;
        Ok(QuestionPage {
            questions,
            total_questions,
            categories,
        })
    }

    /// Validate and store a new question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Question` when a field is missing or invalid.
    /// Returns `QuestionServiceError::Storage` if persistence fails.
    pub async fn create_question(
        &self,
        draft: QuestionDraft,
    ) -> Result<QuestionId, QuestionServiceError> {
        let validated = draft.validate().inspect_err(|err| {
            tracing::debug!(%err, "rejected question draft");
        })?;
        let id = self.questions.insert_question(validated).await?;
        tracing::info!(question_id = %id, "question created");
        Ok(id)
    }

    /// Delete a question by ID.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::UnknownQuestion` if no such question exists.
    /// Returns `QuestionServiceError::Storage` if repository access fails.
    pub async fn delete_question(&self, id: QuestionId) -> Result<(), QuestionServiceError> {
        match self.questions.delete_question(id).await {
            Ok(()) => {
                tracing::info!(question_id = %id, "question deleted");
                Ok(())
            }
            Err(StorageError::NotFound) => Err(QuestionServiceError::UnknownQuestion(id)),
            Err(err) => Err(err.into()),
        }
    }

    /// Case-insensitive substring search over question text.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Storage` if repository access fails.
    pub async fn search(&self, term: &str) -> Result<Vec<Question>, QuestionServiceError> {
        let questions = self.questions.search_questions(term).await?;
        tracing::debug!(term, hits = questions.len(), "question search");
        Ok(questions)
    }

    /// All questions of one existing category.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::UnknownCategory` if the category does not exist.
    /// Returns `QuestionServiceError::Storage` if repository access fails.
    pub async fn questions_in_category(
        &self,
        id: CategoryId,
    ) -> Result<CategoryQuestions, QuestionServiceError> {
        let category = self
            .categories
            .get_category(id)
            .await?
            .ok_or(QuestionServiceError::UnknownCategory(id))?;
        let questions = self.questions.questions_by_category(Some(id)).await?;
        Ok(CategoryQuestions {
            category,
            questions,
        })
    }
}
