use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use trivia_core::model::{Category, CategoryId, Question, QuestionId, ValidatedQuestion};
use trivia_core::pagination::PageRequest;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Persist or update a category.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the category cannot be stored.
    async fn upsert_category(&self, category: &Category) -> Result<(), StorageError>;

    /// Fetch a category by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures; a missing category is `Ok(None)`.
    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, StorageError>;

    /// List every category ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_categories(&self) -> Result<Vec<Category>, StorageError>;
}

/// Repository contract for questions.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Store a new question and return its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the question cannot be stored.
    async fn insert_question(&self, question: ValidatedQuestion)
    -> Result<QuestionId, StorageError>;

    /// Persist a question under its own ID, replacing any previous row.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the question cannot be stored.
    async fn upsert_question(&self, question: &Question) -> Result<(), StorageError>;

    /// Fetch a question by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures; a missing question is `Ok(None)`.
    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError>;

    /// Delete a question by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if nothing was deleted.
    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError>;

    /// Count all stored questions.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn count_questions(&self) -> Result<u64, StorageError>;

    /// One page of questions ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_questions(&self, page: PageRequest) -> Result<Vec<Question>, StorageError>;

    /// Questions whose text contains `term`, ignoring case, ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StorageError>;

    /// Questions in one category, or in all of them for `None`, ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn questions_by_category(
        &self,
        category: Option<CategoryId>,
    ) -> Result<Vec<Question>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    categories: Arc<Mutex<BTreeMap<CategoryId, Category>>>,
    questions: Arc<Mutex<BTreeMap<QuestionId, Question>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn categories(&self) -> Result<MutexGuard<'_, BTreeMap<CategoryId, Category>>, StorageError> {
        self.categories
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }

    fn questions(&self) -> Result<MutexGuard<'_, BTreeMap<QuestionId, Question>>, StorageError> {
        self.questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

#[async_trait]
impl CategoryRepository for InMemoryRepository {
    async fn upsert_category(&self, category: &Category) -> Result<(), StorageError> {
        self.categories()?.insert(category.id(), category.clone());
        Ok(())
    }

    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, StorageError> {
        Ok(self.categories()?.get(&id).cloned())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StorageError> {
        Ok(self.categories()?.values().cloned().collect())
    }
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn insert_question(
        &self,
        question: ValidatedQuestion,
    ) -> Result<QuestionId, StorageError> {
        let mut guard = self.questions()?;
        let next = guard.keys().next_back().map_or(1, |id| id.value() + 1);
        let id = QuestionId::new(next);
        guard.insert(id, question.assign_id(id));
        Ok(id)
    }

    async fn upsert_question(&self, question: &Question) -> Result<(), StorageError> {
        self.questions()?.insert(question.id(), question.clone());
        Ok(())
    }

    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError> {
        Ok(self.questions()?.get(&id).cloned())
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError> {
        self.questions()?
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }

    async fn count_questions(&self) -> Result<u64, StorageError> {
        Ok(self.questions()?.len() as u64)
    }

    async fn list_questions(&self, page: PageRequest) -> Result<Vec<Question>, StorageError> {
        let all: Vec<Question> = self.questions()?.values().cloned().collect();
        Ok(page.slice(&all).to_vec())
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StorageError> {
        let needle = term.to_lowercase();
        Ok(self
            .questions()?
            .values()
            .filter(|q| q.question().to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn questions_by_category(
        &self,
        category: Option<CategoryId>,
    ) -> Result<Vec<Question>, StorageError> {
        Ok(self
            .questions()?
            .values()
            .filter(|q| category.is_none_or(|c| q.category() == c))
            .cloned()
            .collect())
    }
}

/// Aggregates category and question repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub categories: Arc<dyn CategoryRepository>,
    pub questions: Arc<dyn QuestionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let categories: Arc<dyn CategoryRepository> = Arc::new(repo.clone());
        let questions: Arc<dyn QuestionRepository> = Arc::new(repo);
        Self {
            categories,
            questions,
        }
    }
}
