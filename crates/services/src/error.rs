//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;
use trivia_core::model::{CategoryId, QuestionError, QuestionId};
use trivia_core::pagination::PageError;

/// Errors emitted by `CategoryService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CategoryServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `QuestionService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionServiceError {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Page(#[from] PageError),
    #[error("page {page} is out of range ({total_pages} pages)")]
    PageOutOfRange { page: u32, total_pages: u64 },
    #[error("question {0} does not exist")]
    UnknownQuestion(QuestionId),
    #[error("category {0} does not exist")]
    UnknownCategory(CategoryId),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
