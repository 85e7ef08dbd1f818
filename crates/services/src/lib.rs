#![forbid(unsafe_code)]

pub mod category_service;
pub mod error;
pub mod question_service;
pub mod quiz_service;
pub mod trivia_services;

pub use trivia_core::Sampler;

pub use category_service::CategoryService;
pub use error::{AppServicesError, CategoryServiceError, QuestionServiceError, QuizServiceError};
pub use question_service::{CategoryQuestions, QuestionPage, QuestionService};
pub use quiz_service::QuizService;
pub use trivia_services::TriviaServices;
