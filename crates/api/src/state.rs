use std::sync::Arc;

use services::{CategoryService, QuestionService, QuizService, TriviaServices};

/// Shared handler state; cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub categories: Arc<CategoryService>,
    pub questions: Arc<QuestionService>,
    pub quiz: Arc<QuizService>,
}

impl From<&TriviaServices> for AppState {
    fn from(services: &TriviaServices) -> Self {
        Self {
            categories: services.categories(),
            questions: services.questions(),
            quiz: services.quiz(),
        }
    }
}
