//! Request and response bodies.
//!
//! Request fields are optional so that a missing field reaches the handler
//! and is reported with the status the endpoint promises, instead of being
//! rejected by the JSON extractor.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use trivia_core::model::{Category, Question};

/// An integer that may arrive as a JSON number or as a numeric string.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum IntLike {
    Int(i64),
    Text(String),
}

impl IntLike {
    /// The integer value, or `None` when a string does not parse.
    #[must_use]
    pub fn value(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }

    /// The value as an unsigned id.
    #[must_use]
    pub fn as_id(&self) -> Option<u64> {
        self.value().and_then(|value| u64::try_from(value).ok())
    }
}

/// `?page=N`. Anything that is not an integer falls back to page 1.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    /// The requested page, or `None` for a negative or oversized number.
    #[must_use]
    pub fn number(&self) -> Option<u32> {
        match self.page.as_deref().map(str::trim).map(str::parse::<i64>) {
            Some(Ok(page)) => u32::try_from(page).ok(),
            _ => Some(1),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateQuestionBody {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<IntLike>,
    pub difficulty: Option<IntLike>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchBody {
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct QuizBody {
    pub previous_questions: Option<Vec<IntLike>>,
    pub quiz_category: Option<QuizCategoryBody>,
}

/// The category sent with a quiz round. Its `type` is display-only.
#[derive(Debug, Default, Deserialize)]
pub struct QuizCategoryBody {
    pub id: Option<IntLike>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct QuestionView {
    pub id: u64,
    pub question: String,
    pub answer: String,
    pub category: u64,
    pub difficulty: u8,
}

impl From<&Question> for QuestionView {
    fn from(question: &Question) -> Self {
        Self {
            id: question.id().value(),
            question: question.question().to_owned(),
            answer: question.answer().to_owned(),
            category: question.category().value(),
            difficulty: question.difficulty().value(),
        }
    }
}

pub fn question_views(questions: &[Question]) -> Vec<QuestionView> {
    questions.iter().map(QuestionView::from).collect()
}

/// Categories keyed by id, as the front-end renders its category menu.
pub fn category_map(categories: &[Category]) -> BTreeMap<u64, String> {
    categories
        .iter()
        .map(|category| (category.id().value(), category.kind().to_owned()))
        .collect()
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: BTreeMap<u64, String>,
}

#[derive(Debug, Serialize)]
pub struct QuestionListResponse {
    pub success: bool,
    pub questions: Vec<QuestionView>,
    pub total_questions: u64,
    pub categories: BTreeMap<u64, String>,
    pub current_category: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub created_id: u64,
    pub questions: Vec<QuestionView>,
    pub total_questions: u64,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub deleted: u64,
    pub questions: Vec<QuestionView>,
    pub total_questions: u64,
    pub categories: BTreeMap<u64, String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub questions: Vec<QuestionView>,
    pub total_questions: u64,
    pub current_category: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct CategoryQuestionsResponse {
    pub success: bool,
    pub questions: Vec<QuestionView>,
    pub total_questions: u64,
    pub current_category: u64,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub success: bool,
    pub question: Option<QuestionView>,
}
