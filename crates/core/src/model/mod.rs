mod category;
mod ids;
mod question;

pub use ids::{CategoryId, ParseIdError, QuestionId};

pub use category::{Category, CategoryError};
pub use question::{Difficulty, Question, QuestionDraft, QuestionError, ValidatedQuestion};
