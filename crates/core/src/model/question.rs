use thiserror::Error;

use crate::model::ids::{CategoryId, QuestionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{0}` cannot be empty")]
    EmptyText(&'static str),

    #[error("category id must be >= 1, got {0}")]
    InvalidCategory(i64),

    #[error("difficulty must be between 1 and 5, got {0}")]
    InvalidDifficulty(i64),
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Question difficulty on a 1 (easiest) to 5 (hardest) scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// # Errors
    ///
    /// Returns `QuestionError::InvalidDifficulty` outside `1..=5`.
    pub fn new(value: i64) -> Result<Self, QuestionError> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or(QuestionError::InvalidDifficulty(value))
    }

    #[must_use]
    pub fn value(&self) -> u8 {
        self.0
    }
}

//
// ─── DRAFT → VALIDATED → QUESTION ──────────────────────────────────────────────
//

/// Question fields as received from a client; any of them may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionDraft {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<i64>,
    pub difficulty: Option<i64>,
}

impl QuestionDraft {
    /// Check that every field is present and well-formed.
    ///
    /// The category is a soft reference: it must look like an id but is not
    /// checked against the stored categories.
    ///
    /// # Errors
    ///
    /// Returns the first `QuestionError` found, in field order.
    pub fn validate(self) -> Result<ValidatedQuestion, QuestionError> {
        let question = required_text("question", self.question)?;
        let answer = required_text("answer", self.answer)?;
        let category = category_id(self.category.ok_or(QuestionError::MissingField("category"))?)?;
        let difficulty =
            Difficulty::new(self.difficulty.ok_or(QuestionError::MissingField("difficulty"))?)?;

        Ok(ValidatedQuestion {
            question,
            answer,
            category,
            difficulty,
        })
    }
}

fn required_text(field: &'static str, value: Option<String>) -> Result<String, QuestionError> {
    let value = value.ok_or(QuestionError::MissingField(field))?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(QuestionError::EmptyText(field));
    }
    Ok(trimmed.to_owned())
}

fn category_id(raw: i64) -> Result<CategoryId, QuestionError> {
    u64::try_from(raw)
        .ok()
        .filter(|v| *v >= 1)
        .map(CategoryId::new)
        .ok_or(QuestionError::InvalidCategory(raw))
}

/// A question that passed validation but has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuestion {
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: Difficulty,
}

impl ValidatedQuestion {
    #[must_use]
    pub fn assign_id(self, id: QuestionId) -> Question {
        Question {
            id,
            question: self.question,
            answer: self.answer,
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}

/// A stored trivia item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    question: String,
    answer: String,
    category: CategoryId,
    difficulty: Difficulty,
}

impl Question {
    /// Rebuild a question from persisted columns.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the stored values no longer validate.
    pub fn from_persisted(
        id: QuestionId,
        question: String,
        answer: String,
        category: i64,
        difficulty: i64,
    ) -> Result<Self, QuestionError> {
        QuestionDraft {
            question: Some(question),
            answer: Some(answer),
            category: Some(category),
            difficulty: Some(difficulty),
        }
        .validate()
        .map(|validated| validated.assign_id(id))
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn category(&self) -> CategoryId {
        self.category
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn full_draft() -> QuestionDraft {
        QuestionDraft {
            question: Some("what is my name ?".into()),
            answer: Some("trivia".into()),
            category: Some(5),
            difficulty: Some(5),
        }
    }

    #[test]
    fn valid_draft_validates_and_assigns_id() {
        let question = full_draft().validate().unwrap().assign_id(QuestionId::new(24));
        assert_eq!(question.id(), QuestionId::new(24));
        assert_eq!(question.question(), "what is my name ?");
        assert_eq!(question.answer(), "trivia");
        assert_eq!(question.category(), CategoryId::new(5));
        assert_eq!(question.difficulty().value(), 5);
    }

    #[test]
    fn draft_without_difficulty_is_rejected() {
        let draft = QuestionDraft {
            difficulty: None,
            category: Some(1),
            ..full_draft()
        };
        assert_eq!(
            draft.validate().unwrap_err(),
            QuestionError::MissingField("difficulty")
        );
    }

    #[test]
    fn draft_reports_first_missing_field() {
        let err = QuestionDraft::default().validate().unwrap_err();
        assert_eq!(err, QuestionError::MissingField("question"));
    }

    #[test]
    fn draft_rejects_blank_answer() {
        let draft = QuestionDraft {
            answer: Some("  ".into()),
            ..full_draft()
        };
        assert_eq!(draft.validate().unwrap_err(), QuestionError::EmptyText("answer"));
    }

    #[test]
    fn draft_rejects_out_of_range_values() {
        let draft = QuestionDraft {
            category: Some(0),
            ..full_draft()
        };
        assert_eq!(draft.validate().unwrap_err(), QuestionError::InvalidCategory(0));

        let draft = QuestionDraft {
            difficulty: Some(6),
            ..full_draft()
        };
        assert_eq!(draft.validate().unwrap_err(), QuestionError::InvalidDifficulty(6));
    }

    #[test]
    fn difficulty_bounds() {
        assert!(Difficulty::new(1).is_ok());
        assert!(Difficulty::new(5).is_ok());
        assert!(Difficulty::new(0).is_err());
        assert!(Difficulty::new(-3).is_err());
        assert!(Difficulty::new(300).is_err());
    }

    #[test]
    fn from_persisted_trims_text() {
        let question = Question::from_persisted(
            QuestionId::new(10),
            " Which is the only team to play in every soccer World Cup tournament? ".into(),
            "Brazil".into(),
            6,
            3,
        )
        .unwrap();
        assert_eq!(
            question.question(),
            "Which is the only team to play in every soccer World Cup tournament?"
        );
    }
}
