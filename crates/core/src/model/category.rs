use thiserror::Error;

use crate::model::ids::CategoryId;

/// A labelled grouping of questions, e.g. "Sports".
///
/// Categories are reference data: they are seeded, never created by players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    id: CategoryId,
    kind: String,
}

impl Category {
    /// Create a category with a trimmed display type.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::EmptyType` if the type is empty after trimming.
    pub fn new(id: CategoryId, kind: impl Into<String>) -> Result<Self, CategoryError> {
        let raw = kind.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CategoryError::EmptyType);
        }
        Ok(Self {
            id,
            kind: trimmed.to_owned(),
        })
    }

    #[must_use]
    pub fn id(&self) -> CategoryId {
        self.id
    }

    /// Display label, serialized as `type` on the wire.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CategoryError {
    #[error("category type cannot be empty")]
    EmptyType,
}
