use std::sync::Arc;

use storage::repository::CategoryRepository;
use trivia_core::model::Category;

use crate::error::CategoryServiceError;

/// Read access to the seeded category list.
#[derive(Clone)]
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    #[must_use]
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }

    /// List every category ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `CategoryServiceError::Storage` if repository access fails.
    pub async fn list_categories(&self) -> Result<Vec<Category>, CategoryServiceError> {
        let categories = self.categories.list_categories().await?;
        Ok(categories)
    }
}
