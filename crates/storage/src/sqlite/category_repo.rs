use trivia_core::model::{Category, CategoryId};

use super::SqliteRepository;
use super::mapping::{category_id_to_i64, category_row_id, conn, map_category_row};
use crate::repository::{CategoryRepository, StorageError};

#[async_trait::async_trait]
impl CategoryRepository for SqliteRepository {
    async fn upsert_category(&self, category: &Category) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO categories (id, type)
            VALUES (?1, ?2)
            ON CONFLICT(id) DO UPDATE SET type = excluded.type
            ",
        )
        .bind(category_id_to_i64(category.id())?)
        .bind(category.kind().to_owned())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, StorageError> {
        let Some(row_id) = category_row_id(id) else {
            return Ok(None);
        };
        let row = sqlx::query("SELECT id, type FROM categories WHERE id = ?1")
            .bind(row_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;

        row.as_ref().map(map_category_row).transpose()
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StorageError> {
        let rows = sqlx::query("SELECT id, type FROM categories ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(conn)?;

        rows.iter().map(map_category_row).collect()
    }
}
