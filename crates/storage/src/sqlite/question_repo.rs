use trivia_core::model::{CategoryId, Question, QuestionId, ValidatedQuestion};
use trivia_core::pagination::PageRequest;

use super::SqliteRepository;
use super::mapping::{
    category_id_to_i64, category_row_id, conn, like_pattern, map_question_row,
    question_id_from_i64, question_id_to_i64, question_row_id, ser,
};
use crate::repository::{QuestionRepository, StorageError};

fn map_rows(rows: &[sqlx::sqlite::SqliteRow]) -> Result<Vec<Question>, StorageError> {
    rows.iter().map(map_question_row).collect()
}

#[async_trait::async_trait]
impl QuestionRepository for SqliteRepository {
    async fn insert_question(
        &self,
        question: ValidatedQuestion,
    ) -> Result<QuestionId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO questions (question, answer, category, difficulty)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(question.question)
        .bind(question.answer)
        .bind(category_id_to_i64(question.category)?)
        .bind(i64::from(question.difficulty.value()))
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        question_id_from_i64(res.last_insert_rowid())
    }

    async fn upsert_question(&self, question: &Question) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO questions (id, question, answer, category, difficulty)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET
                question = excluded.question,
                answer = excluded.answer,
                category = excluded.category,
                difficulty = excluded.difficulty
            ",
        )
        .bind(question_id_to_i64(question.id())?)
        .bind(question.question().to_owned())
        .bind(question.answer().to_owned())
        .bind(category_id_to_i64(question.category())?)
        .bind(i64::from(question.difficulty().value()))
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError> {
        let Some(row_id) = question_row_id(id) else {
            return Ok(None);
        };
        let row = sqlx::query(
            "SELECT id, question, answer, category, difficulty FROM questions WHERE id = ?1",
        )
        .bind(row_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_question_row).transpose()
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError> {
        let row_id = question_row_id(id).ok_or(StorageError::NotFound)?;
        let res = sqlx::query("DELETE FROM questions WHERE id = ?1")
            .bind(row_id)
            .execute(&self.pool)
            .await
            .map_err(conn)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn count_questions(&self) -> Result<u64, StorageError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM questions")
            .fetch_one(&self.pool)
            .await
            .map_err(conn)?;

        u64::try_from(total).map_err(ser)
    }

    async fn list_questions(&self, page: PageRequest) -> Result<Vec<Question>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, question, answer, category, difficulty
            FROM questions
            ORDER BY id ASC
            LIMIT ?1 OFFSET ?2
            ",
        )
        .bind(i64::from(page.limit()))
        .bind(i64::try_from(page.offset()).map_err(ser)?)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        map_rows(&rows)
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StorageError> {
        // LIKE is case-insensitive for ASCII in SQLite.
        let rows = sqlx::query(
            r"
            SELECT id, question, answer, category, difficulty
            FROM questions
            WHERE question LIKE ?1 ESCAPE '\'
            ORDER BY id ASC
            ",
        )
        .bind(like_pattern(term))
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        map_rows(&rows)
    }

    async fn questions_by_category(
        &self,
        category: Option<CategoryId>,
    ) -> Result<Vec<Question>, StorageError> {
        let rows = match category {
            Some(category) => {
                let Some(row_id) = category_row_id(category) else {
                    return Ok(Vec::new());
                };
                sqlx::query(
                    r"
                    SELECT id, question, answer, category, difficulty
                    FROM questions
                    WHERE category = ?1
                    ORDER BY id ASC
                    ",
                )
                .bind(row_id)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    r"
                    SELECT id, question, answer, category, difficulty
                    FROM questions
                    ORDER BY id ASC
                    ",
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(conn)?;

        map_rows(&rows)
    }
}
