use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use trivia_core::model::QuestionId;
use trivia_core::quiz::{QuizCategory, QuizRequest};

use crate::dto::{IntLike, QuizBody, QuizResponse, QuestionView};
use crate::error::ApiError;
use crate::state::AppState;

fn quiz_request(body: QuizBody) -> Result<QuizRequest, ApiError> {
    let category = body
        .quiz_category
        .and_then(|category| category.id)
        .as_ref()
        .and_then(IntLike::as_id)
        .map(QuizCategory::from_raw)
        .ok_or(ApiError::BadRequest)?;
    let previous = body
        .previous_questions
        .unwrap_or_default()
        .iter()
        .map(|id| id.as_id().map(QuestionId::new))
        .collect::<Option<Vec<_>>>()
        .ok_or(ApiError::BadRequest)?;
    Ok(QuizRequest::new(category, previous))
}

/// `POST /quizzes`
///
/// Answers with `question: null` once the category has no unseen questions.
pub async fn next_question(
    State(state): State<AppState>,
    body: Result<Json<QuizBody>, JsonRejection>,
) -> Result<Json<QuizResponse>, ApiError> {
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!(%rejection, "unreadable quiz body");
        ApiError::BadRequest
    })?;
    let request = quiz_request(body)?;
    let question = state.quiz.next_question(&request).await?;
    Ok(Json(QuizResponse {
        success: true,
        question: question.as_ref().map(QuestionView::from),
    }))
}
