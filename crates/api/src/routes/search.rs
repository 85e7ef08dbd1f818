use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use crate::dto::{SearchBody, SearchResponse, question_views};
use crate::error::ApiError;
use crate::state::AppState;

/// `POST /search`
///
/// A missing body or a body without `searchTerm` is unprocessable.
pub async fn search_questions(
    State(state): State<AppState>,
    body: Result<Json<SearchBody>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let term = body
        .ok()
        .and_then(|Json(body)| body.search_term)
        .ok_or(ApiError::Unprocessable)?;
    let hits = state.questions.search(&term).await?;
    Ok(Json(SearchResponse {
        success: true,
        total_questions: hits.len() as u64,
        questions: question_views(&hits),
        current_category: None,
    }))
}
