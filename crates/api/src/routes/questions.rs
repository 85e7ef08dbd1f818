use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use services::QuestionPage;
use trivia_core::model::{CategoryId, QuestionDraft, QuestionId};

use crate::dto::{
    CategoryQuestionsResponse, CreateQuestionBody, CreatedResponse, DeletedResponse, IntLike,
    PageQuery, QuestionListResponse, category_map, question_views,
};
use crate::error::ApiError;
use crate::state::AppState;

fn page_number(query: Result<Query<PageQuery>, QueryRejection>) -> Result<u32, ApiError> {
    query
        .map(|Query(query)| query)
        .unwrap_or_default()
        .number()
        .ok_or(ApiError::NotFound)
}

fn list_response(page: QuestionPage, current_category: Option<u64>) -> QuestionListResponse {
    QuestionListResponse {
        success: true,
        questions: question_views(&page.questions),
        total_questions: page.total_questions,
        categories: category_map(&page.categories),
        current_category,
    }
}

/// `GET /questions?page=N`
pub async fn list_questions(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<QuestionListResponse>, ApiError> {
    let page = state.questions.list_page(page_number(query)?).await?;
    Ok(Json(list_response(page, None)))
}

/// `POST /questions`
pub async fn create_question(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
    body: Result<Json<CreateQuestionBody>, JsonRejection>,
) -> Result<Json<CreatedResponse>, ApiError> {
    // Resolve the listing page before touching the store.
    let listing_page = page_number(query)?;
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!(%rejection, "unreadable question body");
        ApiError::Unprocessable
    })?;
    let int_field = |field: Option<IntLike>| {
        field
            .map(|value| value.value().ok_or(ApiError::Unprocessable))
            .transpose()
    };
    let draft = QuestionDraft {
        question: body.question,
        answer: body.answer,
        category: int_field(body.category)?,
        difficulty: int_field(body.difficulty)?,
    };

    let created = state.questions.create_question(draft).await?;
    let page = state.questions.page_snapshot(listing_page).await?;
    Ok(Json(CreatedResponse {
        success: true,
        created_id: created.value(),
        questions: question_views(&page.questions),
        total_questions: page.total_questions,
    }))
}

/// `DELETE /questions/{id}`
pub async fn delete_question(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let id: QuestionId = raw_id.parse().map_err(|_| ApiError::NotFound)?;
    let listing_page = page_number(query)?;
    state.questions.delete_question(id).await?;
    let page = state.questions.page_snapshot(listing_page).await?;
    Ok(Json(DeletedResponse {
        success: true,
        deleted: id.value(),
        questions: question_views(&page.questions),
        total_questions: page.total_questions,
        categories: category_map(&page.categories),
    }))
}

/// `GET /categories/{id}/questions`
pub async fn list_by_category(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<CategoryQuestionsResponse>, ApiError> {
    let id: CategoryId = raw_id.parse().map_err(|_| ApiError::NotFound)?;
    let listing = state.questions.questions_in_category(id).await?;
    Ok(Json(CategoryQuestionsResponse {
        success: true,
        total_questions: listing.questions.len() as u64,
        questions: question_views(&listing.questions),
        current_category: listing.category.id().value(),
    }))
}
