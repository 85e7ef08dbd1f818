use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;
use thiserror::Error;

use services::{CategoryServiceError, QuestionServiceError, QuizServiceError};

/// Failures reported to HTTP clients. The display text is the `message`
/// field of the error body.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    #[error("Bad Request")]
    BadRequest,

    #[error("resource not found")]
    NotFound,

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("unprocessable")]
    Unprocessable,

    #[error("internal server error")]
    Internal,
}

impl ApiError {
    #[must_use]
    pub fn status(self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            success: false,
            error: status.as_u16(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<QuestionServiceError> for ApiError {
    fn from(err: QuestionServiceError) -> Self {
        match err {
            QuestionServiceError::Question(_) | QuestionServiceError::UnknownQuestion(_) => {
                Self::Unprocessable
            }
            QuestionServiceError::Page(_)
            | QuestionServiceError::PageOutOfRange { .. }
            | QuestionServiceError::UnknownCategory(_) => Self::NotFound,
            other => {
                tracing::error!(error = %other, "question service failure");
                Self::Internal
            }
        }
    }
}

impl From<CategoryServiceError> for ApiError {
    fn from(err: CategoryServiceError) -> Self {
        tracing::error!(error = %err, "category service failure");
        Self::Internal
    }
}

impl From<QuizServiceError> for ApiError {
    fn from(err: QuizServiceError) -> Self {
        tracing::error!(error = %err, "quiz service failure");
        Self::Internal
    }
}

pub(crate) async fn not_found() -> ApiError {
    ApiError::NotFound
}

pub(crate) async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
