#![forbid(unsafe_code)]
//! JSON HTTP surface of the trivia service.
//!
//! Every handler talks to the services through [`AppState`] and reports
//! failures as [`ApiError`], which renders the `{success, error, message}`
//! body clients rely on.

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use axum::routing::{delete, get, post};
use http::{Method, header};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use state::AppState;

/// Build the application router with CORS and request tracing applied.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(routes::categories::list_categories))
        .route(
            "/categories/{id}/questions",
            get(routes::questions::list_by_category),
        )
        .route(
            "/questions",
            get(routes::questions::list_questions).post(routes::questions::create_question),
        )
        .route("/questions/", get(routes::questions::list_questions))
        .route("/questions/{id}", delete(routes::questions::delete_question))
        .route("/search", post(routes::search::search_questions))
        .route("/quizzes", post(routes::quizzes::next_question))
        .fallback(error::not_found)
        .method_not_allowed_fallback(error::method_not_allowed)
        .layer(cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
