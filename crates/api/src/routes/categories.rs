use axum::Json;
use axum::extract::State;

use crate::dto::{CategoriesResponse, category_map};
use crate::error::ApiError;
use crate::state::AppState;

/// `GET /categories`
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = state.categories.list_categories().await?;
    Ok(Json(CategoriesResponse {
        success: true,
        categories: category_map(&categories),
    }))
}
