use crate::catalog::Review;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::Json;
use std::sync::Arc;

/// All reviews for a single book
///
/// Book existence is checked first, so an unknown id reports "Book not
/// found" while a known book with no reviews reports the no-reviews variant.
pub async fn book_reviews(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Review>>> {
    if state.catalog.find_book(&id).is_none() {
        return Err(ApiError::NotFound("Book not found".to_string()));
    }

    let reviews = state.catalog.reviews_for_book(&id);
    if reviews.is_empty() {
        return Err(ApiError::NotFound(
            "No reviews found for this book".to_string(),
        ));
    }
    Ok(Json(reviews))
}
