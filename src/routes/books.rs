use crate::catalog::{Book, RecordId};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

/// How many entries /books/best returns at most.
const BEST_BOOKS_LIMIT: usize = 10;

/// Request body for POST /books.
///
/// Every field is optional at the serde level so that the access gate and
/// the presence validation run in the handler, in that order; a missing
/// title must still reach the gate and fail with 403 when the caller is not
/// an admin.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBookRequest {
    /// Caller role field. The literal value "admin" opens the gate; this is
    /// a known-weak stand-in for real authorization, preserved as-is.
    #[serde(default)]
    pub roll: Option<String>,

    #[serde(default)]
    pub id: Option<RecordId>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub rating: Option<f64>,

    #[serde(default)]
    pub review_count: Option<u64>,

    #[serde(default)]
    pub date_published: Option<String>,

    #[serde(default)]
    pub featured: Option<bool>,
}

/// List all books in load order
pub async fn list_books(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.catalog.all_books())
}

/// Top 10 books by rating × reviewCount, descending
pub async fn best_books(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.catalog.best_books(BEST_BOOKS_LIMIT))
}

/// Look up a single book by id
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Book>> {
    state
        .catalog
        .find_book(&id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Book not found".to_string()))
}

/// Books published within an inclusive date range
pub async fn books_in_range(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> ApiResult<Json<Vec<Book>>> {
    let books = state.catalog.books_in_range(&start, &end);
    if books.is_empty() {
        return Err(ApiError::NotFound(
            "No books found in this date range".to_string(),
        ));
    }
    Ok(Json(books))
}

/// Books carrying the featured flag
pub async fn featured_books(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Book>>> {
    let books = state.catalog.featured_books();
    if books.is_empty() {
        return Err(ApiError::NotFound("No featured books found".to_string()));
    }
    Ok(Json(books))
}

/// Add a book to the catalog (admin-gated)
///
/// The gate runs before validation: a non-admin caller gets 403 even when
/// the payload is also invalid. Duplicate ids are accepted silently.
pub async fn add_book(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddBookRequest>,
) -> ApiResult<impl IntoResponse> {
    if request.roll.as_deref() != Some("admin") {
        return Err(ApiError::Forbidden("Access denied".to_string()));
    }
    tracing::debug!("admin access granted");

    let invalid = || ApiError::BadRequest("Invalid book data".to_string());
    let id = request.id.filter(RecordId::is_present).ok_or_else(invalid)?;
    let title = request.title.filter(|t| !t.is_empty()).ok_or_else(invalid)?;
    let author = request
        .author
        .filter(|a| !a.is_empty())
        .ok_or_else(invalid)?;

    let book = Book {
        id,
        title,
        author,
        rating: request.rating.unwrap_or_default(),
        review_count: request.review_count.unwrap_or_default(),
        date_published: request.date_published,
        featured: request.featured.unwrap_or_default(),
    };

    let stored = state.catalog.add_book(book);
    Ok((StatusCode::CREATED, Json(stored)))
}
