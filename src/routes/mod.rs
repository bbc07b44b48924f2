//! API route handlers
//!
//! This module contains all HTTP endpoint implementations for the catalog
//! service. Routes are organized by functionality:
//!
//! - `health`: Liveness probe with catalog counts
//! - `books`: Book listing, ranking, filtering, and the gated add-book write
//! - `reviews`: Per-book review listing

pub mod books;
pub mod health;
pub mod reviews;

use crate::error::{ApiError, ApiResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info
///
/// Returns service information including version and available endpoints.
/// This is the root endpoint (GET /).
pub async fn api_info() -> ApiResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "Bookshelf Catalog Service",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/books",
            "/books/best",
            "/books/featured",
            "/books/range/{start}/{end}",
            "/books/{id}",
            "/books/{id}/reviews",
            "/health"
        ]
    })))
}

/// 404 Not Found handler for undefined routes
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}
