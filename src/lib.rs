//! Bookshelf - HTTP REST API over an in-memory book catalog
//!
//! This crate provides a small read-mostly HTTP service over a catalog of
//! books and their reviews, loaded once from embedded JSON fixtures at
//! startup. It supports:
//!
//! - **Lookups**: Full listing and by-id retrieval
//! - **Ranking**: Top-10 books by rating × review count
//! - **Filtering**: Publication date range and featured flag
//! - **Reviews**: Per-book review listing
//! - **One gated write**: Admin-gated book insertion (append-only)
//!
//! # Features
//!
//! - **Middleware**: CORS, request ID tracking, console + file access logging
//! - **Configuration**: Environment variable and file-based configuration
//!   with the conventional `PORT` override
//! - **Error Handling**: Uniform `{ "message": ... }` error bodies
//! - **Graceful Shutdown**: Proper signal handling for deployments
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use bookshelf::ServiceConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServiceConfig::load()?;
//!     bookshelf::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe with catalog counts
//! - `GET /books` - List all books
//! - `GET /books/best` - Top 10 by rating × reviewCount
//! - `GET /books/featured` - Featured books
//! - `GET /books/range/{start}/{end}` - Books published in a date range
//! - `GET /books/{id}` - Book by id
//! - `GET /books/{id}/reviews` - Reviews for a book
//! - `POST /books` - Add a book (request body must carry `roll: "admin"`)

pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use catalog::{Book, CatalogStore, RecordId, Review};
pub use config::ServiceConfig;
pub use error::{ApiError, ApiResult};
pub use server::{build_router, start_server};
pub use state::AppState;
