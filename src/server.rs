//! Server initialization and routing
//!
//! This module handles the Axum server setup including:
//! - Router configuration with all API endpoints
//! - Middleware stack (request IDs, access logging, CORS)
//! - Graceful shutdown handling

use crate::config::ServiceConfig;
use crate::middleware::{access_log, request_id};
use crate::routes::{api_info, books, health, not_found, reviews};
use crate::state::AppState;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the Axum router with all routes and middleware
///
/// Static segments (`best`, `featured`, `range`) take precedence over the
/// `{id}` capture, so the fixed routes can coexist with the lookup route.
///
/// Middleware stack (applied in reverse order):
/// 1. Tracing spans
/// 2. Request ID tracking
/// 3. Access logging (console + append-mode file)
/// 4. CORS
pub fn build_router(state: Arc<AppState>) -> Router {
    // CORS layer
    let cors = if state.config.enable_cors {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
    };

    Router::new()
        .route("/", get(api_info))
        .route("/health", get(health::health_check))
        .route("/books", get(books::list_books).post(books::add_book))
        .route("/books/best", get(books::best_books))
        .route("/books/featured", get(books::featured_books))
        .route("/books/range/{start}/{end}", get(books::books_in_range))
        .route("/books/{id}", get(books::get_book))
        .route("/books/{id}/reviews", get(reviews::book_reviews))
        .fallback(not_found)
        .layer(cors)
        .layer(from_fn_with_state(state.clone(), access_log))
        .layer(from_fn(request_id))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the catalog HTTP server
///
/// Initializes logging, loads the catalog into shared state, builds the
/// router, and serves until SIGTERM or Ctrl+C.
pub async fn start_server(config: ServiceConfig) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .with_target(false)
        .init();

    // Create application state (one-time catalog load)
    let state = Arc::new(AppState::new(config.clone())?);

    // Build router
    let app = build_router(state.clone());

    // Parse bind address
    let addr: SocketAddr = config.socket_addr()?;

    tracing::info!(
        "Starting bookshelf server on {} ({} books, {} reviews loaded)",
        addr,
        state.catalog.book_count(),
        state.catalog.review_count()
    );
    tracing::info!(
        "Access log: {}, CORS: {}",
        config.access_log_path().display(),
        config.enable_cors
    );

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
