//! Bookshelf - HTTP REST API over an in-memory book catalog
//!
//! This binary serves the book/review catalog with request logging and an
//! admin-gated write endpoint.

use bookshelf::ServiceConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up a local .env before reading configuration
    dotenvy::dotenv().ok();

    // Load configuration
    let config = ServiceConfig::load()?;

    // Start server
    bookshelf::start_server(config).await?;

    Ok(())
}
