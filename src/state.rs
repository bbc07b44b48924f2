use crate::catalog::CatalogStore;
use crate::config::ServiceConfig;
use std::fs::{File, OpenOptions};
use std::sync::{Arc, Mutex};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Service configuration
    pub config: Arc<ServiceConfig>,

    /// The in-memory catalog (shared across requests)
    pub catalog: Arc<CatalogStore>,

    /// Append-mode access log file
    pub access_log: Arc<Mutex<File>>,
}

impl AppState {
    /// Create new application state: parse the embedded catalog fixtures and
    /// open the access log for appending.
    pub fn new(config: ServiceConfig) -> anyhow::Result<Self> {
        let catalog = CatalogStore::load()?;

        std::fs::create_dir_all(&config.log_dir)?;
        let access_log = OpenOptions::new()
            .create(true)
            .append(true)
            .open(config.access_log_path())?;

        Ok(Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            access_log: Arc::new(Mutex::new(access_log)),
        })
    }
}
