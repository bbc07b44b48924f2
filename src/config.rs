use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory the access log is written to (created if missing)
    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    /// Access log file name, opened append-mode
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            enable_cors: default_true(),
            log_level: default_log_level(),
            log_dir: default_log_dir(),
            log_file: default_log_file(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from an optional `bookshelf` config file and
    /// `BOOKSHELF_*` environment variables. The conventional `PORT` variable
    /// wins over both.
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("bookshelf").required(false))
            .add_source(config::Environment::with_prefix("BOOKSHELF").separator("__"));

        let mut config: ServiceConfig = builder.build()?.try_deserialize()?;

        if let Ok(port) = std::env::var("PORT") {
            config.port = port
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid PORT value {port:?}: {e}"))?;
        }

        Ok(config)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Full path of the access log file
    pub fn access_log_path(&self) -> PathBuf {
        PathBuf::from(&self.log_dir).join(&self.log_file)
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "./logging".to_string()
}

fn default_log_file() -> String {
    "log.txt".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = ServiceConfig::default();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.bind_addr, "0.0.0.0");
        assert!(cfg.enable_cors);
        assert_eq!(cfg.log_file, "log.txt");
    }

    #[test]
    fn test_socket_addr() {
        let cfg = ServiceConfig::default();
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_access_log_path() {
        let cfg = ServiceConfig::default();
        assert_eq!(cfg.access_log_path(), PathBuf::from("./logging/log.txt"));
    }
}
