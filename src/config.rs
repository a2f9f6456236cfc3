//! Server configuration loaded from environment variables.

use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

/// Runtime settings for the HTTP server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind (from HR_ADMIN_HOST)
    pub host: String,
    /// Port for the HTTP API (from HR_ADMIN_PORT)
    pub port: u16,
    /// SQLite file (from HR_ADMIN_DB). `None` means the platform data directory.
    pub database_path: Option<PathBuf>,
    /// Allowed CORS origins (from HR_ADMIN_CORS_ORIGINS, comma-separated).
    /// `None` allows any origin.
    pub cors_origins: Option<Vec<String>>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("HR_ADMIN_HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("HR_ADMIN_PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!("Ignoring invalid HR_ADMIN_PORT value: {}", raw);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let database_path = lookup("HR_ADMIN_DB")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let cors_origins = lookup("HR_ADMIN_CORS_ORIGINS").map(|s| {
            s.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        Self {
            host,
            port,
            database_path,
            cors_origins,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_path: None,
            cors_origins: None,
        }
    }
}
