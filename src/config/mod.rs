//! Configuration module for the dashboard backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL; storage is unconfigured when absent
    pub database_url: Option<String>,
    /// Secret used to verify session tokens; all sessions are rejected when absent
    pub session_secret: Option<String>,
    /// Optional pre-shared key guarding the admin document routes
    pub admin_psk: Option<String>,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit JSON log lines instead of human-readable ones
    pub log_json: bool,
}

/// Configuration values that could not be interpreted.
#[derive(Debug)]
pub enum ConfigError {
    InvalidBindAddr(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidBindAddr(value) => {
                write!(f, "invalid DASH_BIND_ADDR format: {}", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let database_url = non_empty_var("DASH_DATABASE_URL");
        let session_secret = non_empty_var("DASH_SESSION_SECRET");
        let admin_psk = non_empty_var("DASH_ADMIN_PSK");

        let raw_bind = env::var("DASH_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let bind_addr = raw_bind
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr(raw_bind.clone()))?;

        let log_level = env::var("DASH_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_json = env::var("DASH_LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Ok(Self {
            database_url,
            session_secret,
            admin_psk,
            bind_addr,
            log_level,
            log_json,
        })
    }
}

/// An empty variable counts as unset.
fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
