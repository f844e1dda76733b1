use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every setting has a default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    /// Upper bound for uploaded and fetched documents.
    pub max_document_bytes: usize,
    pub fetch_timeout: Duration,
    /// Directory that local `pdf_url` references are confined to.
    /// `None` disables local-path references entirely.
    pub local_document_root: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_document_bytes: optional_env("MAX_DOCUMENT_BYTES")?
                .unwrap_or(DEFAULT_MAX_DOCUMENT_BYTES),
            fetch_timeout: Duration::from_secs(optional_env("FETCH_TIMEOUT_SECS")?.unwrap_or(30)),
            local_document_root: std::env::var("LOCAL_DOCUMENT_ROOT")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "0.0.0.0".to_string(),
            port: 5000,
            rust_log: "info".to_string(),
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
            fetch_timeout: Duration::from_secs(30),
            local_document_root: None,
        }
    }
}

fn optional_env<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(None),
    }
}
