//! Service configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). The bucket name and the upstream feed
//! URL are mandatory; everything else has a default.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::telemetry::LogFormat;

/// Environment variable naming the blob store bucket.
pub const BUCKET_VAR: &str = "QUAKES_BUCKET_NAME";

/// Environment variable naming the upstream GeoJSON feed.
pub const FEED_URL_VAR: &str = "USGS_FEED_URL";

const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Startup-time configuration failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable is set but its value cannot be used.
    #[error("invalid value {value:?} for {key}")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Top-level service configuration shared by the ingestor and the query
/// server.
///
/// Loaded once at startup via [`ServiceConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Bucket identifier inside the blob store.
    pub quakes_bucket: String,

    /// Upstream feed URL.
    pub usgs_feed_url: String,

    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Root directory of the filesystem blob store.
    pub blob_store_root: PathBuf,

    /// Fixed bound on the upstream fetch.
    pub fetch_timeout: Duration,

    /// Log output format.
    pub log_format: LogFormat,
}

impl ServiceConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] if `QUAKES_BUCKET_NAME` or
    /// `USGS_FEED_URL` is absent, and [`ConfigError::Invalid`] if
    /// `LISTEN_ADDR` is set but cannot be parsed as a [`SocketAddr`].
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same conditions as [`ServiceConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let quakes_bucket = required(&lookup, BUCKET_VAR)?;
        let usgs_feed_url = required(&lookup, FEED_URL_VAR)?;

        let raw_addr = lookup("LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let listen_addr: SocketAddr = raw_addr.parse().map_err(|_| ConfigError::Invalid {
            key: "LISTEN_ADDR",
            value: raw_addr.clone(),
        })?;

        let blob_store_root =
            PathBuf::from(lookup("BLOB_STORE_ROOT").unwrap_or_else(|| "./data".to_string()));
        let fetch_timeout = match parse_or(&lookup, "FETCH_TIMEOUT_SECS", DEFAULT_FETCH_TIMEOUT_SECS) {
            // A zero bound would fail every fetch.
            0 => Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            secs => Duration::from_secs(secs),
        };
        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") | Some("JSON") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            quakes_bucket,
            usgs_feed_url,
            listen_addr,
            blob_store_root,
            fetch_timeout,
            log_format,
        })
    }
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(key))
}

/// Parses a variable as `T`, returning `default` on missing or invalid
/// values.
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}
