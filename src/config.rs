use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "ICU Dashboard";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variables read by `ServerConfig::from_env`.
pub const ADDR_VAR: &str = "ICU_DASHBOARD_ADDR";
pub const DATA_VAR: &str = "ICU_DASHBOARD_DATA";
pub const STATIC_VAR: &str = "ICU_DASHBOARD_STATIC";

const DEFAULT_ADDR: &str = "127.0.0.1:5000";
const DEFAULT_DATA_PATH: &str = "icu_data.csv";
const DEFAULT_STATIC_DIR: &str = "static";

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "icu_dashboard=info,tower_http=info"
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {var} address {value:?}")]
    InvalidAddr { var: &'static str, value: String },
}

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// CSV file holding the ICU records.
    pub data_path: PathBuf,
    /// Directory with `index.html` and page assets.
    pub static_dir: PathBuf,
}

impl ServerConfig {
    /// Read settings from the process environment, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = raw_addr.parse().map_err(|_| ConfigError::InvalidAddr {
            var: ADDR_VAR,
            value: raw_addr.clone(),
        })?;

        Ok(Self {
            addr,
            data_path: lookup(DATA_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH)),
            static_dir: lookup(STATIC_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
        })
    }
}
