//! # Configuration
//!
//! `AppConfig` drives the backend: HTTP listener settings plus where the
//! record store lives. It is read from an optional JSON file, then
//! overridden from the environment (`HOST`, `PORT`, `DATABASE_PATH`,
//! `CORS_ORIGINS`).
//!
//! `ClientConfig` is the explicit configuration of the client side and is
//! never resolved from the environment here.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::client::DEFAULT_LOOKUP_URL;
use crate::http_server::HttpServerConfig;
use crate::store::{FileStudentStore, InMemoryStudentStore, StoreResult, StudentStore};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid environment variable {name}: {reason}")]
    Env { name: &'static str, reason: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==================
// Backend
// ==================

/// Where records are kept
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Log file for the durable store; absent means in-memory
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StoreConfig {
    pub fn open_store(&self) -> StoreResult<Arc<dyn StudentStore>> {
        match &self.path {
            Some(path) => {
                info!(path = %path.display(), "opening file store");
                Ok(Arc::new(FileStudentStore::open(path)?))
            }
            None => {
                info!("using in-memory store");
                Ok(Arc::new(InMemoryStudentStore::new()))
            }
        }
    }
}

/// Backend configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: HttpServerConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

impl AppConfig {
    /// Load from `path` when given, apply environment overrides and validate
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Apply overrides from `var`, a variable lookup
    pub fn apply_overrides<F>(&mut self, var: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = var("HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("PORT") {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::Env {
                name: "PORT",
                reason: format!("'{}' is not a port number", port),
            })?;
        }
        if let Some(path) = var("DATABASE_PATH") {
            self.store.path = (!path.is_empty()).then(|| PathBuf::from(path));
        }
        if let Some(origins) = var("CORS_ORIGINS") {
            self.server.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(String::from)
                .collect();
        }
        Ok(())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("port must be > 0".to_string()));
        }
        if self.server.host.is_empty() {
            return Err(ConfigError::Invalid("host must not be empty".to_string()));
        }
        Ok(())
    }
}

// ==================
// Client
// ==================

fn default_lookup_url() -> String {
    DEFAULT_LOOKUP_URL.to_string()
}

/// Client-side configuration, handed to `StudentApi` and `ViaCepLookup`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base address of the student service, e.g. `http://localhost:3000`
    pub api_base_url: String,

    #[serde(default = "default_lookup_url")]
    pub postal_lookup_url: String,

    /// Per-request timeout; transport default when absent
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            postal_lookup_url: default_lookup_url(),
            timeout_secs: None,
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "api_base_url must not be empty".to_string(),
            ));
        }
        for (name, value) in [
            ("api_base_url", &self.api_base_url),
            ("postal_lookup_url", &self.postal_lookup_url),
        ] {
            Url::parse(value)
                .map_err(|e| ConfigError::Invalid(format!("{name} '{value}': {e}")))?;
        }
        Ok(())
    }
}
