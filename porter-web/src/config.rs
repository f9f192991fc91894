//! Web service configuration
//!
//! Defines all configurable parameters for the web service: bind address,
//! job store backend, the services file declaring supported import services,
//! and the name of the cookie carrying the job token.

use anyhow::Context;
use porter_core::domain::data_type::DataType;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default name of the cookie carrying the encoded job id
pub const DEFAULT_ID_COOKIE: &str = "encoded_id";

/// Web service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server listens on (e.g. "0.0.0.0:8080")
    pub bind_addr: String,

    /// PostgreSQL connection string. The in-memory job store is used when unset.
    pub database_url: Option<String>,

    /// JSON file declaring the import services this deployment supports
    pub services_file: Option<PathBuf>,

    /// Cookie holding the job token on `GET /_/importSetup`
    pub id_cookie: String,
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Recognised environment variables:
    /// - PORTER_BIND_ADDR (optional, default: 0.0.0.0:8080)
    /// - DATABASE_URL (optional)
    /// - PORTER_SERVICES_FILE (optional)
    /// - PORTER_ID_COOKIE (optional, default: encoded_id)
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| var(key).filter(|value| !value.trim().is_empty());

        Self {
            bind_addr: non_empty("PORTER_BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string()),
            database_url: non_empty("DATABASE_URL"),
            services_file: non_empty("PORTER_SERVICES_FILE").map(PathBuf::from),
            id_cookie: non_empty("PORTER_ID_COOKIE").unwrap_or_else(|| DEFAULT_ID_COOKIE.to_string()),
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bind_addr.parse::<std::net::SocketAddr>().is_err() {
            anyhow::bail!("bind_addr must be a socket address, got '{}'", self.bind_addr);
        }

        if let Some(url) = &self.database_url {
            if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                anyhow::bail!("database_url must start with postgres:// or postgresql://");
            }
        }

        if self.id_cookie.is_empty()
            || !self
                .id_cookie
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            anyhow::bail!("id_cookie must be a non-empty token of [A-Za-z0-9_-]");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_vars(|_| None)
    }
}

// =============================================================================
// Services File
// =============================================================================

/// Contents of the services file
#[derive(Debug, Clone, Deserialize)]
pub struct ServicesFile {
    pub services: Vec<ServiceConfig>,
}

/// One import service reached through a plain OAuth 2.0 authorization-code redirect
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Service name as stored on jobs (`import_service`)
    pub name: String,
    pub data_types: Vec<DataType>,
    pub authorize_endpoint: String,
    pub client_id: String,
    /// Callback receiving the user after consent
    pub redirect_uri: String,
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl ServicesFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read services file {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("Invalid services file {}", path.display()))
    }

    pub fn parse(json: &str) -> anyhow::Result<Self> {
        let file: ServicesFile = serde_json::from_str(json)?;

        for service in &file.services {
            if service.name.trim().is_empty() {
                anyhow::bail!("service name cannot be empty");
            }
            if service.data_types.is_empty() {
                anyhow::bail!("service '{}' declares no data types", service.name);
            }
            if service.client_id.is_empty() {
                anyhow::bail!("service '{}' has an empty client_id", service.name);
            }
        }

        Ok(file)
    }
}
