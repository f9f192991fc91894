//! Porter HTTP Client
//!
//! A simple, type-safe HTTP client for the Porter web service.
//!
//! # Example
//!
//! ```no_run
//! use porter_client::PortabilityClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = PortabilityClient::new("http://localhost:8080");
//!
//!     // Start import authorization for a job
//!     let setup = client.import_setup("NGY1ZDM...").await?;
//!
//!     println!("Send the user to: {}", setup.import_auth_url);
//!     Ok(())
//! }
//! ```

pub mod error;
mod import_setup;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use porter_core::dto::import_setup::ImportSetupResponse;

use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Default name of the cookie carrying the job token
pub const DEFAULT_ID_COOKIE: &str = "encoded_id";

/// HTTP client for the Porter web API
#[derive(Debug, Clone)]
pub struct PortabilityClient {
    /// Base URL of the web service (e.g., "http://localhost:8080")
    base_url: String,
    /// Cookie the server reads the job token from
    id_cookie: String,
    /// HTTP client instance
    client: Client,
}

/// Body of `GET /health`
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub capabilities: usize,
}

impl PortabilityClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the web service (e.g., "http://localhost:8080")
    ///
    /// # Example
    /// ```
    /// use porter_client::PortabilityClient;
    ///
    /// let client = PortabilityClient::new("http://localhost:8080");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use porter_client::PortabilityClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = PortabilityClient::with_client("http://localhost:8080", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            id_cookie: DEFAULT_ID_COOKIE.to_string(),
            client,
        }
    }

    /// Use a different cookie name for the job token
    pub fn with_id_cookie(mut self, name: impl Into<String>) -> Self {
        self.id_cookie = name.into();
        self
    }

    /// Get the base URL of the web service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check that the web service is up
    pub async fn health(&self) -> Result<HealthStatus> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), &error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}
