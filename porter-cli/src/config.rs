//! Configuration module
//!
//! Handles CLI configuration: where the web service lives and how it expects
//! the job token.

use porter_client::PortabilityClient;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the Porter web service
    pub server_url: String,
    /// Name of the cookie carrying the job token
    pub id_cookie: String,
}

impl Config {
    pub fn client(&self) -> PortabilityClient {
        PortabilityClient::new(&self.server_url).with_id_cookie(&self.id_cookie)
    }
}
