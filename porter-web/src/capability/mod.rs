//! Authorization capabilities
//!
//! An [`AuthUrlGenerator`] knows how to start one external service's consent
//! flow. The [`CapabilityRegistry`] maps each (service, data type) pair the
//! deployment supports to its generator. It is built once at startup and
//! shared read-only afterwards.

mod oauth2;

pub use oauth2::{OAuth2CodeGenerator, register_services};

use async_trait::async_trait;
use porter_core::domain::data_type::DataType;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Where to send the user, plus any state that must be kept until they return
#[derive(Debug, Clone, PartialEq)]
pub struct AuthFlowInitiator {
    pub auth_url: String,
    /// Provisional handshake state (e.g. a temporary credential pair) for
    /// protocols that need it. `None` for stateless redirects.
    pub initial_auth_data: Option<serde_json::Value>,
}

impl AuthFlowInitiator {
    pub fn redirect(auth_url: impl Into<String>) -> Self {
        Self {
            auth_url: auth_url.into(),
            initial_auth_data: None,
        }
    }

    pub fn with_initial_auth_data(mut self, data: impl Into<serde_json::Value>) -> Self {
        self.initial_auth_data = Some(data.into());
        self
    }
}

/// Failure while producing an authorization URL
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("request to {service} failed: {message}")]
    Request { service: String, message: String },

    #[error("malformed response from {service}: {message}")]
    MalformedResponse { service: String, message: String },

    #[error("invalid authorization endpoint '{endpoint}': {message}")]
    InvalidEndpoint { endpoint: String, message: String },
}

/// Starts the authorization flow of one external service
///
/// A generator only computes; it never touches the job store. Whatever
/// state it needs kept is returned in [`AuthFlowInitiator::initial_auth_data`].
#[async_trait]
pub trait AuthUrlGenerator: Send + Sync {
    /// Produce the consent URL for the job identified by `job_token`
    ///
    /// The token is meant to be echoed back by the service (e.g. as OAuth
    /// `state`) so the callback can find the job again.
    async fn generate_auth_url(&self, job_token: &str) -> Result<AuthFlowInitiator, GeneratorError>;
}

/// Lookup table from (service name, data type) to generator
#[derive(Default, Clone)]
pub struct CapabilityRegistry {
    generators: HashMap<(String, DataType), Arc<dyn AuthUrlGenerator>>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a generator, returning the one it replaces, if any
    pub fn register(
        &mut self,
        service: impl Into<String>,
        data_type: DataType,
        generator: Arc<dyn AuthUrlGenerator>,
    ) -> Option<Arc<dyn AuthUrlGenerator>> {
        self.generators.insert((service.into(), data_type), generator)
    }

    /// Find the generator for a pair. Service names match exactly.
    pub fn resolve(&self, service: &str, data_type: DataType) -> Option<Arc<dyn AuthUrlGenerator>> {
        self.generators
            .get(&(service.to_string(), data_type))
            .cloned()
    }

    /// Registered pairs, sorted by service then data type name
    pub fn supported(&self) -> Vec<(String, DataType)> {
        let mut pairs: Vec<_> = self.generators.keys().cloned().collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.as_str().cmp(b.1.as_str())));
        pairs
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}
