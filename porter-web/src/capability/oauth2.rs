//! Generic OAuth 2.0 authorization-code generator
//!
//! Covers services whose consent flow is a plain redirect to an authorize
//! endpoint. The job token travels as the `state` parameter; nothing needs to
//! be stored before the redirect.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;
use url::Url;

use super::{AuthFlowInitiator, AuthUrlGenerator, CapabilityRegistry, GeneratorError};
use crate::config::ServiceConfig;

/// Builds `{authorize_endpoint}?response_type=code&client_id=..&redirect_uri=..&scope=..&state=..`
#[derive(Debug, Clone)]
pub struct OAuth2CodeGenerator {
    authorize_endpoint: Url,
    client_id: String,
    redirect_uri: String,
    scopes: Vec<String>,
}

impl OAuth2CodeGenerator {
    pub fn new(service: &ServiceConfig) -> Result<Self, GeneratorError> {
        let authorize_endpoint = Url::parse(&service.authorize_endpoint).map_err(|e| {
            GeneratorError::InvalidEndpoint {
                endpoint: service.authorize_endpoint.clone(),
                message: e.to_string(),
            }
        })?;

        if !matches!(authorize_endpoint.scheme(), "http" | "https") {
            return Err(GeneratorError::InvalidEndpoint {
                endpoint: service.authorize_endpoint.clone(),
                message: "scheme must be http or https".to_string(),
            });
        }

        Ok(Self {
            authorize_endpoint,
            client_id: service.client_id.clone(),
            redirect_uri: service.redirect_uri.clone(),
            scopes: service.scopes.clone(),
        })
    }
}

#[async_trait]
impl AuthUrlGenerator for OAuth2CodeGenerator {
    async fn generate_auth_url(&self, job_token: &str) -> Result<AuthFlowInitiator, GeneratorError> {
        let mut url = self.authorize_endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("response_type", "code")
                .append_pair("client_id", &self.client_id)
                .append_pair("redirect_uri", &self.redirect_uri);
            if !self.scopes.is_empty() {
                query.append_pair("scope", &self.scopes.join(" "));
            }
            query.append_pair("state", job_token);
        }

        Ok(AuthFlowInitiator::redirect(url))
    }
}

/// Register an [`OAuth2CodeGenerator`] for every (service, data type) pair declared
pub fn register_services(
    registry: &mut CapabilityRegistry,
    services: &[ServiceConfig],
) -> Result<(), GeneratorError> {
    for service in services {
        let generator: Arc<dyn AuthUrlGenerator> = Arc::new(OAuth2CodeGenerator::new(service)?);
        for data_type in &service.data_types {
            debug!("Registering {} for {}", service.name, data_type);
            registry.register(service.name.clone(), *data_type, generator.clone());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use porter_core::domain::data_type::DataType;

    fn service(endpoint: &str) -> ServiceConfig {
        ServiceConfig {
            name: "B".to_string(),
            data_types: vec![DataType::Photos, DataType::Calendar],
            authorize_endpoint: endpoint.to_string(),
            client_id: "porter client".to_string(),
            redirect_uri: "https://porter.example.com/callback/b".to_string(),
            scopes: vec!["photos.read".to_string(), "photos.write".to_string()],
        }
    }

    #[tokio::test]
    async fn test_auth_url_layout() {
        let generator = OAuth2CodeGenerator::new(&service("https://b.example.com/authorize")).unwrap();
        let initiator = generator.generate_auth_url("dG9rZW4").await.unwrap();

        assert!(initiator.initial_auth_data.is_none());

        let url = Url::parse(&initiator.auth_url).unwrap();
        assert_eq!(url.host_str(), Some("b.example.com"));
        assert_eq!(url.path(), "/authorize");

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("response_type".to_string(), "code".to_string()),
                ("client_id".to_string(), "porter client".to_string()),
                (
                    "redirect_uri".to_string(),
                    "https://porter.example.com/callback/b".to_string()
                ),
                ("scope".to_string(), "photos.read photos.write".to_string()),
                ("state".to_string(), "dG9rZW4".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_existing_query_is_kept() {
        let generator =
            OAuth2CodeGenerator::new(&service("https://b.example.com/authorize?prompt=consent")).unwrap();
        let initiator = generator.generate_auth_url("t").await.unwrap();

        let url = Url::parse(&initiator.auth_url).unwrap();
        let first = url.query_pairs().next().unwrap();
        assert_eq!(first.0, "prompt");
        assert_eq!(first.1, "consent");
    }

    #[test]
    fn test_invalid_endpoint() {
        let err = OAuth2CodeGenerator::new(&service("not a url")).unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidEndpoint { .. }));

        let err = OAuth2CodeGenerator::new(&service("ftp://b.example.com/authorize")).unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidEndpoint { .. }));
    }

    #[test]
    fn test_register_services_covers_every_data_type() {
        let mut registry = CapabilityRegistry::new();
        register_services(&mut registry, &[service("https://b.example.com/authorize")]).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.resolve("B", DataType::Photos).is_some());
        assert!(registry.resolve("B", DataType::Calendar).is_some());
        assert!(registry.resolve("B", DataType::Mail).is_none());
    }
}
