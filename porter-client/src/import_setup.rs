//! Import setup endpoint

use crate::PortabilityClient;
use crate::error::{ClientError, Result};
use porter_core::dto::import_setup::ImportSetupResponse;
use reqwest::header::COOKIE;

impl PortabilityClient {
    /// Start import authorization for a job
    ///
    /// # Arguments
    /// * `job_token` - The encoded job id, sent in the id cookie
    ///
    /// # Returns
    /// The data type, both service names and the URL to send the user to
    ///
    /// # Example
    /// ```no_run
    /// # use porter_client::PortabilityClient;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = PortabilityClient::new("http://localhost:8080");
    /// let setup = client.import_setup("NGY1ZDM...").await?;
    /// println!("Redirect to {}", setup.import_auth_url);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn import_setup(&self, job_token: &str) -> Result<ImportSetupResponse> {
        let job_token = job_token.trim();
        if job_token.is_empty() || job_token.contains([';', ',', ' ']) {
            return Err(ClientError::InvalidRequest(
                "job token must be a non-empty cookie value".to_string(),
            ));
        }

        let url = format!("{}/_/importSetup", self.base_url);
        tracing::debug!("Requesting import setup from {}", url);

        let response = self
            .client
            .get(&url)
            .header(COOKIE, format!("{}={}", self.id_cookie, job_token))
            .send()
            .await?;

        self.handle_response(response).await
    }
}
