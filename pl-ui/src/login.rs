//! HTTP transport for the login request.

use async_trait::async_trait;
use pl_core::login::LOGIN_PATH;
use pl_core::{LoginClient, LoginCredentials, LoginError, LoginOutcome};
use reqwest::Client;
use tracing::debug;

/// Posts credentials as JSON to `<base>/api/login`.
#[derive(Debug, Clone)]
pub struct HttpLoginClient {
    client: Client,
    url: String,
}

impl HttpLoginClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            url: format!("{}{}", base_url.trim_end_matches('/'), LOGIN_PATH),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl LoginClient for HttpLoginClient {
    async fn login(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<LoginOutcome, LoginError> {
        debug!(url = %self.url, "sending login request");
        let response = self
            .client
            .post(&self.url)
            .json(credentials)
            .send()
            .await
            .map_err(|e| LoginError::Network(e.to_string()))?;

        Ok(LoginOutcome::from_status(response.status().as_u16()))
    }
}
