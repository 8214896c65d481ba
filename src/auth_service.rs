use crate::config::Config;
use crate::errors::AppError;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// Client for the service-to-service token endpoint (client-credentials grant).
#[derive(Clone)]
pub struct AuthService {
    client: Client,
    token_url: String,
}

impl AuthService {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.rest_timeout_secs))
            .build()
            .map_err(|e| {
                AppError::ExternalApiError(format!("Failed to create auth client: {}", e))
            })?;

        Ok(Self {
            client,
            token_url: config.auth_token_url.clone(),
        })
    }

    /// Requests a service account token.
    ///
    /// Returns `Ok(None)` when the token endpoint answers but does not issue a
    /// token; callers decide how to treat that. Transport failures are errors.
    pub async fn get_service_client_token(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<Option<String>, AppError> {
        tracing::debug!("Requesting service client token for {}", client_id);

        let response = self
            .client
            .post(&self.token_url)
            .basic_auth(client_id, Some(client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("Token request failed: {}", e)))?;

        if !response.status().is_success() {
            tracing::warn!(
                "Token endpoint returned status {} for client {}",
                response.status(),
                client_id
            );
            return Ok(None);
        }

        let token = match response.json::<TokenResponse>().await {
            Ok(body) => body.access_token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!("Token endpoint returned an unreadable body: {}", e);
                None
            }
        };

        Ok(token)
    }
}
