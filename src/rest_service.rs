use crate::config::Config;
use crate::errors::AppError;
use reqwest::{header, Client, Response};
use serde_json::Value;
use std::time::Duration;

/// Bearer-authenticated GET client for downstream JSON APIs.
///
/// No retries. Timeouts come from `REST_TIMEOUT_SECS`.
#[derive(Clone)]
pub struct RestService {
    client: Client,
}

impl RestService {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.rest_timeout_secs))
            .build()
            .map_err(|e| {
                AppError::ExternalApiError(format!("Failed to create REST client: {}", e))
            })?;

        Ok(Self { client })
    }

    pub async fn get(&self, endpoint: &str, token: &str) -> Result<Response, AppError> {
        tracing::info!("GET {}", endpoint);

        let response = self
            .client
            .get(endpoint)
            .bearer_auth(token)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("GET {} failed: {}", endpoint, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ExternalApiError(format!(
                "{} returned status {}: {}",
                endpoint, status, error_text
            )));
        }

        Ok(response)
    }

    /// `get` followed by a JSON parse of the body.
    pub async fn get_json(&self, endpoint: &str, token: &str) -> Result<Value, AppError> {
        let response = self.get(endpoint, token).await?;

        response.json().await.map_err(|e| {
            AppError::ExternalApiError(format!("Failed to parse response from {}: {}", endpoint, e))
        })
    }
}
