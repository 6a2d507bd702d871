//! HTTP Delivery Client
//!
//! Sends webhook payloads to Discord using reqwest. One attempt per call,
//! no retries; the per-request timeout and redirect cap come from
//! `DeliveryConfig`. Endpoint URLs embed the webhook token, so errors
//! never echo the URL back.

use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::Client;
use std::time::Duration;

use forumcord::ports::DeliveryConfig;
use forumcord::{DeliveryClient, DeliveryMethod, DiscordPayload, DomainError};

/// reqwest implementation of DeliveryClient
pub struct HttpDeliveryClient {
    client: Client,
}

impl HttpDeliveryClient {
    pub fn new() -> Self {
        Self::with_config(DeliveryConfig::default())
    }

    pub fn with_config(config: DeliveryConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(Policy::limited(config.max_redirects))
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to build HTTP client");

        Self { client }
    }
}

impl Default for HttpDeliveryClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeliveryClient for HttpDeliveryClient {
    async fn request(
        &self,
        method: DeliveryMethod,
        url: &str,
        body: Option<&DiscordPayload>,
    ) -> Result<String, DomainError> {
        let request = match method {
            DeliveryMethod::Post => self.client.post(url),
            DeliveryMethod::Patch => self.client.patch(url),
            DeliveryMethod::Delete => self.client.delete(url),
        };

        let request = match body {
            Some(payload) => request.json(payload),
            None => request,
        };

        let response = request.send().await.map_err(|e| {
            DomainError::ExternalService(format!("{} to Discord failed: {}", method, e))
        })?;

        let status = response.status();
        let body_text = response.text().await.map_err(|e| {
            DomainError::ExternalService(format!("Failed to read Discord response: {}", e))
        })?;

        if !status.is_success() {
            return Err(DomainError::ExternalService(format!(
                "Discord returned {}: {}",
                status, body_text
            )));
        }

        Ok(body_text)
    }
}
