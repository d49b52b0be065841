use super::{AlertPayload, BroadcastChannel};
use crate::config::AdminChannelConfig;
use crate::constants::defaults::HTTP_CONNECT_TIMEOUT;
use crate::errors::{describe_http_error, DeliveryError};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

/// Admin channel reached through an incoming-webhook URL.
pub struct WebhookChannel {
    name: String,
    webhook_url: String,
    client: Client,
}

impl WebhookChannel {
    pub fn new(name: String, webhook_url: String, request_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(HTTP_CONNECT_TIMEOUT)
            .timeout(request_timeout)
            .build()
            .context("Failed to create HTTP client for WebhookChannel")?;

        Ok(Self {
            name,
            webhook_url,
            client,
        })
    }

    /// Resolves the configured channel. `None` when no channel or no URL is set.
    pub fn from_config(
        config: Option<&AdminChannelConfig>,
        request_timeout: Duration,
    ) -> Result<Option<Self>> {
        let Some(config) = config else {
            debug!("No admin channel configured");
            return Ok(None);
        };
        if config.webhook_url.trim().is_empty() {
            debug!("Admin channel {} has no webhook URL", config.name);
            return Ok(None);
        }
        Self::new(
            config.name.clone(),
            config.webhook_url.trim().to_string(),
            request_timeout,
        )
        .map(Some)
    }
}

#[async_trait]
impl BroadcastChannel for WebhookChannel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn post(&self, payload: &AlertPayload) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(payload)
            .send()
            .await
            .map_err(|e| DeliveryError::ChannelFailed {
                channel: self.name.clone(),
                reason: describe_http_error(e),
            })?;

        if !response.status().is_success() {
            return Err(DeliveryError::ChannelFailed {
                channel: self.name.clone(),
                reason: format!("webhook returned status {}", response.status()),
            });
        }

        info!("Alert {} posted to channel {}", payload.alert_id, self.name);
        Ok(())
    }
}
