use super::{xoauth2_string, TokenIssuer};
use crate::config::OutlookConfig;
use crate::constants::defaults::HTTP_CONNECT_TIMEOUT;
use crate::errors::{describe_http_error, TokenError};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

/// Exchanges refresh tokens at the Microsoft identity platform.
pub struct OutlookTokenClient {
    client: Client,
    token_endpoint: String,
    client_id: String,
    client_secret: String,
    scopes: String,
}

impl OutlookTokenClient {
    pub fn new(config: &OutlookConfig, request_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(HTTP_CONNECT_TIMEOUT)
            .timeout(request_timeout)
            .build()
            .context("Failed to create HTTP client for OutlookTokenClient")?;

        Ok(Self {
            client,
            token_endpoint: config.token_endpoint(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            scopes: config.scopes.clone(),
        })
    }

    async fn fetch_access_token(&self, refresh_token: &str) -> Result<String, TokenError> {
        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("scope", self.scopes.as_str()),
        ];

        let response = self
            .client
            .post(&self.token_endpoint)
            .form(&params)
            .send()
            .await
            .map_err(|e| TokenError::Transport {
                reason: describe_http_error(e),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| TokenError::Transport {
            reason: describe_http_error(e),
        })?;

        let parsed: TokenResponse =
            serde_json::from_str(&body).map_err(|e| TokenError::InvalidResponse {
                reason: format!("HTTP {}: {}", status, e),
            })?;

        if let Some(code) = parsed.error {
            return Err(TokenError::Rejected {
                code,
                description: parsed.error_description.unwrap_or_default(),
            });
        }

        if !status.is_success() {
            return Err(TokenError::InvalidResponse {
                reason: format!("HTTP {}", status),
            });
        }

        parsed
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| TokenError::InvalidResponse {
                reason: "missing access_token".to_string(),
            })
    }
}

#[async_trait]
impl TokenIssuer for OutlookTokenClient {
    #[instrument(skip(self, refresh_token))]
    async fn generate_oauth2_string(
        &self,
        user: &str,
        refresh_token: &str,
    ) -> Result<String, TokenError> {
        let access_token = self.fetch_access_token(refresh_token).await?;
        debug!("Obtained Outlook access token for {}", user);
        Ok(xoauth2_string(user, &access_token))
    }
}
