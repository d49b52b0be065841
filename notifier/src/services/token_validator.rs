//! Exercises the OAuth2 refresh token of every active Outlook mail server.

use crate::constants::alerts::ERROR_TEXT_MAX_CHARS;
use crate::errors::TokenError;
use crate::mail_servers::{AuthKind, MailServerDirectory, MailServerRecord, ServerRole, ServerState};
use crate::oauth::TokenIssuer;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// A server whose token could not be turned into an authentication string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenFailure {
    pub server_name: String,
    pub role: ServerRole,
    /// Already truncated to `ERROR_TEXT_MAX_CHARS`
    pub error: String,
}

impl TokenFailure {
    pub fn to_message(&self) -> String {
        format!(
            "❌ {} server \"{}\": {}",
            self.role.label(),
            self.server_name,
            self.error
        )
    }
}

pub fn truncate_error(text: &str) -> String {
    text.chars().take(ERROR_TEXT_MAX_CHARS).collect()
}

pub struct CredentialValidator {
    issuer: Arc<dyn TokenIssuer>,
    attempt_timeout: Duration,
}

impl CredentialValidator {
    pub fn new(issuer: Arc<dyn TokenIssuer>, attempt_timeout: Duration) -> Self {
        Self {
            issuer,
            attempt_timeout,
        }
    }

    /// Outgoing servers first, then confirmed incoming servers.
    ///
    /// Failing to list outgoing servers is an infrastructure error. An
    /// unavailable incoming capability contributes nothing.
    pub async fn check_all(&self, directory: &dyn MailServerDirectory) -> Result<Vec<TokenFailure>> {
        let outgoing = directory
            .outgoing_servers(AuthKind::Outlook)
            .await
            .context("Failed to query outgoing mail servers")?;
        let mut failures = self.validate(&outgoing).await;

        match directory
            .incoming_servers(AuthKind::Outlook, ServerState::Done)
            .await
        {
            Ok(incoming) => failures.extend(self.validate(&incoming).await),
            Err(e) => debug!("Skipping incoming mail servers: {}", e),
        }

        if !failures.is_empty() {
            info!("{} mail servers failed token validation", failures.len());
        }
        Ok(failures)
    }

    /// One attempt per eligible server, in input order. Servers that are not
    /// Outlook-authenticated or carry no refresh token are skipped.
    pub async fn validate(&self, servers: &[MailServerRecord]) -> Vec<TokenFailure> {
        let mut failures = Vec::new();

        for server in servers {
            if server.auth_kind != AuthKind::Outlook {
                continue;
            }
            let Some(refresh_token) = server.refresh_token() else {
                continue;
            };

            let attempt = timeout(
                self.attempt_timeout,
                self.issuer.generate_oauth2_string(&server.user, refresh_token),
            )
            .await;

            let error = match attempt {
                Ok(Ok(_)) => {
                    debug!("Token valid for {} server {}", server.role, server.name);
                    continue;
                }
                Ok(Err(e)) => e,
                Err(_) => TokenError::Timeout {
                    seconds: self.attempt_timeout.as_secs(),
                },
            };

            warn!(
                "Token validation failed for {} server {}: {}",
                server.role, server.name, error
            );
            failures.push(TokenFailure {
                server_name: server.name.clone(),
                role: server.role,
                error: truncate_error(&error.to_string()),
            });
        }

        failures
    }
}
