//! Secrets loader for the OAuth2 client secret, SMTP password and refresh
//! tokens.
//!
//! Secrets live in `config/secrets.toml`, which should be excluded from
//! version control. Refresh tokens are keyed by mail-server name.
//!
//! Example secrets.toml:
//! ```toml
//! outlook_client_secret = "azure-client-secret"
//! smtp_password = "relay-password"
//!
//! [refresh_tokens]
//! "Outlook SMTP" = "0.AAAA..."
//! "Support inbox" = "0.AAAB..."
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

/// Structure matching the secrets.toml file format
#[derive(Debug, Deserialize, Default)]
pub struct SecretsFile {
    #[serde(default)]
    pub outlook_client_secret: String,
    #[serde(default)]
    pub smtp_password: String,
    #[serde(default)]
    pub refresh_tokens: HashMap<String, String>,
}

/// Loader for secrets from the secrets.toml file
pub struct SecretsLoader {
    secrets: SecretsFile,
}

impl SecretsLoader {
    /// Load secrets from the specified file path.
    /// Returns an empty loader if the file doesn't exist.
    pub fn load(secrets_path: &Path) -> Result<Self> {
        if !secrets_path.exists() {
            warn!(
                "Secrets file not found at {:?}, servers without refresh tokens are not validated",
                secrets_path
            );
            return Ok(Self {
                secrets: SecretsFile::default(),
            });
        }

        let content = std::fs::read_to_string(secrets_path)
            .with_context(|| format!("Failed to read secrets file: {:?}", secrets_path))?;

        let secrets: SecretsFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse secrets file: {:?}", secrets_path))?;

        info!(
            "Loaded {} refresh tokens from {:?}",
            secrets.refresh_tokens.len(),
            secrets_path
        );

        Ok(Self { secrets })
    }

    pub fn outlook_client_secret(&self) -> &str {
        &self.secrets.outlook_client_secret
    }

    pub fn smtp_password(&self) -> &str {
        &self.secrets.smtp_password
    }

    /// Refresh token stored for a mail server, by server name.
    pub fn refresh_token(&self, server_name: &str) -> Option<&str> {
        self.secrets.refresh_tokens.get(server_name).map(|s| s.as_str())
    }
}
