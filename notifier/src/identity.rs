//! Administrator identities that receive alert emails.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminRecipient {
    pub login: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Holds the system-administration permission
    #[serde(default)]
    pub system_admin: bool,
}

impl AdminRecipient {
    /// Email address to alert, if this identity qualifies for alerts
    pub fn alert_address(&self) -> Option<&str> {
        if !self.system_admin {
            return None;
        }
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }
}

/// Identity/permission interface.
#[async_trait]
pub trait AdminDirectory: Send + Sync {
    async fn administrators(&self) -> Result<Vec<AdminRecipient>>;
}

/// Administrators listed in `main.toml`.
pub struct ConfiguredAdministrators {
    recipients: Vec<AdminRecipient>,
}

impl ConfiguredAdministrators {
    pub fn new(recipients: Vec<AdminRecipient>) -> Self {
        Self { recipients }
    }
}

#[async_trait]
impl AdminDirectory for ConfiguredAdministrators {
    async fn administrators(&self) -> Result<Vec<AdminRecipient>> {
        Ok(self.recipients.clone())
    }
}
