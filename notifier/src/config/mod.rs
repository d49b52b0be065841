pub mod manager;
pub mod secrets;

pub use manager::ConfigManager;
pub use secrets::SecretsLoader;

use crate::constants::{defaults, outlook};
use crate::errors::ConfigError;
use crate::identity::AdminRecipient;
use crate::mail_servers::{AuthKind, MailServerRecord, ServerState};
use crate::scheduler::validate_6_field_cron;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifierConfig {
    #[serde(default = "default_database_path")]
    pub database_path: String,
    #[serde(default = "default_check_schedule")]
    pub check_schedule: String,
    #[serde(default)]
    pub run_on_startup: bool,
    #[serde(default = "default_token_timeout")]
    pub token_timeout_seconds: u64,
    #[serde(default = "default_delivery_timeout")]
    pub delivery_timeout_seconds: u64,
    pub company_email: Option<String>,
    #[serde(default = "default_incoming_enabled")]
    pub incoming_enabled: bool,
    pub outlook: OutlookConfig,
    pub smtp: SmtpConfig,
    pub admin_channel: Option<AdminChannelConfig>,
    #[serde(default)]
    pub administrators: Vec<AdminRecipient>,
    // Populated from config/servers/*.toml
    #[serde(skip)]
    pub outgoing_servers: Vec<MailServerRecord>,
    #[serde(skip)]
    pub incoming_servers: Vec<MailServerRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlookConfig {
    pub client_id: String,
    #[serde(default = "default_tenant")]
    pub tenant: String,
    #[serde(default = "default_authority")]
    pub authority: String,
    #[serde(default = "default_scopes")]
    pub scopes: String,
    // Filled from secrets.toml
    #[serde(skip)]
    pub client_secret: String,
}

impl OutlookConfig {
    pub fn token_endpoint(&self) -> String {
        format!(
            "{}/{}/oauth2/v2.0/token",
            self.authority.trim_end_matches('/'),
            self.tenant
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub server: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    #[serde(default)]
    pub username: String,
    // Filled from secrets.toml
    #[serde(skip)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminChannelConfig {
    pub name: String,
    #[serde(default)]
    pub webhook_url: String,
}

/// Contents of one `config/servers/*.toml` file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfigFile {
    #[serde(default)]
    pub outgoing: Vec<ServerEntry>,
    #[serde(default)]
    pub incoming: Vec<ServerEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerEntry {
    pub name: String,
    pub auth_kind: AuthKind,
    pub user: String,
    #[serde(default)]
    pub state: ServerState,
}

fn default_database_path() -> String {
    defaults::DATABASE_PATH.to_string()
}

fn default_check_schedule() -> String {
    defaults::CHECK_SCHEDULE.to_string()
}

fn default_token_timeout() -> u64 {
    defaults::TOKEN_TIMEOUT_SECONDS
}

fn default_delivery_timeout() -> u64 {
    defaults::DELIVERY_TIMEOUT_SECONDS
}

fn default_incoming_enabled() -> bool {
    true
}

fn default_tenant() -> String {
    outlook::DEFAULT_TENANT.to_string()
}

fn default_authority() -> String {
    outlook::DEFAULT_AUTHORITY.to_string()
}

fn default_scopes() -> String {
    outlook::DEFAULT_SCOPES.to_string()
}

fn default_smtp_port() -> u16 {
    defaults::SMTP_PORT
}

impl NotifierConfig {
    /// Sender address for alert emails
    pub fn email_from(&self) -> &str {
        self.company_email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .unwrap_or(crate::constants::alerts::FALLBACK_EMAIL_FROM)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.outlook.client_id.trim().is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "outlook.client_id".to_string(),
            });
        }
        if self.smtp.server.trim().is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "smtp.server".to_string(),
            });
        }
        if self.token_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "token_timeout_seconds".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.delivery_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "delivery_timeout_seconds".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
        validate_6_field_cron(&self.check_schedule)?;
        Ok(())
    }
}
