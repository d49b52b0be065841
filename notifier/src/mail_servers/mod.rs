//! Mail-server records and the query interface the validator consumes.
//!
//! Records are owned by the mail subsystem; this crate only reads them. The
//! `MailServerDirectory` trait is the seam, `ConfiguredServers` is the
//! implementation backed by `config/servers/*.toml`.

pub mod directory;

pub use directory::ConfiguredServers;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Authentication mechanism a server is configured with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthKind {
    Outlook,
    Gmail,
    Login,
    Certificate,
}

/// Direction of a server, used for filtering and alert wording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServerRole {
    Outgoing,
    Incoming,
}

impl ServerRole {
    pub fn label(&self) -> &'static str {
        match self {
            ServerRole::Outgoing => "Outgoing",
            ServerRole::Incoming => "Incoming",
        }
    }
}

impl fmt::Display for ServerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Activation state of an incoming server. `Done` means confirmed and active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerState {
    #[default]
    Draft,
    Done,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailServerRecord {
    pub name: String,
    pub auth_kind: AuthKind,
    /// SMTP user for outgoing servers, login for incoming ones
    pub user: String,
    pub refresh_token: Option<String>,
    pub role: ServerRole,
    pub state: ServerState,
}

impl MailServerRecord {
    /// Refresh token, if present and non-blank
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

/// Query interface over the configured mail servers.
#[async_trait]
pub trait MailServerDirectory: Send + Sync {
    /// Outgoing servers using the given authentication mechanism.
    async fn outgoing_servers(&self, auth_kind: AuthKind) -> Result<Vec<MailServerRecord>>;

    /// Incoming servers with the given mechanism and state.
    ///
    /// An `Err` means the incoming-mail capability is not available in this
    /// deployment; callers treat it as "no incoming servers".
    async fn incoming_servers(
        &self,
        auth_kind: AuthKind,
        state: ServerState,
    ) -> Result<Vec<MailServerRecord>>;
}
