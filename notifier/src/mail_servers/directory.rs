use super::{AuthKind, MailServerDirectory, MailServerRecord, ServerState};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tracing::debug;

/// Directory over the servers declared in the configuration directory.
pub struct ConfiguredServers {
    outgoing: Vec<MailServerRecord>,
    incoming: Option<Vec<MailServerRecord>>,
}

impl ConfiguredServers {
    /// `incoming` is `None` when incoming mail is not enabled in this deployment.
    pub fn new(outgoing: Vec<MailServerRecord>, incoming: Option<Vec<MailServerRecord>>) -> Self {
        Self { outgoing, incoming }
    }
}

#[async_trait]
impl MailServerDirectory for ConfiguredServers {
    async fn outgoing_servers(&self, auth_kind: AuthKind) -> Result<Vec<MailServerRecord>> {
        let servers: Vec<MailServerRecord> = self
            .outgoing
            .iter()
            .filter(|server| server.auth_kind == auth_kind)
            .cloned()
            .collect();
        debug!("Found {} outgoing {:?} servers", servers.len(), auth_kind);
        Ok(servers)
    }

    async fn incoming_servers(
        &self,
        auth_kind: AuthKind,
        state: ServerState,
    ) -> Result<Vec<MailServerRecord>> {
        let incoming = self
            .incoming
            .as_ref()
            .ok_or_else(|| anyhow!("Incoming mail servers are not enabled"))?;

        let servers: Vec<MailServerRecord> = incoming
            .iter()
            .filter(|server| server.auth_kind == auth_kind && server.state == state)
            .cloned()
            .collect();
        debug!("Found {} incoming {:?} servers in state {:?}", servers.len(), auth_kind, state);
        Ok(servers)
    }
}
