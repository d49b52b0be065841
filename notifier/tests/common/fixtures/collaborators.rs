//! In-process stand-ins for the notifier's collaborator traits

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use notifier::delivery::{AlertPayload, BroadcastChannel, MailSender, OutgoingEmail};
use notifier::errors::{DeliveryError, TokenError};
use notifier::identity::{AdminDirectory, AdminRecipient};
use notifier::mail_servers::{AuthKind, MailServerDirectory, MailServerRecord, ServerState};
use notifier::oauth::TokenIssuer;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Records every email; fails for the addresses it was told to reject.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
    attempts: AtomicUsize,
    failing: HashSet<String>,
}

impl RecordingMailer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_for(addresses: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            failing: addresses.iter().map(|a| a.to_string()).collect(),
            ..Self::default()
        })
    }

    pub async fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().await.clone()
    }

    pub async fn recipients(&self) -> Vec<String> {
        let mut recipients: Vec<String> = self.sent().await.into_iter().map(|e| e.to).collect();
        recipients.sort();
        recipients
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MailSender for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), DeliveryError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(&email.to) {
            return Err(DeliveryError::SendFailed {
                recipient: email.to.clone(),
                reason: "550 mailbox unavailable".to_string(),
            });
        }
        self.sent.lock().await.push(email.clone());
        Ok(())
    }
}

/// Mail transport that never answers
pub struct HangingMailer;

#[async_trait]
impl MailSender for HangingMailer {
    async fn send(&self, _email: &OutgoingEmail) -> Result<(), DeliveryError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(())
    }
}

/// Broadcast channel that keeps the payloads it receives
pub struct RecordingChannel {
    name: String,
    posts: Mutex<Vec<AlertPayload>>,
    fail: bool,
}

impl RecordingChannel {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            posts: Mutex::new(Vec::new()),
            fail: false,
        })
    }

    pub fn failing(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            posts: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub async fn posts(&self) -> Vec<AlertPayload> {
        self.posts.lock().await.clone()
    }
}

#[async_trait]
impl BroadcastChannel for RecordingChannel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn post(&self, payload: &AlertPayload) -> Result<(), DeliveryError> {
        if self.fail {
            return Err(DeliveryError::ChannelFailed {
                channel: self.name.clone(),
                reason: "channel archived".to_string(),
            });
        }
        self.posts.lock().await.push(payload.clone());
        Ok(())
    }
}

/// Token issuer that accepts every refresh token except the listed ones
#[derive(Default)]
pub struct ScriptedIssuer {
    rejected: HashSet<String>,
    calls: AtomicUsize,
}

impl ScriptedIssuer {
    pub fn accepting_all() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn rejecting(tokens: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            rejected: tokens.iter().map(|t| t.to_string()).collect(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenIssuer for ScriptedIssuer {
    async fn generate_oauth2_string(
        &self,
        user: &str,
        refresh_token: &str,
    ) -> Result<String, TokenError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.rejected.contains(refresh_token) {
            return Err(TokenError::Rejected {
                code: "invalid_grant".to_string(),
                description: "AADSTS700082: The refresh token has expired".to_string(),
            });
        }
        Ok(notifier::oauth::xoauth2_string(user, "access"))
    }
}

/// Directory whose queries always fail
pub struct UnreachableDirectory;

#[async_trait]
impl MailServerDirectory for UnreachableDirectory {
    async fn outgoing_servers(&self, _kind: AuthKind) -> Result<Vec<MailServerRecord>> {
        Err(anyhow!("mail server registry unreachable"))
    }

    async fn incoming_servers(
        &self,
        _kind: AuthKind,
        _state: ServerState,
    ) -> Result<Vec<MailServerRecord>> {
        Err(anyhow!("mail server registry unreachable"))
    }
}

/// Identity subsystem that cannot be queried
pub struct UnreachableAdmins;

#[async_trait]
impl AdminDirectory for UnreachableAdmins {
    async fn administrators(&self) -> Result<Vec<AdminRecipient>> {
        Err(anyhow!("identity service unreachable"))
    }
}
