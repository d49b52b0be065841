use crate::constants::alerts::ALERT_SUBJECT;
use crate::delivery::{AlertPayload, BroadcastChannel, MailSender, OutgoingEmail};
use crate::errors::DeliveryError;
use crate::identity::AdminDirectory;
use crate::services::composer::AlertBody;
use chrono::Utc;
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, error, info};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChannelOutcome {
    Posted,
    Skipped,
    Failed,
}

/// What happened to one dispatch. Failures are already logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    pub channel: ChannelOutcome,
    pub emails_sent: usize,
    pub emails_failed: usize,
}

/// Fans an alert out to the admin channel and to every system administrator.
///
/// Each destination is attempted independently and bounded by `send_timeout`;
/// no failure reaches the caller.
pub struct AlertDispatcher {
    channel: Option<Arc<dyn BroadcastChannel>>,
    mailer: Arc<dyn MailSender>,
    admins: Arc<dyn AdminDirectory>,
    email_from: String,
    send_timeout: Duration,
}

impl AlertDispatcher {
    pub fn new(
        channel: Option<Arc<dyn BroadcastChannel>>,
        mailer: Arc<dyn MailSender>,
        admins: Arc<dyn AdminDirectory>,
        email_from: String,
        send_timeout: Duration,
    ) -> Self {
        Self {
            channel,
            mailer,
            admins,
            email_from,
            send_timeout,
        }
    }

    pub async fn dispatch(&self, body: &AlertBody) -> DispatchReport {
        let channel = self.post_to_channel(body).await;
        let (emails_sent, emails_failed) = self.email_administrators(body).await;

        DispatchReport {
            channel,
            emails_sent,
            emails_failed,
        }
    }

    async fn post_to_channel(&self, body: &AlertBody) -> ChannelOutcome {
        let Some(channel) = &self.channel else {
            debug!("Admin channel not available, skipping channel post");
            return ChannelOutcome::Skipped;
        };

        let payload = AlertPayload {
            alert_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            channel: channel.name().to_string(),
            subject: ALERT_SUBJECT.to_string(),
            body_html: body.html.clone(),
            body_text: body.text.clone(),
        };

        let result = match timeout(self.send_timeout, channel.post(&payload)).await {
            Ok(result) => result,
            Err(_) => Err(DeliveryError::Timeout {
                target: format!("channel {}", channel.name()),
                seconds: self.send_timeout.as_secs(),
            }),
        };

        match result {
            Ok(()) => ChannelOutcome::Posted,
            Err(e) => {
                error!("Failed to post alert to admin channel {}: {}", channel.name(), e);
                ChannelOutcome::Failed
            }
        }
    }

    async fn email_administrators(&self, body: &AlertBody) -> (usize, usize) {
        let admins = match self.admins.administrators().await {
            Ok(admins) => admins,
            Err(e) => {
                error!("Failed to list administrators for alert email: {}", e);
                return (0, 0);
            }
        };

        let recipients: Vec<String> = admins
            .iter()
            .filter_map(|admin| admin.alert_address())
            .map(str::to_string)
            .collect();

        if recipients.is_empty() {
            debug!("No administrators with an email address to alert");
            return (0, 0);
        }

        let html_body = format!("<p>{}</p>", body.html);
        let sends = recipients.into_iter().map(|to| {
            let email = OutgoingEmail {
                to,
                from: self.email_from.clone(),
                subject: ALERT_SUBJECT.to_string(),
                html_body: html_body.clone(),
                text_body: body.text.clone(),
            };
            async move {
                let result = match timeout(self.send_timeout, self.mailer.send(&email)).await {
                    Ok(result) => result,
                    Err(_) => Err(DeliveryError::Timeout {
                        target: email.to.clone(),
                        seconds: self.send_timeout.as_secs(),
                    }),
                };
                if let Err(e) = &result {
                    error!("Failed to send alert email to {}: {}", email.to, e);
                }
                result.is_ok()
            }
        });

        let outcomes = join_all(sends).await;
        let sent = outcomes.iter().filter(|ok| **ok).count();
        let failed = outcomes.len() - sent;

        info!("Alert emails: {} sent, {} failed", sent, failed);
        (sent, failed)
    }
}
