//! Delivery sinks for composed alerts: the admin broadcast channel and email.

pub mod smtp;
pub mod webhook;

pub use smtp::SmtpMailer;
pub use webhook::WebhookChannel;

use crate::errors::DeliveryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body posted to the admin channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertPayload {
    pub alert_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub channel: String,
    pub subject: String,
    pub body_html: String,
    pub body_text: String,
}

#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

/// Administrative broadcast channel.
#[async_trait]
pub trait BroadcastChannel: Send + Sync {
    fn name(&self) -> &str;

    async fn post(&self, payload: &AlertPayload) -> Result<(), DeliveryError>;
}

/// Email-send primitive.
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), DeliveryError>;
}
