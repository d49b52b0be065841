//! Custom error types for the notifier
//!
//! Infrastructure paths propagate `anyhow::Error`. The enums below describe the
//! expected failures, which end up as alert lines or log entries.

use std::fmt;

/// Configuration error variants
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to load configuration file
    LoadFailed { path: String, reason: String },

    /// Invalid configuration value
    InvalidValue { field: String, reason: String },

    /// Missing required configuration
    MissingRequired { field: String },
}

/// Token exchange error variants
#[derive(Debug)]
pub enum TokenError {
    /// The identity platform rejected the refresh token
    Rejected { code: String, description: String },

    /// The request never produced a response
    Transport { reason: String },

    /// The response could not be understood
    InvalidResponse { reason: String },

    /// The attempt exceeded its time budget
    Timeout { seconds: u64 },
}

/// Delivery error variants
#[derive(Debug)]
pub enum DeliveryError {
    /// Posting to the admin channel failed
    ChannelFailed { channel: String, reason: String },

    /// Recipient or sender address could not be parsed
    InvalidAddress { address: String, reason: String },

    /// The mail transport refused or failed the send
    SendFailed { recipient: String, reason: String },

    /// The send exceeded its time budget
    Timeout { target: String, seconds: u64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path, reason)
            }
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
            ConfigError::MissingRequired { field } => {
                write!(f, "Missing required field: {}", field)
            }
        }
    }
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenError::Rejected { code, description } => {
                if description.is_empty() {
                    write!(f, "{}", code)
                } else {
                    write!(f, "{}: {}", code, description)
                }
            }
            TokenError::Transport { reason } => {
                write!(f, "Token request failed: {}", reason)
            }
            TokenError::InvalidResponse { reason } => {
                write!(f, "Invalid token response: {}", reason)
            }
            TokenError::Timeout { seconds } => {
                write!(f, "Token request timed out after {}s", seconds)
            }
        }
    }
}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryError::ChannelFailed { channel, reason } => {
                write!(f, "Posting to channel '{}' failed: {}", channel, reason)
            }
            DeliveryError::InvalidAddress { address, reason } => {
                write!(f, "Invalid address '{}': {}", address, reason)
            }
            DeliveryError::SendFailed { recipient, reason } => {
                write!(f, "Sending to {} failed: {}", recipient, reason)
            }
            DeliveryError::Timeout { target, seconds } => {
                write!(f, "Delivery to {} timed out after {}s", target, seconds)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for TokenError {}
impl std::error::Error for DeliveryError {}

/// Describes a failed HTTP request without its URL, keeping the root cause.
///
/// Webhook URLs are credentials, and reqwest's own message stops at the URL.
pub fn describe_http_error(error: reqwest::Error) -> String {
    let error = error.without_url();
    let chain: Vec<String> =
        std::iter::successors(Some(&error as &dyn std::error::Error), |e| e.source())
            .map(|e| e.to_string())
            .collect();

    match chain.as_slice() {
        [first, .., root] if first != root => format!("{}: {}", first, root),
        _ => error.to_string(),
    }
}
