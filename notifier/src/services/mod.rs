pub mod alert_service;
pub mod composer;
pub mod expiry;
pub mod outlook_notifier;
pub mod token_validator;

pub use alert_service::{AlertDispatcher, ChannelOutcome, DispatchReport};
pub use composer::{compose, AlertBody};
pub use outlook_notifier::{CheckOutcome, OutlookNotifier};
pub use token_validator::{CredentialValidator, TokenFailure};
