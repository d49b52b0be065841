pub mod config;
pub mod constants;
pub mod database;
pub mod delivery;
pub mod errors;
pub mod identity;
pub mod mail_servers;
pub mod oauth;
pub mod scheduler;
pub mod services;
pub mod store;

// Re-export commonly used types
pub use config::{ConfigManager, NotifierConfig};
pub use database::Database;
pub use delivery::{BroadcastChannel, MailSender, SmtpMailer, WebhookChannel};
pub use identity::{AdminDirectory, AdminRecipient, ConfiguredAdministrators};
pub use mail_servers::{ConfiguredServers, MailServerDirectory, MailServerRecord};
pub use oauth::{OutlookTokenClient, TokenIssuer};
pub use scheduler::NotifierScheduler;
pub use services::{AlertDispatcher, CheckOutcome, CredentialValidator, OutlookNotifier};
pub use store::ParameterStore;
