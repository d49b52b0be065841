//! Common test data and builders

use chrono::NaiveDate;
use notifier::identity::AdminRecipient;
use notifier::mail_servers::{AuthKind, MailServerRecord, ServerRole, ServerState};

/// Fixed "today" so window arithmetic is independent of the wall clock
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 10).expect("valid date")
}

pub fn days_from_today(days: i64) -> NaiveDate {
    today() + chrono::Duration::days(days)
}

pub fn outgoing(name: &str, refresh_token: Option<&str>) -> MailServerRecord {
    MailServerRecord {
        name: name.to_string(),
        auth_kind: AuthKind::Outlook,
        user: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        refresh_token: refresh_token.map(str::to_string),
        role: ServerRole::Outgoing,
        state: ServerState::Draft,
    }
}

pub fn incoming(name: &str, refresh_token: Option<&str>, state: ServerState) -> MailServerRecord {
    MailServerRecord {
        role: ServerRole::Incoming,
        state,
        ..outgoing(name, refresh_token)
    }
}

pub fn with_kind(mut record: MailServerRecord, kind: AuthKind) -> MailServerRecord {
    record.auth_kind = kind;
    record
}

pub fn admin(login: &str, email: Option<&str>, system_admin: bool) -> AdminRecipient {
    AdminRecipient {
        login: login.to_string(),
        email: email.map(str::to_string),
        system_admin,
    }
}

pub mod addresses {
    pub const ALICE: &str = "alice@example.com";
    pub const BOB: &str = "bob@example.com";
    pub const CAROL: &str = "carol@example.com";
    pub const SENDER: &str = "it@example.com";
}
