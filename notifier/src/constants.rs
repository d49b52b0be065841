//! Central repository for settings keys, notification windows and timeouts
//!
//! Constants are grouped by concern so the orchestrator, the validator and
//! the dispatcher share a single source of truth.

use std::time::Duration;

/// Keys read and written through the parameter store
pub mod settings {
    /// Expiration date of the Azure AD client secret (`YYYY-MM-DD` or empty)
    pub const SECRET_EXPIRATION_KEY: &str = "microsoft_outlook_secret_expiration";

    /// Day of the most recent alert dispatch (`YYYY-MM-DD` or empty)
    pub const LAST_NOTIFIED_KEY: &str = "outlook_notifier_last_date";

    /// Storage format for both dates
    pub const DATE_FORMAT: &str = "%Y-%m-%d";
}

/// Notification rules
pub mod alerts {
    /// Days before expiration at which warnings start
    pub const NOTIFY_DAYS_BEFORE: i64 = 30;

    /// Maximum characters of a token error kept in an alert line
    pub const ERROR_TEXT_MAX_CHARS: usize = 100;

    /// Subject line of alert emails and title of the channel post
    pub const ALERT_SUBJECT: &str = "🔔 Microsoft Outlook Alert";

    /// Sender used when no company address is configured
    pub const FALLBACK_EMAIL_FROM: &str = "noreply@localhost";

    /// Display format of the expiration date inside alert text
    pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";
}

/// Microsoft identity platform
pub mod outlook {
    pub const DEFAULT_AUTHORITY: &str = "https://login.microsoftonline.com";

    pub const DEFAULT_TENANT: &str = "common";

    /// Scopes requested when exchanging a refresh token
    pub const DEFAULT_SCOPES: &str = "offline_access https://outlook.office.com/IMAP.AccessAsUser.All https://outlook.office.com/POP.AccessAsUser.All https://outlook.office.com/SMTP.Send";
}

/// Default configuration values
pub mod defaults {
    use super::Duration;

    /// Daily at 08:00 (6-field cron: sec min hour day month dow)
    pub const CHECK_SCHEDULE: &str = "0 0 8 * * *";

    pub const TOKEN_TIMEOUT_SECONDS: u64 = 30;

    pub const DELIVERY_TIMEOUT_SECONDS: u64 = 10;

    pub const DATABASE_PATH: &str = "data/notifier.db";

    /// Connect timeout for the shared HTTP client
    pub const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    pub const SMTP_PORT: u16 = 587;
}
