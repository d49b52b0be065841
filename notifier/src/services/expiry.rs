//! Maps the configured secret expiration date to at most one alert line.

use crate::constants::alerts::{DISPLAY_DATE_FORMAT, NOTIFY_DAYS_BEFORE};
use chrono::NaiveDate;

/// Whole days from `today` until `expiration`; negative once expired.
pub fn days_until(expiration: NaiveDate, today: NaiveDate) -> i64 {
    (expiration - today).num_days()
}

pub fn expiration_message(expiration: NaiveDate, today: NaiveDate) -> Option<String> {
    let days_left = days_until(expiration, today);

    if days_left > NOTIFY_DAYS_BEFORE {
        return None;
    }

    let message = if days_left < 0 {
        format!(
            "⚠️ The Outlook client secret EXPIRED {} days ago.",
            days_left.abs()
        )
    } else if days_left == 0 {
        "⚠️ The Outlook client secret expires TODAY.".to_string()
    } else {
        format!(
            "🔔 The Outlook client secret expires in {} days ({}).",
            days_left,
            expiration.format(DISPLAY_DATE_FORMAT)
        )
    };

    Some(message)
}
