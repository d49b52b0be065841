//! Cron-based trigger for the daily Outlook check
//!
//! The schedule uses the 6-field format of `tokio-cron-scheduler`
//! (sec min hour day month dow), evaluated in UTC:
//!
//! ```toml
//! check_schedule = "0 0 8 * * *"  # Daily at 08:00
//! run_on_startup = true           # Also run one pass when the service starts
//! ```
//!
//! Extra triggers on the same day are harmless: the notifier sends at most
//! one alert per calendar day.

pub mod daily_job;
pub use daily_job::NotifierScheduler;

use crate::errors::ConfigError;

const FIELD: &str = "check_schedule";

fn invalid(reason: String) -> ConfigError {
    ConfigError::InvalidValue {
        field: FIELD.to_string(),
        reason,
    }
}

pub fn validate_6_field_cron(schedule: &str) -> Result<(), ConfigError> {
    let parts: Vec<&str> = schedule.split_whitespace().collect();

    if parts.len() != 6 {
        return Err(invalid(format!(
            "tokio-cron-scheduler requires exactly 6 fields: second minute hour day month dayofweek. Got {} fields: '{}'",
            parts.len(),
            schedule
        )));
    }

    validate_cron_field(parts[0], "second", 0, 59)?;
    validate_cron_field(parts[1], "minute", 0, 59)?;
    validate_cron_field(parts[2], "hour", 0, 23)?;
    validate_cron_field(parts[3], "day", 1, 31)?;
    validate_cron_field(parts[4], "month", 1, 12)?;
    validate_cron_field(parts[5], "dayofweek", 0, 7)?;

    Ok(())
}

fn validate_cron_field(field: &str, name: &str, min: u32, max: u32) -> Result<(), ConfigError> {
    if field == "*" || field == "?" {
        return Ok(());
    }

    let parse = |value: &str| {
        value
            .parse::<u32>()
            .map_err(|_| invalid(format!("Invalid {} value: {}", name, value)))
    };
    let check = |value: u32| {
        if value < min || value > max {
            Err(invalid(format!(
                "{} value {} is outside valid range {}-{}",
                name, value, min, max
            )))
        } else {
            Ok(())
        }
    };

    if let Some(step_str) = field.strip_prefix("*/") {
        if parse(step_str)? == 0 {
            return Err(invalid(format!("{} step value cannot be 0", name)));
        }
        return Ok(());
    }

    if field.contains(',') {
        for part in field.split(',') {
            check(parse(part)?)?;
        }
        return Ok(());
    }

    if let Some((start, end)) = field.split_once('-') {
        check(parse(start)?)?;
        check(parse(end)?)?;
        return Ok(());
    }

    check(parse(field)?)
}
