//! Parameter store: string settings by key, plus the typed date helpers the
//! orchestrator and the CLI share.

use crate::constants::settings::{DATE_FORMAT, LAST_NOTIFIED_KEY, SECRET_EXPIRATION_KEY};
use crate::database::{Database, GlobalSettingRecord};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tracing::debug;

/// Key/value access to persistent parameters. Missing keys yield `default`.
#[async_trait]
pub trait ParameterStore: Send + Sync {
    async fn get_param(&self, key: &str, default: &str) -> Result<String>;

    async fn set_param(&self, key: &str, value: &str) -> Result<()>;
}

#[async_trait]
impl ParameterStore for Database {
    async fn get_param(&self, key: &str, default: &str) -> Result<String> {
        Ok(self
            .get_setting(key)
            .await?
            .map(|record| record.value)
            .unwrap_or_else(|| default.to_string()))
    }

    async fn set_param(&self, key: &str, value: &str) -> Result<()> {
        self.upsert_setting(&GlobalSettingRecord {
            key: key.to_string(),
            value: value.to_string(),
            updated_at: Utc::now(),
        })
        .await?;
        debug!("Stored parameter {} = '{}'", key, value);
        Ok(())
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a stored date; empty or malformed values are treated as absent.
///
/// Only the leading `YYYY-MM-DD` is read, so datetime values such as
/// `2026-11-20 00:00:00` still yield their day.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let day = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(day, DATE_FORMAT).ok()
}

pub async fn load_expiration(store: &dyn ParameterStore) -> Result<Option<NaiveDate>> {
    let value = store.get_param(SECRET_EXPIRATION_KEY, "").await?;
    let parsed = parse_date(&value);
    if parsed.is_none() && !value.trim().is_empty() {
        debug!("Ignoring unparsable expiration date '{}'", value);
    }
    Ok(parsed)
}

/// Writes the expiration date, or clears it with an empty string.
pub async fn store_expiration(store: &dyn ParameterStore, date: Option<NaiveDate>) -> Result<()> {
    let value = date.map(format_date).unwrap_or_default();
    store.set_param(SECRET_EXPIRATION_KEY, &value).await
}

pub async fn load_last_notified(store: &dyn ParameterStore) -> Result<String> {
    store.get_param(LAST_NOTIFIED_KEY, "").await
}

pub async fn store_last_notified(store: &dyn ParameterStore, day: NaiveDate) -> Result<()> {
    store.set_param(LAST_NOTIFIED_KEY, &format_date(day)).await
}
