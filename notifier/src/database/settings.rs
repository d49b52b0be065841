//! Global settings database operations.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;

use super::Database;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalSettingRecord {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

impl Database {
    pub async fn get_setting(&self, key: &str) -> Result<Option<GlobalSettingRecord>> {
        let row = sqlx::query(
            r#"
            SELECT key, value, updated_at
            FROM global_settings
            WHERE key = ?
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            Ok(Some(GlobalSettingRecord {
                key: row.try_get("key")?,
                value: row.try_get("value")?,
                updated_at: row.try_get("updated_at")?,
            }))
        } else {
            Ok(None)
        }
    }

    pub async fn get_all_settings(&self) -> Result<Vec<GlobalSettingRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT key, value, updated_at
            FROM global_settings
            ORDER BY key
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut settings = Vec::new();
        for row in rows {
            settings.push(GlobalSettingRecord {
                key: row.try_get("key")?,
                value: row.try_get("value")?,
                updated_at: row.try_get("updated_at")?,
            });
        }
        Ok(settings)
    }

    pub async fn upsert_setting(&self, setting: &GlobalSettingRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO global_settings (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&setting.key)
        .bind(&setting.value)
        .bind(setting.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
