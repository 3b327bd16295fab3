// src/repositories/sqlite/activity_log.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Row, Sqlite};

use quartermaster_common::error::Error;
use quartermaster_common::models::{ActivityLogFilter, UserActivityLog};
use quartermaster_common::traits::repository_traits::ActivityLogRepository;

pub struct SqliteActivityLogRepository {
    pool: Pool<Sqlite>,
}

impl SqliteActivityLogRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityLogRepository for SqliteActivityLogRepository {
    async fn insert(&self, entry: &UserActivityLog) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO user_activity_log (
                log_id, user_id, action, entity_type, entity_id, details, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entry.log_id)
        .bind(&entry.user_id)
        .bind(&entry.action)
        .bind(&entry.entity_type)
        .bind(&entry.entity_id)
        .bind(&entry.details)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list(&self, filter: &ActivityLogFilter) -> Result<Vec<UserActivityLog>, Error> {
        let rows = sqlx::query_as::<_, UserActivityLog>(
            r#"
            SELECT log_id, user_id, action, entity_type, entity_id, details, created_at
            FROM user_activity_log
            WHERE (?1 IS NULL OR user_id = ?1)
              AND (?2 IS NULL OR created_at >= ?2)
              AND (?3 IS NULL OR created_at <= ?3)
              AND (?4 IS NULL OR action = ?4)
            ORDER BY created_at DESC
            "#,
        )
        .bind(&filter.user_id)
        .bind(filter.start_date)
        .bind(filter.end_date)
        .bind(&filter.action)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn count_since(&self, since: DateTime<Utc>) -> Result<i64, Error> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM user_activity_log WHERE created_at >= ?")
            .bind(since)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("n")?)
    }
}
