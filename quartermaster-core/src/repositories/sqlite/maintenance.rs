// src/repositories/sqlite/maintenance.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Row, Sqlite};

use quartermaster_common::error::Error;
use quartermaster_common::models::{MaintenanceFilter, MaintenanceSchedule};
use quartermaster_common::traits::repository_traits::MaintenanceRepository;

pub struct SqliteMaintenanceRepository {
    pool: Pool<Sqlite>,
}

impl SqliteMaintenanceRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MaintenanceRepository for SqliteMaintenanceRepository {
    async fn create(&self, schedule: &MaintenanceSchedule) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO maintenance_schedules (
                schedule_id, asset_id, title, description, scheduled_date,
                is_completed, created_by, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&schedule.schedule_id)
        .bind(&schedule.asset_id)
        .bind(&schedule.title)
        .bind(&schedule.description)
        .bind(schedule.scheduled_date)
        .bind(schedule.is_completed)
        .bind(&schedule.created_by)
        .bind(schedule.created_at)
        .bind(schedule.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, schedule_id: &str) -> Result<Option<MaintenanceSchedule>, Error> {
        let row = sqlx::query(
            r#"
            SELECT schedule_id, asset_id, title, description, scheduled_date,
                   is_completed, created_by, created_at, updated_at
            FROM maintenance_schedules
            WHERE schedule_id = ?
            "#,
        )
        .bind(schedule_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(r) = row {
            Ok(Some(MaintenanceSchedule {
                schedule_id: r.try_get("schedule_id")?,
                asset_id: r.try_get("asset_id")?,
                title: r.try_get("title")?,
                description: r.try_get("description")?,
                scheduled_date: r.try_get("scheduled_date")?,
                is_completed: r.try_get("is_completed")?,
                created_by: r.try_get("created_by")?,
                created_at: r.try_get("created_at")?,
                updated_at: r.try_get("updated_at")?,
            }))
        } else {
            Ok(None)
        }
    }

    async fn update(&self, schedule: &MaintenanceSchedule) -> Result<(), Error> {
        sqlx::query(
            r#"
            UPDATE maintenance_schedules
            SET title = ?,
                description = ?,
                scheduled_date = ?,
                is_completed = ?,
                updated_at = ?
            WHERE schedule_id = ?
            "#,
        )
        .bind(&schedule.title)
        .bind(&schedule.description)
        .bind(schedule.scheduled_date)
        .bind(schedule.is_completed)
        .bind(schedule.updated_at)
        .bind(&schedule.schedule_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list(&self, filter: &MaintenanceFilter) -> Result<Vec<MaintenanceSchedule>, Error> {
        let rows = sqlx::query_as::<_, MaintenanceSchedule>(
            r#"
            SELECT schedule_id, asset_id, title, description, scheduled_date,
                   is_completed, created_by, created_at, updated_at
            FROM maintenance_schedules
            WHERE (?1 IS NULL OR asset_id = ?1)
              AND (?2 IS NULL OR scheduled_date >= ?2)
              AND (?3 IS NULL OR scheduled_date <= ?3)
              AND (?4 IS NULL OR is_completed = ?4)
            ORDER BY scheduled_date ASC
            "#,
        )
        .bind(&filter.asset_id)
        .bind(filter.start_date)
        .bind(filter.end_date)
        .bind(filter.is_completed)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn count_upcoming(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<i64, Error> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS n
            FROM maintenance_schedules
            WHERE is_completed = 0
              AND scheduled_date >= ?
              AND scheduled_date <= ?
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.try_get("n")?)
    }
}
