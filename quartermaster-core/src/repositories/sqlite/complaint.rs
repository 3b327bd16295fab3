// src/repositories/sqlite/complaint.rs

use async_trait::async_trait;
use sqlx::{Pool, Row, Sqlite};

use quartermaster_common::error::Error;
use quartermaster_common::models::{Complaint, ComplaintFilter, ComplaintStatus};
use quartermaster_common::traits::repository_traits::ComplaintRepository;

pub struct SqliteComplaintRepository {
    pool: Pool<Sqlite>,
}

impl SqliteComplaintRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ComplaintRepository for SqliteComplaintRepository {
    async fn create(&self, complaint: &Complaint) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO complaints (
                complaint_id, asset_id, complainant, status, description,
                created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&complaint.complaint_id)
        .bind(&complaint.asset_id)
        .bind(&complaint.complainant)
        .bind(complaint.status)
        .bind(&complaint.description)
        .bind(complaint.created_at)
        .bind(complaint.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, complaint_id: &str) -> Result<Option<Complaint>, Error> {
        let row = sqlx::query(
            r#"
            SELECT complaint_id, asset_id, complainant, status, description,
                   created_at, updated_at
            FROM complaints
            WHERE complaint_id = ?
            "#,
        )
        .bind(complaint_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(r) = row {
            Ok(Some(Complaint {
                complaint_id: r.try_get("complaint_id")?,
                asset_id: r.try_get("asset_id")?,
                complainant: r.try_get("complainant")?,
                status: r.try_get("status")?,
                description: r.try_get("description")?,
                created_at: r.try_get("created_at")?,
                updated_at: r.try_get("updated_at")?,
            }))
        } else {
            Ok(None)
        }
    }

    async fn update(&self, complaint: &Complaint) -> Result<(), Error> {
        sqlx::query(
            r#"
            UPDATE complaints
            SET complainant = ?,
                status = ?,
                description = ?,
                updated_at = ?
            WHERE complaint_id = ?
            "#,
        )
        .bind(&complaint.complainant)
        .bind(complaint.status)
        .bind(&complaint.description)
        .bind(complaint.updated_at)
        .bind(&complaint.complaint_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list(&self, filter: &ComplaintFilter) -> Result<Vec<Complaint>, Error> {
        let rows = sqlx::query_as::<_, Complaint>(
            r#"
            SELECT complaint_id, asset_id, complainant, status, description,
                   created_at, updated_at
            FROM complaints
            WHERE (?1 IS NULL OR asset_id = ?1)
              AND (?2 IS NULL OR status = ?2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(&filter.asset_id)
        .bind(filter.status)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn list_for_asset(&self, asset_id: &str) -> Result<Vec<Complaint>, Error> {
        let rows = sqlx::query_as::<_, Complaint>(
            r#"
            SELECT complaint_id, asset_id, complainant, status, description,
                   created_at, updated_at
            FROM complaints
            WHERE asset_id = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(asset_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn count_pending(&self) -> Result<i64, Error> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM complaints WHERE status <> ?")
            .bind(ComplaintStatus::Resolved)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("n")?)
    }
}
