// src/repositories/sqlite/asset.rs

use async_trait::async_trait;
use sqlx::{Pool, Row, Sqlite};

use quartermaster_common::error::Error;
use quartermaster_common::models::{Asset, AssetCategory, AssetCondition, AssetFilter, ReportFilter};
use quartermaster_common::traits::repository_traits::AssetRepository;

use super::map_unique_violation;

pub struct SqliteAssetRepository {
    pool: Pool<Sqlite>,
}

impl SqliteAssetRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssetRepository for SqliteAssetRepository {
    async fn create(&self, asset: &Asset) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO assets (
                asset_id, name, description, category, condition,
                owner, photo_url, scan_code, is_archived, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&asset.asset_id)
        .bind(&asset.name)
        .bind(&asset.description)
        .bind(asset.category)
        .bind(asset.condition)
        .bind(&asset.owner)
        .bind(&asset.photo_url)
        .bind(&asset.scan_code)
        .bind(asset.is_archived)
        .bind(asset.created_at)
        .bind(asset.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &format!("scan code {}", asset.scan_code)))?;
        Ok(())
    }

    async fn get(&self, asset_id: &str) -> Result<Option<Asset>, Error> {
        let row = sqlx::query(
            r#"
            SELECT asset_id, name, description, category, condition,
                   owner, photo_url, scan_code, is_archived, created_at, updated_at
            FROM assets
            WHERE asset_id = ?
            "#,
        )
        .bind(asset_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(r) = row {
            Ok(Some(Asset {
                asset_id: r.try_get("asset_id")?,
                name: r.try_get("name")?,
                description: r.try_get("description")?,
                category: r.try_get("category")?,
                condition: r.try_get("condition")?,
                owner: r.try_get("owner")?,
                photo_url: r.try_get("photo_url")?,
                scan_code: r.try_get("scan_code")?,
                is_archived: r.try_get("is_archived")?,
                created_at: r.try_get("created_at")?,
                updated_at: r.try_get("updated_at")?,
            }))
        } else {
            Ok(None)
        }
    }

    async fn update(&self, asset: &Asset) -> Result<(), Error> {
        // scan_code and created_at are immutable after creation.
        sqlx::query(
            r#"
            UPDATE assets
            SET name = ?,
                description = ?,
                category = ?,
                condition = ?,
                owner = ?,
                photo_url = ?,
                is_archived = ?,
                updated_at = ?
            WHERE asset_id = ?
            "#,
        )
        .bind(&asset.name)
        .bind(&asset.description)
        .bind(asset.category)
        .bind(asset.condition)
        .bind(&asset.owner)
        .bind(&asset.photo_url)
        .bind(asset.is_archived)
        .bind(asset.updated_at)
        .bind(&asset.asset_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list(&self, filter: &AssetFilter) -> Result<Vec<Asset>, Error> {
        let search = filter
            .search
            .as_ref()
            .map(|s| format!("%{}%", s.to_lowercase()));
        // Listing sentinel: "" or "null" selects rows whose owner is
        // database-null; any other value is an exact match.
        let (owner_is_null, owner_eq) = match filter.owner.as_deref() {
            None => (None, None),
            Some("") | Some("null") => (Some(true), None),
            Some(owner) => (None, Some(owner.to_string())),
        };

        let rows = sqlx::query_as::<_, Asset>(
            r#"
            SELECT asset_id, name, description, category, condition,
                   owner, photo_url, scan_code, is_archived, created_at, updated_at
            FROM assets
            WHERE (?1 IS NULL OR LOWER(name) LIKE ?1 OR LOWER(COALESCE(description, '')) LIKE ?1)
              AND (?2 IS NULL OR category = ?2)
              AND (?3 IS NULL OR condition = ?3)
              AND (?4 IS NULL OR is_archived = ?4)
              AND (?5 IS NULL OR (owner IS NULL) = ?5)
              AND (?6 IS NULL OR owner = ?6)
            ORDER BY created_at DESC
            "#,
        )
        .bind(search)
        .bind(filter.category)
        .bind(filter.condition)
        .bind(filter.is_archived)
        .bind(owner_is_null)
        .bind(owner_eq)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn list_for_report(&self, filter: &ReportFilter) -> Result<Vec<Asset>, Error> {
        let rows = sqlx::query_as::<_, Asset>(
            r#"
            SELECT asset_id, name, description, category, condition,
                   owner, photo_url, scan_code, is_archived, created_at, updated_at
            FROM assets
            WHERE (?1 IS NULL OR created_at >= ?1)
              AND (?2 IS NULL OR created_at <= ?2)
              AND (?3 IS NULL OR condition = ?3)
              AND (?4 IS NULL OR category = ?4)
              AND (?5 IS NULL OR owner = ?5)
            ORDER BY created_at ASC
            "#,
        )
        .bind(filter.start_date)
        .bind(filter.end_date)
        .bind(filter.condition)
        .bind(filter.category)
        .bind(&filter.owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn delete_cascade(&self, asset_id: &str) -> Result<bool, Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM complaints WHERE asset_id = ?")
            .bind(asset_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM asset_history WHERE asset_id = ?")
            .bind(asset_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM maintenance_schedules WHERE asset_id = ?")
            .bind(asset_id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM assets WHERE asset_id = ?")
            .bind(asset_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_all(&self) -> Result<i64, Error> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM assets")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("n")?)
    }

    async fn count_archived(&self) -> Result<i64, Error> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM assets WHERE is_archived = 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("n")?)
    }

    async fn counts_by_condition(&self) -> Result<Vec<(AssetCondition, i64)>, Error> {
        let rows = sqlx::query(
            r#"
            SELECT condition, COUNT(*) AS n
            FROM assets
            WHERE is_archived = 0
            GROUP BY condition
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut counts = Vec::new();
        for r in rows {
            counts.push((r.try_get("condition")?, r.try_get("n")?));
        }
        Ok(counts)
    }

    async fn counts_by_category(&self) -> Result<Vec<(AssetCategory, i64)>, Error> {
        let rows = sqlx::query(
            r#"
            SELECT category, COUNT(*) AS n
            FROM assets
            WHERE is_archived = 0
            GROUP BY category
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut counts = Vec::new();
        for r in rows {
            counts.push((r.try_get("category")?, r.try_get("n")?));
        }
        Ok(counts)
    }
}
