// src/repositories/sqlite/asset_history.rs

use async_trait::async_trait;
use sqlx::{Pool, Sqlite};

use quartermaster_common::error::Error;
use quartermaster_common::models::AssetHistoryEntry;
use quartermaster_common::traits::repository_traits::AssetHistoryRepository;

/// Append-only ledger access. Rows with identical `changed_at` values have
/// no stable relative order; history is advisory, not transactional.
pub struct SqliteAssetHistoryRepository {
    pool: Pool<Sqlite>,
}

impl SqliteAssetHistoryRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssetHistoryRepository for SqliteAssetHistoryRepository {
    async fn insert(&self, entry: &AssetHistoryEntry) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO asset_history (
                history_id, asset_id, field_name,
                old_value, new_value, changed_by, changed_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entry.history_id)
        .bind(&entry.asset_id)
        .bind(&entry.field_name)
        .bind(&entry.old_value)
        .bind(&entry.new_value)
        .bind(&entry.changed_by)
        .bind(entry.changed_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_for_asset(&self, asset_id: &str) -> Result<Vec<AssetHistoryEntry>, Error> {
        let rows = sqlx::query_as::<_, AssetHistoryEntry>(
            r#"
            SELECT history_id, asset_id, field_name,
                   old_value, new_value, changed_by, changed_at
            FROM asset_history
            WHERE asset_id = ?
            ORDER BY changed_at DESC
            "#,
        )
        .bind(asset_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
