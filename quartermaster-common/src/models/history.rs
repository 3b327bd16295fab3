// File: quartermaster-common/src/models/history.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Synthetic field tag recorded when a complaint's status changes; every
/// other tag names an asset column.
pub const COMPLAINT_STATUS_FIELD: &str = "complaint_status";

/// One before/after record in the append-only asset ledger. Rows are only
/// ever inserted, or bulk-deleted when the owning asset is hard-deleted.
#[derive(Debug, Serialize, Deserialize, Clone, FromRow)]
pub struct AssetHistoryEntry {
    pub history_id: String,
    pub asset_id: String,
    pub field_name: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub changed_by: Option<String>,
    pub changed_at: DateTime<Utc>,
}

impl AssetHistoryEntry {
    pub fn new(
        asset_id: &str,
        field_name: &str,
        old_value: Option<&str>,
        new_value: Option<&str>,
        changed_by: Option<&str>,
    ) -> Self {
        Self {
            history_id: Uuid::new_v4().to_string(),
            asset_id: asset_id.to_string(),
            field_name: field_name.to_string(),
            old_value: old_value.map(String::from),
            new_value: new_value.map(String::from),
            changed_by: changed_by.map(String::from),
            changed_at: Utc::now(),
        }
    }
}
