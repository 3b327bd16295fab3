// File: quartermaster-common/src/models/maintenance.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, Clone, FromRow)]
pub struct MaintenanceSchedule {
    pub schedule_id: String,
    pub asset_id: String,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_date: DateTime<Utc>,
    pub is_completed: bool,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewMaintenance {
    pub asset_id: String,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_date: DateTime<Utc>,
    pub created_by: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaintenanceUpdate {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub is_completed: Option<bool>,
}

/// Date bounds apply to `scheduled_date`.
#[derive(Debug, Clone, Default)]
pub struct MaintenanceFilter {
    pub asset_id: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub is_completed: Option<bool>,
}
