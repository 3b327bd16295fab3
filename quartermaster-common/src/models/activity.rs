// File: quartermaster-common/src/models/activity.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Generic user-action record: actor, verb, target, optional free text.
/// Append-only; there is no update path.
#[derive(Debug, Serialize, Deserialize, Clone, FromRow)]
pub struct UserActivityLog {
    pub log_id: String,
    pub user_id: String,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<String>,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserActivityLog {
    pub fn new(
        user_id: &str,
        action: &str,
        entity_type: &str,
        entity_id: Option<&str>,
        details: Option<&str>,
    ) -> Self {
        Self {
            log_id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            action: action.to_string(),
            entity_type: entity_type.to_string(),
            entity_id: entity_id.map(String::from),
            details: details.map(String::from),
            created_at: Utc::now(),
        }
    }
}

/// Date bounds apply to the log timestamp.
#[derive(Debug, Clone, Default)]
pub struct ActivityLogFilter {
    pub user_id: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub action: Option<String>,
}
