// File: quartermaster-common/src/models/complaint.rs

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, Clone, FromRow)]
pub struct Complaint {
    pub complaint_id: String,
    pub asset_id: String,
    pub complainant: String,
    pub status: ComplaintStatus,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
pub enum ComplaintStatus {
    NeedsRepair,
    Urgent,
    UnderRepair,
    Resolved,
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplaintStatus::NeedsRepair => write!(f, "needs_repair"),
            ComplaintStatus::Urgent => write!(f, "urgent"),
            ComplaintStatus::UnderRepair => write!(f, "under_repair"),
            ComplaintStatus::Resolved => write!(f, "resolved"),
        }
    }
}

impl FromStr for ComplaintStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "needs_repair" => Ok(ComplaintStatus::NeedsRepair),
            "urgent" => Ok(ComplaintStatus::Urgent),
            "under_repair" => Ok(ComplaintStatus::UnderRepair),
            "resolved" => Ok(ComplaintStatus::Resolved),
            _ => Err(format!("Unknown complaint status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewComplaint {
    pub asset_id: String,
    pub complainant: String,
    pub status: ComplaintStatus,
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComplaintUpdate {
    pub complainant: Option<String>,
    pub status: Option<ComplaintStatus>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ComplaintFilter {
    pub asset_id: Option<String>,
    pub status: Option<ComplaintStatus>,
}
