// File: quartermaster-common/src/models/report.rs

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::asset::{AssetCategory, AssetCondition};

/// Six independently computed aggregates; there is no cross-aggregate
/// consistency guarantee when rows change between the sub-queries.
#[derive(Debug, Serialize, Clone, Default)]
pub struct DashboardStats {
    pub total_assets: i64,
    pub archived_assets: i64,
    pub assets_by_condition: HashMap<String, i64>,
    pub assets_by_category: HashMap<String, i64>,
    pub pending_complaints: i64,
    pub upcoming_maintenance: i64,
    pub recent_activity: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq)]
pub enum ReportFormat {
    Pdf,
    Xlsx,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Pdf => "pdf",
            ReportFormat::Xlsx => "xlsx",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for ReportFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(ReportFormat::Pdf),
            "xlsx" => Ok(ReportFormat::Xlsx),
            _ => Err(format!("Unknown report format: {}", s)),
        }
    }
}

/// Report selection. Date bounds apply to `created_at`; `owner` is exact
/// match only (no null sentinel on this path).
#[derive(Debug, Clone)]
pub struct ReportFilter {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub condition: Option<AssetCondition>,
    pub category: Option<AssetCategory>,
    pub owner: Option<String>,
    pub format: ReportFormat,
}

#[derive(Debug, Serialize, Clone)]
pub struct ReportRow {
    pub asset_id: String,
    pub name: String,
    pub category: AssetCategory,
    pub condition: AssetCondition,
    pub owner: Option<String>,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
}

/// Everything the rendering collaborator needs to produce the document.
#[derive(Debug, Serialize, Clone)]
pub struct ReportRequest {
    pub filename: String,
    pub format: ReportFormat,
    pub rows: Vec<ReportRow>,
}

/// Content descriptor returned to the caller; the bytes live behind `url`.
#[derive(Debug, Serialize, Clone)]
pub struct ReportFile {
    pub url: String,
    pub filename: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq)]
pub enum NotificationType {
    MaintenanceReminder,
    ComplaintAlert,
    AssetAssignment,
    System,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationType::MaintenanceReminder => write!(f, "maintenance_reminder"),
            NotificationType::ComplaintAlert => write!(f, "complaint_alert"),
            NotificationType::AssetAssignment => write!(f, "asset_assignment"),
            NotificationType::System => write!(f, "system"),
        }
    }
}

impl FromStr for NotificationType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "maintenance_reminder" => Ok(NotificationType::MaintenanceReminder),
            "complaint_alert" => Ok(NotificationType::ComplaintAlert),
            "asset_assignment" => Ok(NotificationType::AssetAssignment),
            "system" => Ok(NotificationType::System),
            _ => Err(format!("Unknown notification type: {}", s)),
        }
    }
}

/// Structured prompt handed to the recommendation collaborator; also feeds
/// the rule-based fallback.
#[derive(Debug, Serialize, Clone)]
pub struct RecommendationPrompt {
    pub asset_name: String,
    pub category: AssetCategory,
    pub condition: AssetCondition,
    pub age_days: i64,
    pub open_complaints: i64,
    pub total_complaints: i64,
}
