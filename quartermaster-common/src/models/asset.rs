// File: quartermaster-common/src/models/asset.rs

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::complaint::Complaint;
use crate::models::history::AssetHistoryEntry;
use crate::models::maintenance::MaintenanceSchedule;

/// Scan codes are derived from the asset id at creation and never change.
pub const SCAN_CODE_PREFIX: &str = "QM-";

#[derive(Debug, Serialize, Deserialize, Clone, FromRow)]
pub struct Asset {
    pub asset_id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: AssetCategory,
    pub condition: AssetCondition,
    pub owner: Option<String>,
    pub photo_url: Option<String>,
    pub scan_code: String,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Stored as TEXT; the closed set of category tags.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
pub enum AssetCategory {
    Monitor,
    Laptop,
    Desktop,
    Printer,
    Scanner,
    Router,
    Phone,
    Projector,
    Furniture,
    Peripheral,
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetCategory::Monitor => write!(f, "monitor"),
            AssetCategory::Laptop => write!(f, "laptop"),
            AssetCategory::Desktop => write!(f, "desktop"),
            AssetCategory::Printer => write!(f, "printer"),
            AssetCategory::Scanner => write!(f, "scanner"),
            AssetCategory::Router => write!(f, "router"),
            AssetCategory::Phone => write!(f, "phone"),
            AssetCategory::Projector => write!(f, "projector"),
            AssetCategory::Furniture => write!(f, "furniture"),
            AssetCategory::Peripheral => write!(f, "peripheral"),
        }
    }
}

impl FromStr for AssetCategory {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monitor" => Ok(AssetCategory::Monitor),
            "laptop" => Ok(AssetCategory::Laptop),
            "desktop" => Ok(AssetCategory::Desktop),
            "printer" => Ok(AssetCategory::Printer),
            "scanner" => Ok(AssetCategory::Scanner),
            "router" => Ok(AssetCategory::Router),
            "phone" => Ok(AssetCategory::Phone),
            "projector" => Ok(AssetCategory::Projector),
            "furniture" => Ok(AssetCategory::Furniture),
            "peripheral" => Ok(AssetCategory::Peripheral),
            _ => Err(format!("Unknown asset category: {}", s)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
pub enum AssetCondition {
    New,
    Good,
    UnderRepair,
    Damaged,
}

impl fmt::Display for AssetCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetCondition::New => write!(f, "new"),
            AssetCondition::Good => write!(f, "good"),
            AssetCondition::UnderRepair => write!(f, "under_repair"),
            AssetCondition::Damaged => write!(f, "damaged"),
        }
    }
}

impl FromStr for AssetCondition {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new" => Ok(AssetCondition::New),
            "good" => Ok(AssetCondition::Good),
            "under_repair" => Ok(AssetCondition::UnderRepair),
            "damaged" => Ok(AssetCondition::Damaged),
            _ => Err(format!("Unknown asset condition: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAsset {
    pub name: String,
    pub description: Option<String>,
    pub category: AssetCategory,
    pub condition: AssetCondition,
    pub owner: Option<String>,
    pub photo_url: Option<String>,
}

/// Partial update. The outer `Option` marks a field as present in the
/// request; the inner one (on nullable columns) is the stored value, so
/// transitions to and from null are expressible.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetUpdate {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub category: Option<AssetCategory>,
    pub condition: Option<AssetCondition>,
    pub owner: Option<Option<String>>,
    pub photo_url: Option<Option<String>>,
}

/// All provided filters are ANDed. `owner` uses the listing sentinel:
/// `None` = no filter, `""` or `"null"` = rows with a store-null owner,
/// anything else = exact match.
#[derive(Debug, Clone, Default)]
pub struct AssetFilter {
    pub search: Option<String>,
    pub category: Option<AssetCategory>,
    pub condition: Option<AssetCondition>,
    pub owner: Option<String>,
    pub is_archived: Option<bool>,
}

#[derive(Debug, Serialize, Clone)]
pub struct AssetWithRelations {
    pub asset: Asset,
    pub complaints: Vec<Complaint>,
    pub history: Vec<AssetHistoryEntry>,
    pub maintenance_schedules: Vec<MaintenanceSchedule>,
}
