// File: quartermaster-common/src/traits/repository_traits.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Error;
use crate::models::activity::{ActivityLogFilter, UserActivityLog};
use crate::models::asset::{Asset, AssetCategory, AssetCondition, AssetFilter};
use crate::models::complaint::{Complaint, ComplaintFilter};
use crate::models::history::AssetHistoryEntry;
use crate::models::maintenance::{MaintenanceFilter, MaintenanceSchedule};
use crate::models::report::ReportFilter;
use crate::models::user::User;

#[async_trait]
pub trait AssetRepository: Send + Sync {
    async fn create(&self, asset: &Asset) -> Result<(), Error>;
    async fn get(&self, asset_id: &str) -> Result<Option<Asset>, Error>;
    async fn update(&self, asset: &Asset) -> Result<(), Error>;
    async fn list(&self, filter: &AssetFilter) -> Result<Vec<Asset>, Error>;
    async fn list_for_report(&self, filter: &ReportFilter) -> Result<Vec<Asset>, Error>;

    /// Removes the asset row and every dependent complaint, ledger, and
    /// schedule row in one transaction. Returns whether an asset row was
    /// actually removed.
    async fn delete_cascade(&self, asset_id: &str) -> Result<bool, Error>;

    async fn count_all(&self) -> Result<i64, Error>;
    async fn count_archived(&self) -> Result<i64, Error>;
    /// Non-archived assets only.
    async fn counts_by_condition(&self) -> Result<Vec<(AssetCondition, i64)>, Error>;
    /// Non-archived assets only.
    async fn counts_by_category(&self) -> Result<Vec<(AssetCategory, i64)>, Error>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<(), Error>;
    async fn get(&self, user_id: &str) -> Result<Option<User>, Error>;
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, Error>;
    async fn update(&self, user: &User) -> Result<(), Error>;
    async fn list_all(&self) -> Result<Vec<User>, Error>;

    /// Idempotent insert keyed by id; the materialization primitive for the
    /// system actor.
    async fn ensure(&self, user: &User) -> Result<(), Error>;
}

#[async_trait]
pub trait ComplaintRepository: Send + Sync {
    async fn create(&self, complaint: &Complaint) -> Result<(), Error>;
    async fn get(&self, complaint_id: &str) -> Result<Option<Complaint>, Error>;
    async fn update(&self, complaint: &Complaint) -> Result<(), Error>;
    async fn list(&self, filter: &ComplaintFilter) -> Result<Vec<Complaint>, Error>;
    async fn list_for_asset(&self, asset_id: &str) -> Result<Vec<Complaint>, Error>;
    /// Complaints whose status is anything but resolved.
    async fn count_pending(&self) -> Result<i64, Error>;
}

#[async_trait]
pub trait MaintenanceRepository: Send + Sync {
    async fn create(&self, schedule: &MaintenanceSchedule) -> Result<(), Error>;
    async fn get(&self, schedule_id: &str) -> Result<Option<MaintenanceSchedule>, Error>;
    async fn update(&self, schedule: &MaintenanceSchedule) -> Result<(), Error>;
    async fn list(&self, filter: &MaintenanceFilter) -> Result<Vec<MaintenanceSchedule>, Error>;
    /// Non-completed schedules with `scheduled_date` in `[from, to]`.
    async fn count_upcoming(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<i64, Error>;
}

/// The audit ledger writer. Insert-only by contract; the only delete path is
/// the cascading hard-delete owned by `AssetRepository`.
#[async_trait]
pub trait AssetHistoryRepository: Send + Sync {
    async fn insert(&self, entry: &AssetHistoryEntry) -> Result<(), Error>;
    /// Newest first, ordered by `changed_at`.
    async fn list_for_asset(&self, asset_id: &str) -> Result<Vec<AssetHistoryEntry>, Error>;
}

/// The activity logger. Insert-only; no update path exists.
#[async_trait]
pub trait ActivityLogRepository: Send + Sync {
    async fn insert(&self, entry: &UserActivityLog) -> Result<(), Error>;
    /// Newest first.
    async fn list(&self, filter: &ActivityLogFilter) -> Result<Vec<UserActivityLog>, Error>;
    async fn count_since(&self, since: DateTime<Utc>) -> Result<i64, Error>;
}
