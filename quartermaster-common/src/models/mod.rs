// File: quartermaster-common/src/models/mod.rs

pub mod activity;
pub mod asset;
pub mod complaint;
pub mod history;
pub mod maintenance;
pub mod report;
pub mod user;

pub use activity::{ActivityLogFilter, UserActivityLog};
pub use asset::{
    Asset, AssetCategory, AssetCondition, AssetFilter, AssetUpdate, AssetWithRelations, NewAsset,
    SCAN_CODE_PREFIX,
};
pub use complaint::{Complaint, ComplaintFilter, ComplaintStatus, ComplaintUpdate, NewComplaint};
pub use history::{AssetHistoryEntry, COMPLAINT_STATUS_FIELD};
pub use maintenance::{MaintenanceFilter, MaintenanceSchedule, MaintenanceUpdate, NewMaintenance};
pub use report::{
    DashboardStats, NotificationType, RecommendationPrompt, ReportFile, ReportFilter, ReportFormat,
    ReportRequest, ReportRow,
};
pub use user::{
    LoginSession, NewUser, User, UserProfile, UserRole, UserUpdate, SYSTEM_ACTOR_ID,
};
