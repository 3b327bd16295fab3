// src/repositories/mod.rs

pub mod sqlite;

pub use sqlite::activity_log::SqliteActivityLogRepository;
pub use sqlite::asset::SqliteAssetRepository;
pub use sqlite::asset_history::SqliteAssetHistoryRepository;
pub use sqlite::complaint::SqliteComplaintRepository;
pub use sqlite::maintenance::SqliteMaintenanceRepository;
pub use sqlite::user::SqliteUserRepository;
