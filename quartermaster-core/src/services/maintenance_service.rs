// src/services/maintenance_service.rs

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use quartermaster_common::error::Error;
use quartermaster_common::models::{
    MaintenanceFilter, MaintenanceSchedule, MaintenanceUpdate, NewMaintenance,
};
use quartermaster_common::traits::repository_traits::{
    AssetRepository, MaintenanceRepository, UserRepository,
};

pub struct MaintenanceService {
    maintenance: Arc<dyn MaintenanceRepository>,
    assets: Arc<dyn AssetRepository>,
    users: Arc<dyn UserRepository>,
}

impl MaintenanceService {
    pub fn new(
        maintenance: Arc<dyn MaintenanceRepository>,
        assets: Arc<dyn AssetRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            maintenance,
            assets,
            users,
        }
    }

    pub async fn create_schedule(
        &self,
        input: &NewMaintenance,
    ) -> Result<MaintenanceSchedule, Error> {
        if input.title.trim().is_empty() {
            return Err(Error::ValidationError(
                "maintenance title must not be empty".to_string(),
            ));
        }
        self.assets
            .get(&input.asset_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("asset {}", input.asset_id)))?;
        self.users
            .get(&input.created_by)
            .await?
            .ok_or_else(|| Error::NotFound(format!("user {}", input.created_by)))?;

        let now = Utc::now();
        let schedule = MaintenanceSchedule {
            schedule_id: Uuid::new_v4().to_string(),
            asset_id: input.asset_id.clone(),
            title: input.title.clone(),
            description: input.description.clone(),
            scheduled_date: input.scheduled_date,
            is_completed: false,
            created_by: input.created_by.clone(),
            created_at: now,
            updated_at: now,
        };
        self.maintenance.create(&schedule).await?;
        info!(
            "scheduled maintenance {} for asset {}",
            schedule.schedule_id, schedule.asset_id
        );
        Ok(schedule)
    }

    pub async fn list_schedules(
        &self,
        filter: &MaintenanceFilter,
    ) -> Result<Vec<MaintenanceSchedule>, Error> {
        self.maintenance.list(filter).await
    }

    pub async fn update_schedule(
        &self,
        schedule_id: &str,
        update: &MaintenanceUpdate,
    ) -> Result<MaintenanceSchedule, Error> {
        let mut schedule = self
            .maintenance
            .get(schedule_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("maintenance schedule {schedule_id}")))?;

        if let Some(title) = &update.title {
            schedule.title = title.clone();
        }
        if let Some(description) = &update.description {
            schedule.description = description.clone();
        }
        if let Some(scheduled_date) = update.scheduled_date {
            schedule.scheduled_date = scheduled_date;
        }
        if let Some(is_completed) = update.is_completed {
            schedule.is_completed = is_completed;
        }

        schedule.updated_at = Utc::now();
        self.maintenance.update(&schedule).await?;
        Ok(schedule)
    }
}
