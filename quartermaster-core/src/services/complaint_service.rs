// src/services/complaint_service.rs

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use quartermaster_common::error::Error;
use quartermaster_common::models::{
    AssetCondition, AssetHistoryEntry, Complaint, ComplaintFilter, ComplaintStatus,
    ComplaintUpdate, NewComplaint, COMPLAINT_STATUS_FIELD,
};
use quartermaster_common::traits::repository_traits::{
    AssetHistoryRepository, AssetRepository, ComplaintRepository,
};

pub struct ComplaintService {
    complaints: Arc<dyn ComplaintRepository>,
    assets: Arc<dyn AssetRepository>,
    history: Arc<dyn AssetHistoryRepository>,
}

impl ComplaintService {
    pub fn new(
        complaints: Arc<dyn ComplaintRepository>,
        assets: Arc<dyn AssetRepository>,
        history: Arc<dyn AssetHistoryRepository>,
    ) -> Self {
        Self {
            complaints,
            assets,
            history,
        }
    }

    pub async fn create_complaint(&self, input: &NewComplaint) -> Result<Complaint, Error> {
        if input.complainant.trim().is_empty() {
            return Err(Error::ValidationError(
                "complainant must not be empty".to_string(),
            ));
        }
        if input.description.trim().is_empty() {
            return Err(Error::ValidationError(
                "complaint description must not be empty".to_string(),
            ));
        }
        self.assets
            .get(&input.asset_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("asset {}", input.asset_id)))?;

        let now = Utc::now();
        let complaint = Complaint {
            complaint_id: Uuid::new_v4().to_string(),
            asset_id: input.asset_id.clone(),
            complainant: input.complainant.clone(),
            // The given status is stored as-is; no default coercion.
            status: input.status,
            description: input.description.clone(),
            created_at: now,
            updated_at: now,
        };
        self.complaints.create(&complaint).await?;
        info!(
            "created complaint {} for asset {}",
            complaint.complaint_id, complaint.asset_id
        );
        Ok(complaint)
    }

    pub async fn update_complaint(
        &self,
        complaint_id: &str,
        update: &ComplaintUpdate,
    ) -> Result<Complaint, Error> {
        let current = self
            .complaints
            .get(complaint_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("complaint {complaint_id}")))?;

        let mut updated = current.clone();
        let mut dirty = false;
        let mut status_change: Option<(ComplaintStatus, ComplaintStatus)> = None;

        if let Some(complainant) = &update.complainant {
            if *complainant != current.complainant {
                updated.complainant = complainant.clone();
                dirty = true;
            }
        }
        if let Some(description) = &update.description {
            if *description != current.description {
                updated.description = description.clone();
                dirty = true;
            }
        }
        if let Some(status) = update.status {
            if status != current.status {
                status_change = Some((current.status, status));
                updated.status = status;
                dirty = true;
            }
        }

        if !dirty {
            debug!(
                "update of complaint {} carried no effective change",
                complaint_id
            );
            return Ok(current);
        }

        updated.updated_at = Utc::now();
        self.complaints.update(&updated).await?;

        if let Some((old_status, new_status)) = status_change {
            let entry = AssetHistoryEntry::new(
                &updated.asset_id,
                COMPLAINT_STATUS_FIELD,
                Some(&old_status.to_string()),
                Some(&new_status.to_string()),
                None,
            );
            self.history.insert(&entry).await?;

            if new_status == ComplaintStatus::Resolved {
                // Second saga step. The complaint row above is already
                // durable; a failure past this point propagates without
                // rolling it back.
                self.heal_asset_if_clear(&updated).await?;
            }
        }

        Ok(updated)
    }

    async fn heal_asset_if_clear(&self, resolved: &Complaint) -> Result<(), Error> {
        let siblings = self.complaints.list_for_asset(&resolved.asset_id).await?;
        let open_sibling = siblings
            .iter()
            .filter(|c| c.complaint_id != resolved.complaint_id)
            .any(|c| c.status != ComplaintStatus::Resolved);
        if open_sibling {
            return Ok(());
        }

        let Some(mut asset) = self.assets.get(&resolved.asset_id).await? else {
            return Ok(());
        };
        if asset.condition != AssetCondition::UnderRepair {
            return Ok(());
        }

        let old_condition = asset.condition;
        asset.condition = AssetCondition::Good;
        asset.updated_at = Utc::now();
        self.assets.update(&asset).await?;

        let entry = AssetHistoryEntry::new(
            &asset.asset_id,
            "condition",
            Some(&old_condition.to_string()),
            Some(&AssetCondition::Good.to_string()),
            None,
        );
        self.history.insert(&entry).await?;

        info!(
            "auto-healed asset {} to good after its last open complaint resolved",
            asset.asset_id
        );
        Ok(())
    }

    pub async fn list_complaints(&self, filter: &ComplaintFilter) -> Result<Vec<Complaint>, Error> {
        self.complaints.list(filter).await
    }

    pub async fn get_complaint(&self, complaint_id: &str) -> Result<Option<Complaint>, Error> {
        self.complaints.get(complaint_id).await
    }
}
