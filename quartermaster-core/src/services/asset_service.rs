// src/services/asset_service.rs

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use quartermaster_common::error::Error;
use quartermaster_common::models::{
    Asset, AssetFilter, AssetHistoryEntry, AssetUpdate, AssetWithRelations, MaintenanceFilter,
    NewAsset, User, UserActivityLog, SCAN_CODE_PREFIX, SYSTEM_ACTOR_ID,
};
use quartermaster_common::traits::repository_traits::{
    ActivityLogRepository, AssetHistoryRepository, AssetRepository, ComplaintRepository,
    MaintenanceRepository, UserRepository,
};

/// One staged field-level diff; becomes a ledger row after the update lands.
struct FieldChange {
    field: &'static str,
    old: Option<String>,
    new: Option<String>,
}

pub struct AssetService {
    assets: Arc<dyn AssetRepository>,
    users: Arc<dyn UserRepository>,
    complaints: Arc<dyn ComplaintRepository>,
    maintenance: Arc<dyn MaintenanceRepository>,
    history: Arc<dyn AssetHistoryRepository>,
    activity: Arc<dyn ActivityLogRepository>,
}

impl AssetService {
    pub fn new(
        assets: Arc<dyn AssetRepository>,
        users: Arc<dyn UserRepository>,
        complaints: Arc<dyn ComplaintRepository>,
        maintenance: Arc<dyn MaintenanceRepository>,
        history: Arc<dyn AssetHistoryRepository>,
        activity: Arc<dyn ActivityLogRepository>,
    ) -> Self {
        Self {
            assets,
            users,
            complaints,
            maintenance,
            history,
            activity,
        }
    }

    pub async fn create_asset(&self, input: &NewAsset) -> Result<Asset, Error> {
        if input.name.trim().is_empty() {
            return Err(Error::ValidationError(
                "asset name must not be empty".to_string(),
            ));
        }

        let now = Utc::now();
        let asset_id = Uuid::new_v4().to_string();
        let scan_code = format!("{SCAN_CODE_PREFIX}{asset_id}");
        let asset = Asset {
            asset_id,
            name: input.name.clone(),
            description: input.description.clone(),
            category: input.category,
            condition: input.condition,
            owner: input.owner.clone(),
            photo_url: input.photo_url.clone(),
            scan_code,
            is_archived: false,
            created_at: now,
            updated_at: now,
        };
        self.assets.create(&asset).await?;

        // Logging is best-effort; its failure never rolls back the insert.
        if let Err(e) = self.record_creation(&asset).await {
            warn!(
                "activity log write failed for asset {}: {}",
                asset.asset_id, e
            );
        }

        info!("created asset {} ({})", asset.asset_id, asset.name);
        Ok(asset)
    }

    async fn record_creation(&self, asset: &Asset) -> Result<(), Error> {
        let Some(owner) = asset.owner.as_deref().filter(|o| !o.is_empty()) else {
            return Ok(());
        };
        let Some(user) = self.users.get(owner).await? else {
            return Ok(());
        };
        if !user.is_active {
            return Ok(());
        }
        let entry = UserActivityLog::new(
            &user.user_id,
            "CREATE_ASSET",
            "asset",
            Some(&asset.asset_id),
            Some(&format!("created '{}'", asset.name)),
        );
        self.activity.insert(&entry).await
    }

    pub async fn update_asset(&self, asset_id: &str, update: &AssetUpdate) -> Result<Asset, Error> {
        let current = self
            .assets
            .get(asset_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("asset {asset_id}")))?;

        let mut updated = current.clone();
        let mut changes: Vec<FieldChange> = Vec::new();

        if let Some(name) = &update.name {
            if *name != current.name {
                changes.push(FieldChange {
                    field: "name",
                    old: Some(current.name.clone()),
                    new: Some(name.clone()),
                });
                updated.name = name.clone();
            }
        }
        if let Some(description) = &update.description {
            if *description != current.description {
                changes.push(FieldChange {
                    field: "description",
                    old: current.description.clone(),
                    new: description.clone(),
                });
                updated.description = description.clone();
            }
        }
        if let Some(category) = update.category {
            if category != current.category {
                changes.push(FieldChange {
                    field: "category",
                    old: Some(current.category.to_string()),
                    new: Some(category.to_string()),
                });
                updated.category = category;
            }
        }
        if let Some(condition) = update.condition {
            if condition != current.condition {
                changes.push(FieldChange {
                    field: "condition",
                    old: Some(current.condition.to_string()),
                    new: Some(condition.to_string()),
                });
                updated.condition = condition;
            }
        }
        if let Some(owner) = &update.owner {
            if *owner != current.owner {
                changes.push(FieldChange {
                    field: "owner",
                    old: current.owner.clone(),
                    new: owner.clone(),
                });
                updated.owner = owner.clone();
            }
        }
        if let Some(photo_url) = &update.photo_url {
            if *photo_url != current.photo_url {
                changes.push(FieldChange {
                    field: "photo_url",
                    old: current.photo_url.clone(),
                    new: photo_url.clone(),
                });
                updated.photo_url = photo_url.clone();
            }
        }

        if changes.is_empty() {
            debug!("update of asset {} carried no effective change", asset_id);
            return Ok(current);
        }

        updated.updated_at = Utc::now();
        self.assets.update(&updated).await?;

        // Ledger rows follow the row update; no actor context exists at this
        // layer, so changed_by stays unset.
        for change in &changes {
            let entry = AssetHistoryEntry::new(
                asset_id,
                change.field,
                change.old.as_deref(),
                change.new.as_deref(),
                None,
            );
            self.history.insert(&entry).await?;
        }

        info!("updated asset {} ({} fields)", asset_id, changes.len());
        Ok(updated)
    }

    pub async fn archive_asset(&self, asset_id: &str) -> Result<Asset, Error> {
        let mut asset = self
            .assets
            .get(asset_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("asset {asset_id}")))?;

        // Re-archiving an already-archived asset is allowed; only restore
        // guards its precondition.
        asset.is_archived = true;
        asset.updated_at = Utc::now();
        self.assets.update(&asset).await?;
        info!("archived asset {}", asset_id);
        Ok(asset)
    }

    pub async fn restore_asset(&self, asset_id: &str) -> Result<Asset, Error> {
        let mut asset = self
            .assets
            .get(asset_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("asset {asset_id}")))?;

        if !asset.is_archived {
            return Err(Error::InvalidState(format!(
                "asset {asset_id} is not archived"
            )));
        }

        asset.is_archived = false;
        asset.updated_at = Utc::now();
        self.assets.update(&asset).await?;

        self.users.ensure(&User::system_actor()).await?;
        let entry = UserActivityLog::new(
            SYSTEM_ACTOR_ID,
            "RESTORE_ASSET",
            "asset",
            Some(asset_id),
            Some(&format!("restored '{}'", asset.name)),
        );
        self.activity.insert(&entry).await?;

        info!("restored asset {}", asset_id);
        Ok(asset)
    }

    /// Returns `false` (not an error) when the asset does not exist, for
    /// both the soft and the permanent path.
    pub async fn delete_asset(&self, asset_id: &str, permanent: bool) -> Result<bool, Error> {
        if self.assets.get(asset_id).await?.is_none() {
            return Ok(false);
        }

        if permanent {
            let removed = self.assets.delete_cascade(asset_id).await?;
            info!("hard-deleted asset {}", asset_id);
            Ok(removed)
        } else {
            self.archive_asset(asset_id).await?;
            Ok(true)
        }
    }

    pub async fn get_asset(&self, asset_id: &str) -> Result<Option<AssetWithRelations>, Error> {
        let Some(asset) = self.assets.get(asset_id).await? else {
            return Ok(None);
        };
        let complaints = self.complaints.list_for_asset(asset_id).await?;
        let history = self.history.list_for_asset(asset_id).await?;
        let maintenance_schedules = self
            .maintenance
            .list(&MaintenanceFilter {
                asset_id: Some(asset_id.to_string()),
                ..Default::default()
            })
            .await?;

        Ok(Some(AssetWithRelations {
            asset,
            complaints,
            history,
            maintenance_schedules,
        }))
    }

    pub async fn list_assets(&self, filter: &AssetFilter) -> Result<Vec<Asset>, Error> {
        self.assets.list(filter).await
    }

    pub async fn asset_history(&self, asset_id: &str) -> Result<Vec<AssetHistoryEntry>, Error> {
        self.history.list_for_asset(asset_id).await
    }
}
