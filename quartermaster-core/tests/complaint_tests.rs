// File: quartermaster-core/tests/complaint_tests.rs

use std::sync::Arc;

use quartermaster_common::models::{
    AssetCategory, AssetCondition, ComplaintFilter, ComplaintStatus, ComplaintUpdate, NewAsset,
    NewComplaint, COMPLAINT_STATUS_FIELD,
};
use quartermaster_core::db::Database;
use quartermaster_core::repositories::{
    SqliteActivityLogRepository, SqliteAssetHistoryRepository, SqliteAssetRepository,
    SqliteComplaintRepository, SqliteMaintenanceRepository, SqliteUserRepository,
};
use quartermaster_core::services::{AssetService, ComplaintService};
use quartermaster_core::test_utils::helpers::*;
use quartermaster_core::Error;

fn services(db: &Database) -> (AssetService, ComplaintService) {
    let pool = db.pool().clone();
    let assets = AssetService::new(
        Arc::new(SqliteAssetRepository::new(pool.clone())),
        Arc::new(SqliteUserRepository::new(pool.clone())),
        Arc::new(SqliteComplaintRepository::new(pool.clone())),
        Arc::new(SqliteMaintenanceRepository::new(pool.clone())),
        Arc::new(SqliteAssetHistoryRepository::new(pool.clone())),
        Arc::new(SqliteActivityLogRepository::new(pool.clone())),
    );
    let complaints = ComplaintService::new(
        Arc::new(SqliteComplaintRepository::new(pool.clone())),
        Arc::new(SqliteAssetRepository::new(pool.clone())),
        Arc::new(SqliteAssetHistoryRepository::new(pool)),
    );
    (assets, complaints)
}

fn new_asset(name: &str, condition: AssetCondition) -> NewAsset {
    NewAsset {
        name: name.to_string(),
        description: None,
        category: AssetCategory::Router,
        condition,
        owner: None,
        photo_url: None,
    }
}

fn new_complaint(asset_id: &str, status: ComplaintStatus) -> NewComplaint {
    NewComplaint {
        asset_id: asset_id.to_string(),
        complainant: "Sam".to_string(),
        status,
        description: "intermittent failure".to_string(),
    }
}

#[tokio::test]
async fn create_requires_existing_asset() -> Result<(), Error> {
    init_test_tracing();
    let db = setup_test_database().await?;
    let (_, complaints) = services(&db);

    let err = complaints
        .create_complaint(&new_complaint("missing", ComplaintStatus::Urgent))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    Ok(())
}

#[tokio::test]
async fn create_stores_given_status_without_coercion() -> Result<(), Error> {
    let db = setup_test_database().await?;
    let (assets, complaints) = services(&db);

    let asset = assets
        .create_asset(&new_asset("TP-Link ER605", AssetCondition::Good))
        .await?;
    let complaint = complaints
        .create_complaint(&new_complaint(&asset.asset_id, ComplaintStatus::UnderRepair))
        .await?;
    assert_eq!(complaint.status, ComplaintStatus::UnderRepair);
    Ok(())
}

#[tokio::test]
async fn resolving_last_open_complaint_heals_under_repair_asset() -> Result<(), Error> {
    let db = setup_test_database().await?;
    let (assets, complaints) = services(&db);

    let asset = assets
        .create_asset(&new_asset("Mikrotik hEX", AssetCondition::UnderRepair))
        .await?;
    let first = complaints
        .create_complaint(&new_complaint(&asset.asset_id, ComplaintStatus::NeedsRepair))
        .await?;
    let second = complaints
        .create_complaint(&new_complaint(&asset.asset_id, ComplaintStatus::Urgent))
        .await?;

    // One sibling still open: only the complaint_status row appears.
    complaints
        .update_complaint(
            &first.complaint_id,
            &ComplaintUpdate {
                status: Some(ComplaintStatus::Resolved),
                ..Default::default()
            },
        )
        .await?;

    let history = assets.asset_history(&asset.asset_id).await?;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].field_name, COMPLAINT_STATUS_FIELD);
    let still = assets.get_asset(&asset.asset_id).await?.expect("asset");
    assert_eq!(still.asset.condition, AssetCondition::UnderRepair);

    // Last open complaint resolves: complaint_status row plus the heal row.
    complaints
        .update_complaint(
            &second.complaint_id,
            &ComplaintUpdate {
                status: Some(ComplaintStatus::Resolved),
                ..Default::default()
            },
        )
        .await?;

    let history = assets.asset_history(&asset.asset_id).await?;
    assert_eq!(history.len(), 3);
    let condition_rows: Vec<_> = history
        .iter()
        .filter(|h| h.field_name == "condition")
        .collect();
    assert_eq!(condition_rows.len(), 1);
    assert_eq!(condition_rows[0].old_value.as_deref(), Some("under_repair"));
    assert_eq!(condition_rows[0].new_value.as_deref(), Some("good"));
    assert_eq!(condition_rows[0].changed_by, None);

    let healed = assets.get_asset(&asset.asset_id).await?.expect("asset");
    assert_eq!(healed.asset.condition, AssetCondition::Good);
    Ok(())
}

#[tokio::test]
async fn resolving_does_not_heal_when_condition_is_not_under_repair() -> Result<(), Error> {
    let db = setup_test_database().await?;
    let (assets, complaints) = services(&db);

    let asset = assets
        .create_asset(&new_asset("Ubiquiti Edge", AssetCondition::Damaged))
        .await?;
    let complaint = complaints
        .create_complaint(&new_complaint(&asset.asset_id, ComplaintStatus::NeedsRepair))
        .await?;

    complaints
        .update_complaint(
            &complaint.complaint_id,
            &ComplaintUpdate {
                status: Some(ComplaintStatus::Resolved),
                ..Default::default()
            },
        )
        .await?;

    let history = assets.asset_history(&asset.asset_id).await?;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].field_name, COMPLAINT_STATUS_FIELD);

    let unchanged = assets.get_asset(&asset.asset_id).await?.expect("asset");
    assert_eq!(unchanged.asset.condition, AssetCondition::Damaged);
    Ok(())
}

#[tokio::test]
async fn unchanged_status_writes_no_ledger_row() -> Result<(), Error> {
    let db = setup_test_database().await?;
    let (assets, complaints) = services(&db);

    let asset = assets
        .create_asset(&new_asset("Juniper SRX", AssetCondition::Good))
        .await?;
    let complaint = complaints
        .create_complaint(&new_complaint(&asset.asset_id, ComplaintStatus::Urgent))
        .await?;

    complaints
        .update_complaint(
            &complaint.complaint_id,
            &ComplaintUpdate {
                status: Some(ComplaintStatus::Urgent),
                ..Default::default()
            },
        )
        .await?;

    assert!(assets.asset_history(&asset.asset_id).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn update_missing_complaint_is_not_found() -> Result<(), Error> {
    let db = setup_test_database().await?;
    let (_, complaints) = services(&db);

    let err = complaints
        .update_complaint("missing", &ComplaintUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    Ok(())
}

#[tokio::test]
async fn list_filters_by_asset_and_status() -> Result<(), Error> {
    let db = setup_test_database().await?;
    let (assets, complaints) = services(&db);

    let first = assets
        .create_asset(&new_asset("Router A", AssetCondition::Good))
        .await?;
    let second = assets
        .create_asset(&new_asset("Router B", AssetCondition::Good))
        .await?;

    complaints
        .create_complaint(&new_complaint(&first.asset_id, ComplaintStatus::Urgent))
        .await?;
    complaints
        .create_complaint(&new_complaint(&first.asset_id, ComplaintStatus::Resolved))
        .await?;
    complaints
        .create_complaint(&new_complaint(&second.asset_id, ComplaintStatus::Urgent))
        .await?;

    let for_first = complaints
        .list_complaints(&ComplaintFilter {
            asset_id: Some(first.asset_id.clone()),
            status: None,
        })
        .await?;
    assert_eq!(for_first.len(), 2);

    let urgent = complaints
        .list_complaints(&ComplaintFilter {
            asset_id: None,
            status: Some(ComplaintStatus::Urgent),
        })
        .await?;
    assert_eq!(urgent.len(), 2);

    let urgent_on_first = complaints
        .list_complaints(&ComplaintFilter {
            asset_id: Some(first.asset_id.clone()),
            status: Some(ComplaintStatus::Urgent),
        })
        .await?;
    assert_eq!(urgent_on_first.len(), 1);
    Ok(())
}
