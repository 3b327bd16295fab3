// File: quartermaster-core/tests/collaborator_tests.rs

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use quartermaster_common::error::Error;
use quartermaster_common::models::{
    AssetCategory, AssetCondition, ComplaintStatus, NewAsset, NewComplaint, NotificationType,
    RecommendationPrompt,
};
use quartermaster_common::traits::collaborator_traits::{MailTransport, RecommendationProvider};
use quartermaster_core::db::Database;
use quartermaster_core::repositories::{
    SqliteActivityLogRepository, SqliteAssetHistoryRepository, SqliteAssetRepository,
    SqliteComplaintRepository, SqliteMaintenanceRepository, SqliteUserRepository,
};
use quartermaster_core::services::{
    AssetService, ComplaintService, NotificationService, RecommendationService,
};
use quartermaster_core::test_utils::helpers::*;

#[derive(Default)]
struct RecordingMail {
    sent: Mutex<Vec<(Vec<String>, String, NotificationType)>>,
}

#[async_trait]
impl MailTransport for RecordingMail {
    async fn send(
        &self,
        recipients: &[String],
        subject: &str,
        _body: &str,
        kind: NotificationType,
    ) -> Result<(), Error> {
        self.sent
            .lock()
            .unwrap()
            .push((recipients.to_vec(), subject.to_string(), kind));
        Ok(())
    }
}

struct CannedProvider;

#[async_trait]
impl RecommendationProvider for CannedProvider {
    async fn recommend(&self, _prompt: &RecommendationPrompt) -> Result<Vec<String>, Error> {
        Ok(vec![
            "Swap the fan tray.".to_string(),
            "  ".to_string(),
            "Update the firmware.".to_string(),
            "Retire the spare.".to_string(),
        ])
    }
}

struct DownProvider;

#[async_trait]
impl RecommendationProvider for DownProvider {
    async fn recommend(&self, _prompt: &RecommendationPrompt) -> Result<Vec<String>, Error> {
        Err(Error::Collaborator("generation backend offline".to_string()))
    }
}

fn asset_service(db: &Database) -> AssetService {
    let pool = db.pool().clone();
    AssetService::new(
        Arc::new(SqliteAssetRepository::new(pool.clone())),
        Arc::new(SqliteUserRepository::new(pool.clone())),
        Arc::new(SqliteComplaintRepository::new(pool.clone())),
        Arc::new(SqliteMaintenanceRepository::new(pool.clone())),
        Arc::new(SqliteAssetHistoryRepository::new(pool.clone())),
        Arc::new(SqliteActivityLogRepository::new(pool)),
    )
}

fn complaint_service(db: &Database) -> ComplaintService {
    let pool = db.pool().clone();
    ComplaintService::new(
        Arc::new(SqliteComplaintRepository::new(pool.clone())),
        Arc::new(SqliteAssetRepository::new(pool.clone())),
        Arc::new(SqliteAssetHistoryRepository::new(pool)),
    )
}

fn recommendation_service(
    db: &Database,
    provider: Arc<dyn RecommendationProvider>,
) -> RecommendationService {
    let pool = db.pool().clone();
    RecommendationService::new(
        Arc::new(SqliteAssetRepository::new(pool.clone())),
        Arc::new(SqliteComplaintRepository::new(pool)),
        provider,
    )
}

fn new_asset(name: &str, condition: AssetCondition) -> NewAsset {
    NewAsset {
        name: name.to_string(),
        description: None,
        category: AssetCategory::Printer,
        condition,
        owner: None,
        photo_url: None,
    }
}

#[tokio::test]
async fn notification_validates_before_dispatch() -> Result<(), Error> {
    init_test_tracing();
    let mail = Arc::new(RecordingMail::default());
    let service = NotificationService::new(mail.clone());

    let recipients = vec!["ops@corp.example".to_string()];

    assert!(matches!(
        service
            .send_notification_email(&[], "s", "b", NotificationType::System)
            .await
            .unwrap_err(),
        Error::ValidationError(_)
    ));
    assert!(matches!(
        service
            .send_notification_email(&recipients, "  ", "b", NotificationType::System)
            .await
            .unwrap_err(),
        Error::ValidationError(_)
    ));
    assert!(matches!(
        service
            .send_notification_email(&recipients, "s", "", NotificationType::System)
            .await
            .unwrap_err(),
        Error::ValidationError(_)
    ));
    assert!(mail.sent.lock().unwrap().is_empty());

    service
        .send_notification_email(
            &recipients,
            "Maintenance window",
            "Scheduled for Friday.",
            NotificationType::MaintenanceReminder,
        )
        .await?;

    let sent = mail.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, recipients);
    assert_eq!(sent[0].2, NotificationType::MaintenanceReminder);
    Ok(())
}

#[tokio::test]
async fn recommendations_use_provider_lines_when_usable() -> Result<(), Error> {
    let db = setup_test_database().await?;
    let assets = asset_service(&db);
    let service = recommendation_service(&db, Arc::new(CannedProvider));

    let asset = assets
        .create_asset(&new_asset("Brother HL-L2350", AssetCondition::Good))
        .await?;

    let lines = service.recommendations_for_asset(&asset.asset_id).await?;
    // Blank lines are dropped before the first three are taken.
    assert_eq!(
        lines,
        [
            "Swap the fan tray.".to_string(),
            "Update the firmware.".to_string(),
            "Retire the spare.".to_string(),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn recommendations_fall_back_when_provider_is_down() -> Result<(), Error> {
    let db = setup_test_database().await?;
    let assets = asset_service(&db);
    let complaints = complaint_service(&db);
    let service = recommendation_service(&db, Arc::new(DownProvider));

    let asset = assets
        .create_asset(&new_asset("Canon MF455", AssetCondition::Damaged))
        .await?;
    complaints
        .create_complaint(&NewComplaint {
            asset_id: asset.asset_id.clone(),
            complainant: "Rae".to_string(),
            status: ComplaintStatus::Urgent,
            description: "paper jam".to_string(),
        })
        .await?;

    let lines = service.recommendations_for_asset(&asset.asset_id).await?;
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("damaged"));
    assert!(lines[1].contains("1 open complaint"));
    assert!(lines.iter().all(|l| !l.is_empty()));
    Ok(())
}

#[tokio::test]
async fn recommendations_for_missing_asset_are_not_found() -> Result<(), Error> {
    let db = setup_test_database().await?;
    let service = recommendation_service(&db, Arc::new(DownProvider));

    assert!(matches!(
        service.recommendations_for_asset("missing").await.unwrap_err(),
        Error::NotFound(_)
    ));
    Ok(())
}
