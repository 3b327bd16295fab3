// File: quartermaster-core/tests/repository_tests.rs

use chrono::{Duration, Utc};
use uuid::Uuid;

use quartermaster_common::error::Error;
use quartermaster_common::models::{
    ActivityLogFilter, Asset, AssetCategory, AssetCondition, AssetHistoryEntry,
    MaintenanceFilter, MaintenanceSchedule, User, UserActivityLog, UserRole,
};
use quartermaster_common::traits::repository_traits::{
    ActivityLogRepository, AssetHistoryRepository, AssetRepository, MaintenanceRepository,
    UserRepository,
};
use quartermaster_core::repositories::{
    SqliteActivityLogRepository, SqliteAssetHistoryRepository, SqliteAssetRepository,
    SqliteMaintenanceRepository, SqliteUserRepository,
};
use quartermaster_core::test_utils::helpers::*;

fn test_user(email: &str) -> User {
    let now = Utc::now();
    User {
        user_id: Uuid::new_v4().to_string(),
        email: email.to_string(),
        password_hash: "irrelevant".to_string(),
        role: UserRole::Employee,
        full_name: "Test User".to_string(),
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

fn test_asset(name: &str) -> Asset {
    let now = Utc::now();
    let asset_id = Uuid::new_v4().to_string();
    Asset {
        scan_code: format!("QM-{asset_id}"),
        asset_id,
        name: name.to_string(),
        description: None,
        category: AssetCategory::Monitor,
        condition: AssetCondition::New,
        owner: None,
        photo_url: None,
        is_archived: false,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn user_repository_crud_and_lookup() -> Result<(), Error> {
    init_test_tracing();
    let db = setup_test_database().await?;
    let repo = SqliteUserRepository::new(db.pool().clone());

    let user = test_user("crud@corp.example");
    repo.create(&user).await?;

    let by_id = repo.get(&user.user_id).await?.expect("by id");
    assert_eq!(by_id.email, user.email);
    let by_email = repo.get_by_email(&user.email).await?.expect("by email");
    assert_eq!(by_email.user_id, user.user_id);

    let mut updated = user.clone();
    updated.is_active = false;
    repo.update(&updated).await?;
    assert!(!repo.get(&user.user_id).await?.expect("user").is_active);

    assert_eq!(repo.list_all().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn user_repository_rejects_duplicate_email() -> Result<(), Error> {
    let db = setup_test_database().await?;
    let repo = SqliteUserRepository::new(db.pool().clone());

    repo.create(&test_user("same@corp.example")).await?;
    let err = repo.create(&test_user("same@corp.example")).await.unwrap_err();
    assert!(matches!(err, Error::UniquenessViolation(_)));
    Ok(())
}

#[tokio::test]
async fn ensure_is_idempotent() -> Result<(), Error> {
    let db = setup_test_database().await?;
    let repo = SqliteUserRepository::new(db.pool().clone());

    let actor = User::system_actor();
    repo.ensure(&actor).await?;
    repo.ensure(&actor).await?;

    let stored = repo.get(&actor.user_id).await?.expect("actor");
    assert_eq!(stored.email, actor.email);
    assert_eq!(repo.list_all().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn asset_repository_rejects_duplicate_scan_code() -> Result<(), Error> {
    let db = setup_test_database().await?;
    let repo = SqliteAssetRepository::new(db.pool().clone());

    let first = test_asset("one");
    repo.create(&first).await?;

    let mut clash = test_asset("two");
    clash.scan_code = first.scan_code.clone();
    let err = repo.create(&clash).await.unwrap_err();
    assert!(matches!(err, Error::UniquenessViolation(_)));
    Ok(())
}

#[tokio::test]
async fn history_lists_newest_first() -> Result<(), Error> {
    let db = setup_test_database().await?;
    let assets = SqliteAssetRepository::new(db.pool().clone());
    let history = SqliteAssetHistoryRepository::new(db.pool().clone());

    let asset = test_asset("ledgered");
    assets.create(&asset).await?;

    let base = Utc::now();
    for (offset, field) in [(2i64, "oldest"), (1, "middle"), (0, "newest")] {
        let mut entry =
            AssetHistoryEntry::new(&asset.asset_id, field, None, Some("value"), None);
        entry.changed_at = base - Duration::minutes(offset);
        history.insert(&entry).await?;
    }

    let rows = history.list_for_asset(&asset.asset_id).await?;
    let fields: Vec<&str> = rows.iter().map(|r| r.field_name.as_str()).collect();
    assert_eq!(fields, vec!["newest", "middle", "oldest"]);
    Ok(())
}

#[tokio::test]
async fn maintenance_filters_by_range_and_completion() -> Result<(), Error> {
    let db = setup_test_database().await?;
    let assets = SqliteAssetRepository::new(db.pool().clone());
    let users = SqliteUserRepository::new(db.pool().clone());
    let repo = SqliteMaintenanceRepository::new(db.pool().clone());

    let asset = test_asset("serviced");
    assets.create(&asset).await?;
    let tech = test_user("svc@corp.example");
    users.create(&tech).await?;

    let now = Utc::now();
    let make = |days: i64, completed: bool| MaintenanceSchedule {
        schedule_id: Uuid::new_v4().to_string(),
        asset_id: asset.asset_id.clone(),
        title: format!("job {days}"),
        description: None,
        scheduled_date: now + Duration::days(days),
        is_completed: completed,
        created_by: tech.user_id.clone(),
        created_at: now,
        updated_at: now,
    };

    repo.create(&make(1, false)).await?;
    repo.create(&make(10, true)).await?;
    repo.create(&make(40, false)).await?;

    let in_window = repo
        .list(&MaintenanceFilter {
            asset_id: Some(asset.asset_id.clone()),
            start_date: Some(now),
            end_date: Some(now + Duration::days(14)),
            is_completed: None,
        })
        .await?;
    assert_eq!(in_window.len(), 2);

    let open_only = repo
        .list(&MaintenanceFilter {
            is_completed: Some(false),
            ..Default::default()
        })
        .await?;
    assert_eq!(open_only.len(), 2);

    let upcoming = repo.count_upcoming(now, now + Duration::days(30)).await?;
    assert_eq!(upcoming, 1);
    Ok(())
}

#[tokio::test]
async fn activity_log_filters_and_orders_newest_first() -> Result<(), Error> {
    let db = setup_test_database().await?;
    let users = SqliteUserRepository::new(db.pool().clone());
    let repo = SqliteActivityLogRepository::new(db.pool().clone());

    let alice = test_user("alice@corp.example");
    let bob = test_user("bob@corp.example");
    users.create(&alice).await?;
    users.create(&bob).await?;

    let now = Utc::now();
    let mut entry = UserActivityLog::new(&alice.user_id, "LOGIN", "user", None, None);
    entry.created_at = now - Duration::minutes(5);
    repo.insert(&entry).await?;

    let mut entry = UserActivityLog::new(&alice.user_id, "CREATE_USER", "user", None, None);
    entry.created_at = now;
    repo.insert(&entry).await?;

    let mut entry = UserActivityLog::new(&bob.user_id, "LOGIN", "user", None, None);
    entry.created_at = now - Duration::days(30);
    repo.insert(&entry).await?;

    let for_alice = repo
        .list(&ActivityLogFilter {
            user_id: Some(alice.user_id.clone()),
            ..Default::default()
        })
        .await?;
    assert_eq!(for_alice.len(), 2);
    assert_eq!(for_alice[0].action, "CREATE_USER");
    assert_eq!(for_alice[1].action, "LOGIN");

    let logins = repo
        .list(&ActivityLogFilter {
            action: Some("LOGIN".to_string()),
            ..Default::default()
        })
        .await?;
    assert_eq!(logins.len(), 2);

    let recent = repo
        .list(&ActivityLogFilter {
            start_date: Some(now - Duration::days(7)),
            end_date: Some(now + Duration::minutes(1)),
            ..Default::default()
        })
        .await?;
    assert_eq!(recent.len(), 2);

    assert_eq!(repo.count_since(now - Duration::days(7)).await?, 2);
    Ok(())
}
