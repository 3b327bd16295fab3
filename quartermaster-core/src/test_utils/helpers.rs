// File: quartermaster-core/src/test_utils/helpers.rs

use crate::db::Database;
use quartermaster_common::error::Error;

/// Fresh in-memory database with all migrations applied.
pub async fn setup_test_database() -> Result<Database, Error> {
    let db = Database::open_in_memory().await?;
    db.migrate().await?;
    Ok(db)
}

/// Installs a test-writer subscriber once; later calls are no-ops.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
