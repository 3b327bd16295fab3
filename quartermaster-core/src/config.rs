// quartermaster-core/src/config.rs

use dotenv::dotenv;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
}

impl AppConfig {
    /// Reads configuration from the environment (a `.env` file is honored
    /// when present).
    pub fn from_env() -> Self {
        dotenv().ok();
        let database_url = std::env::var("QUARTERMASTER_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://quartermaster.db".to_string());
        Self { database_url }
    }
}
