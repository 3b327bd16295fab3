// File: quartermaster-common/src/models/user.rs

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Well-known id of the non-human actor that attributes automated actions
/// (restore logging and similar). The row is materialized lazily through
/// `UserRepository::ensure`.
pub const SYSTEM_ACTOR_ID: &str = "00000000-0000-0000-0000-000000000000";

#[derive(Debug, Serialize, Deserialize, Clone, FromRow)]
pub struct User {
    pub user_id: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub full_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// The lazily-materialized system actor. Empty credential hash, so it
    /// can never authenticate.
    pub fn system_actor() -> Self {
        let now = Utc::now();
        Self {
            user_id: SYSTEM_ACTOR_ID.to_string(),
            email: "system@quartermaster.internal".to_string(),
            password_hash: String::new(),
            role: UserRole::Admin,
            full_name: "System".to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Employee,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Admin => write!(f, "admin"),
            UserRole::Employee => write!(f, "employee"),
        }
    }
}

impl FromStr for UserRole {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(UserRole::Admin),
            "employee" => Ok(UserRole::Employee),
            _ => Err(format!("Unknown user role: {}", s)),
        }
    }
}

/// The credential-stripped view handed out by listing and login operations.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UserProfile {
    pub user_id: String,
    pub email: String,
    pub role: UserRole,
    pub full_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            email: user.email,
            role: user.role,
            full_name: user.full_name,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub full_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
    pub full_name: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, Clone)]
pub struct LoginSession {
    pub user: UserProfile,
    pub token: String,
}
