// src/services/user_service.rs

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use quartermaster_common::error::Error;
use quartermaster_common::models::{
    ActivityLogFilter, LoginSession, NewUser, User, UserActivityLog, UserProfile, UserUpdate,
};
use quartermaster_common::traits::collaborator_traits::{CredentialHasher, TokenIssuer};
use quartermaster_common::traits::repository_traits::{ActivityLogRepository, UserRepository};

pub struct UserService {
    users: Arc<dyn UserRepository>,
    activity: Arc<dyn ActivityLogRepository>,
    hasher: Arc<dyn CredentialHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        activity: Arc<dyn ActivityLogRepository>,
        hasher: Arc<dyn CredentialHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            activity,
            hasher,
            tokens,
        }
    }

    pub async fn create_user(&self, input: &NewUser) -> Result<UserProfile, Error> {
        if input.email.trim().is_empty() {
            return Err(Error::ValidationError(
                "email must not be empty".to_string(),
            ));
        }
        if input.password.is_empty() {
            return Err(Error::ValidationError(
                "password must not be empty".to_string(),
            ));
        }
        if input.full_name.trim().is_empty() {
            return Err(Error::ValidationError(
                "full name must not be empty".to_string(),
            ));
        }

        let password_hash = self.hasher.hash(&input.password)?;
        let now = Utc::now();
        let user = User {
            user_id: Uuid::new_v4().to_string(),
            email: input.email.clone(),
            password_hash,
            role: input.role,
            full_name: input.full_name.clone(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.users.create(&user).await?;

        let entry = UserActivityLog::new(
            &user.user_id,
            "CREATE_USER",
            "user",
            Some(&user.user_id),
            Some(&format!("registered {}", user.email)),
        );
        self.activity.insert(&entry).await?;

        info!("created user {} ({})", user.user_id, user.email);
        Ok(user.into())
    }

    /// `None` for unknown email, inactive account, or failed verification;
    /// collaborator failures surface as errors.
    pub async fn login(&self, email: &str, password: &str) -> Result<Option<LoginSession>, Error> {
        let Some(user) = self.users.get_by_email(email).await? else {
            debug!("login rejected: unknown email");
            return Ok(None);
        };
        if !user.is_active {
            debug!("login rejected: user {} is inactive", user.user_id);
            return Ok(None);
        }
        if !self.hasher.verify(password, &user.password_hash)? {
            debug!("login rejected: bad credentials for {}", user.user_id);
            return Ok(None);
        }

        let token = self.tokens.issue(&user.user_id, user.role)?;
        let entry = UserActivityLog::new(&user.user_id, "LOGIN", "user", Some(&user.user_id), None);
        self.activity.insert(&entry).await?;

        Ok(Some(LoginSession {
            user: user.into(),
            token,
        }))
    }

    pub async fn list_users(&self) -> Result<Vec<UserProfile>, Error> {
        let users = self.users.list_all().await?;
        Ok(users.into_iter().map(UserProfile::from).collect())
    }

    pub async fn update_user(&self, user_id: &str, update: &UserUpdate) -> Result<UserProfile, Error> {
        let mut user = self
            .users
            .get(user_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("user {user_id}")))?;

        if let Some(email) = &update.email {
            if email.trim().is_empty() {
                return Err(Error::ValidationError(
                    "email must not be empty".to_string(),
                ));
            }
            user.email = email.clone();
        }
        if let Some(full_name) = &update.full_name {
            user.full_name = full_name.clone();
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        if let Some(is_active) = update.is_active {
            user.is_active = is_active;
        }
        if let Some(password) = &update.password {
            user.password_hash = self.hasher.hash(password)?;
        }

        user.updated_at = Utc::now();
        self.users.update(&user).await?;
        Ok(user.into())
    }

    /// Soft-deactivate only; user rows are never removed.
    pub async fn deactivate_user(&self, user_id: &str) -> Result<UserProfile, Error> {
        let mut user = self
            .users
            .get(user_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("user {user_id}")))?;

        if !user.is_active {
            return Err(Error::InvalidState(format!(
                "user {user_id} is already inactive"
            )));
        }

        user.is_active = false;
        user.updated_at = Utc::now();
        self.users.update(&user).await?;

        let entry = UserActivityLog::new(user_id, "DEACTIVATE_USER", "user", Some(user_id), None);
        self.activity.insert(&entry).await?;

        info!("deactivated user {}", user_id);
        Ok(user.into())
    }

    pub async fn activity_logs(
        &self,
        filter: &ActivityLogFilter,
    ) -> Result<Vec<UserActivityLog>, Error> {
        self.activity.list(filter).await
    }
}
