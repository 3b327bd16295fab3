// src/repositories/sqlite/user.rs

use async_trait::async_trait;
use sqlx::{Pool, Row, Sqlite};

use quartermaster_common::error::Error;
use quartermaster_common::models::User;
use quartermaster_common::traits::repository_traits::UserRepository;

use super::map_unique_violation;

pub struct SqliteUserRepository {
    pool: Pool<Sqlite>,
}

impl SqliteUserRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    fn map_row(r: &sqlx::sqlite::SqliteRow) -> Result<User, Error> {
        Ok(User {
            user_id: r.try_get("user_id")?,
            email: r.try_get("email")?,
            password_hash: r.try_get("password_hash")?,
            role: r.try_get("role")?,
            full_name: r.try_get("full_name")?,
            is_active: r.try_get("is_active")?,
            created_at: r.try_get("created_at")?,
            updated_at: r.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: &User) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id, email, password_hash, role, full_name,
                is_active, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.user_id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(&user.full_name)
        .bind(user.is_active)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &format!("email {}", user.email)))?;
        Ok(())
    }

    async fn get(&self, user_id: &str) -> Result<Option<User>, Error> {
        let row = sqlx::query(
            r#"
            SELECT user_id, email, password_hash, role, full_name,
                   is_active, created_at, updated_at
            FROM users
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        let row = sqlx::query(
            r#"
            SELECT user_id, email, password_hash, role, full_name,
                   is_active, created_at, updated_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn update(&self, user: &User) -> Result<(), Error> {
        sqlx::query(
            r#"
            UPDATE users
            SET email = ?,
                password_hash = ?,
                role = ?,
                full_name = ?,
                is_active = ?,
                updated_at = ?
            WHERE user_id = ?
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(&user.full_name)
        .bind(user.is_active)
        .bind(user.updated_at)
        .bind(&user.user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &format!("email {}", user.email)))?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<User>, Error> {
        let rows = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, email, password_hash, role, full_name,
                   is_active, created_at, updated_at
            FROM users
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn ensure(&self, user: &User) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO users (
                user_id, email, password_hash, role, full_name,
                is_active, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.user_id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(&user.full_name)
        .bind(user.is_active)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
