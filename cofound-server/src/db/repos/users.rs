//! User repository
//!
//! Account creation, credential lookup for login, profile reads and
//! partial profile updates. The email UNIQUE constraint is the only
//! duplicate guard; violations are mapped to `DbError::Conflict`.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::models::EmailAddress;

use super::{is_unique_violation, DbError};

/// User record as exposed to the API (no password hash)
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub company_name: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Optional profile fields supplied at registration
#[derive(Debug, Clone, Default)]
pub struct NewProfile {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub company_name: Option<String>,
}

/// Partial profile update; only Some fields are applied
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub email: Option<EmailAddress>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub company_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a new account. Returns the generated user id.
    ///
    /// A duplicate email surfaces as `Conflict` via the UNIQUE constraint,
    /// so concurrent registrations cannot both succeed.
    pub async fn create(
        &self,
        email: &EmailAddress,
        password_hash: &str,
        profile: NewProfile,
    ) -> Result<i64, DbError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash, name, phone, position, company_name, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(email.as_str())
        .bind(password_hash)
        .bind(profile.name.as_deref())
        .bind(profile.phone.as_deref())
        .bind(profile.position.as_deref())
        .bind(profile.company_name.as_deref())
        .bind(Utc::now())
        .execute(self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DbError::Conflict {
                    reason: format!("email '{}' is already registered", email.as_str()),
                }
            } else {
                DbError::Sqlx(e)
            }
        })?;

        Ok(result.last_insert_rowid())
    }

    /// Look up login credentials by email.
    ///
    /// Returns `(user_id, password_hash)`; None if no such account. The
    /// caller decides how to report a miss so login cannot leak which
    /// emails exist.
    pub async fn credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<(i64, String)>, DbError> {
        let row: Option<(i64, String)> =
            sqlx::query_as("SELECT id, password_hash FROM users WHERE email = ?")
                .bind(email)
                .fetch_optional(self.pool)
                .await?;

        Ok(row)
    }

    /// List all users.
    pub async fn list(&self) -> Result<Vec<User>, DbError> {
        let users: Vec<User> = sqlx::query_as(
            r#"
            SELECT id, email, name, phone, position, company_name, avatar_url, created_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    /// Get a single user by id.
    pub async fn get(&self, id: i64) -> Result<User, DbError> {
        let user: Option<User> = sqlx::query_as(
            r#"
            SELECT id, email, name, phone, position, company_name, avatar_url, created_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        user.ok_or(DbError::NotFound {
            resource: "user",
            id,
        })
    }

    /// Apply a partial profile update.
    ///
    /// An email change that collides with another account fails with
    /// `Conflict` before any column is written.
    pub async fn update(&self, id: i64, changes: ProfileUpdate) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if !exists.0 {
            return Err(DbError::NotFound {
                resource: "user",
                id,
            });
        }

        if let Some(email) = &changes.email {
            let taken: (bool,) =
                sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = ? AND id <> ?)")
                    .bind(email.as_str())
                    .bind(id)
                    .fetch_one(&mut *tx)
                    .await?;
            if taken.0 {
                return Err(DbError::Conflict {
                    reason: format!("email '{}' is already registered", email.as_str()),
                });
            }
        }

        sqlx::query(
            r#"
            UPDATE users SET
                email = COALESCE(?, email),
                name = COALESCE(?, name),
                phone = COALESCE(?, phone),
                position = COALESCE(?, position),
                company_name = COALESCE(?, company_name),
                avatar_url = COALESCE(?, avatar_url)
            WHERE id = ?
            "#,
        )
        .bind(changes.email.as_ref().map(|e| e.as_str()))
        .bind(changes.name.as_deref())
        .bind(changes.phone.as_deref())
        .bind(changes.position.as_deref())
        .bind(changes.company_name.as_deref())
        .bind(changes.avatar_url.as_deref())
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Whether a user row exists. Used by repositories inserting rows
    /// that reference a caller-supplied user id.
    pub async fn exists(&self, id: i64) -> Result<bool, DbError> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)")
            .bind(id)
            .fetch_one(self.pool)
            .await?;
        Ok(row.0)
    }
}
