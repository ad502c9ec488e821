use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use credentials::Role;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::DirectoryError;
use crate::user::errors::UniqueViolation;
use crate::user::ports::UserDirectory;

/// User directory backed by Postgres.
///
/// Uniqueness of username and email is enforced by the table's unique
/// indexes, so a raced insert is rejected by the database itself. Every
/// query runs under the caller-supplied deadline.
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: PgRow) -> Result<User, DirectoryError> {
        let id: Uuid = row.get("id");
        let username: String = row.get("username");
        let email: String = row.get("email");
        let password_hash: String = row.get("password_hash");
        let role: String = row.get("role");
        let created_at: DateTime<Utc> = row.get("created_at");

        Ok(User {
            id: UserId(id),
            username: Username::new(username)
                .map_err(|e| DirectoryError::Database(e.to_string()))?,
            email: EmailAddress::new(email)
                .map_err(|e| DirectoryError::Database(e.to_string()))?,
            password_hash,
            role: role
                .parse::<Role>()
                .map_err(|e| DirectoryError::Database(e.to_string()))?,
            created_at,
        })
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
        timeout: Duration,
    ) -> Result<Option<User>, DirectoryError> {
        let query = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, role, created_at
            FROM users
            WHERE username = $1 OR email = $2
            "#,
        )
        .bind(username)
        .bind(email)
        .fetch_optional(&self.pool);

        let row = tokio::time::timeout(timeout, query)
            .await
            .map_err(|_| DirectoryError::Timeout)?
            .map_err(|e| DirectoryError::Database(e.to_string()))?;

        row.map(Self::row_to_user).transpose()
    }

    async fn insert_unique(
        &self,
        user: NewUser,
        timeout: Duration,
    ) -> Result<UserId, DirectoryError> {
        let query = sqlx::query(
            r#"
            INSERT INTO users (username, email, password_hash, role, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.created_at)
        .fetch_one(&self.pool);

        let row = tokio::time::timeout(timeout, query)
            .await
            .map_err(|_| DirectoryError::Timeout)?
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        if db_err.constraint() == Some("users_username_key") {
                            return DirectoryError::DuplicateKey(UniqueViolation::Username);
                        }
                        if db_err.constraint() == Some("users_email_key") {
                            return DirectoryError::DuplicateKey(UniqueViolation::Email);
                        }
                    }
                }
                DirectoryError::Database(e.to_string())
            })?;

        Ok(UserId(row.get("id")))
    }
}
