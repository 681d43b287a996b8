//! MySQL implementation of the UserRepository trait.
//!
//! Every statement runs either on the caller's transaction or, when no
//! transaction is given, directly on the pool.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

use ua_core::domain::entities::user::{NewUser, User, UserStatus};
use ua_core::errors::DomainError;
use ua_core::repositories::UserRepository;

use super::{map_sqlx_error, MySqlTx};

const SELECT_USER_COLUMNS: &str =
    "SELECT id, username, email, password_hash, status, created_at, updated_at FROM users";

/// MySQL implementation of UserRepository
#[derive(Clone)]
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &MySqlRow) -> Result<User, DomainError> {
        let status: String = row
            .try_get("status")
            .map_err(|e| DomainError::internal(format!("Failed to get status: {}", e)))?;

        Ok(User {
            id: row
                .try_get("id")
                .map_err(|e| DomainError::internal(format!("Failed to get id: {}", e)))?,
            username: row
                .try_get("username")
                .map_err(|e| DomainError::internal(format!("Failed to get username: {}", e)))?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::internal(format!("Failed to get email: {}", e)))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| DomainError::internal(format!("Failed to get password_hash: {}", e)))?,
            status: status
                .parse::<UserStatus>()
                .map_err(|e| DomainError::internal(format!("Invalid status: {}", e)))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::internal(format!("Failed to get created_at: {}", e)))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::internal(format!("Failed to get updated_at: {}", e)))?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    type Tx = MySqlTx;

    async fn create(&self, tx: Option<&mut Self::Tx>, user: NewUser) -> Result<User, DomainError> {
        let now = Utc::now();
        let query = sqlx::query(
            r#"
            INSERT INTO users (username, email, password_hash, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.status.as_str())
        .bind(now)
        .bind(now);

        let result = match tx {
            Some(tx) => query.execute(&mut **tx).await,
            None => query.execute(&self.pool).await,
        }
        .map_err(|e| map_sqlx_error("Failed to insert user", e))?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|_| DomainError::internal("Generated user id out of range"))?;
        tracing::debug!(user_id = id, "User row inserted");

        Ok(user.into_user(id, now))
    }

    async fn get_by_email(
        &self,
        tx: Option<&mut Self::Tx>,
        email: &str,
    ) -> Result<Option<User>, DomainError> {
        let sql = format!("{} WHERE email = ? LIMIT 1", SELECT_USER_COLUMNS);
        let query = sqlx::query(&sql).bind(email);

        let row = match tx {
            Some(tx) => query.fetch_optional(&mut **tx).await,
            None => query.fetch_optional(&self.pool).await,
        }
        .map_err(|e| map_sqlx_error("Database query failed", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn get_by_id(
        &self,
        tx: Option<&mut Self::Tx>,
        id: i64,
    ) -> Result<Option<User>, DomainError> {
        let sql = format!("{} WHERE id = ? LIMIT 1", SELECT_USER_COLUMNS);
        let query = sqlx::query(&sql).bind(id);

        let row = match tx {
            Some(tx) => query.fetch_optional(&mut **tx).await,
            None => query.fetch_optional(&self.pool).await,
        }
        .map_err(|e| map_sqlx_error("Database query failed", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn activate_by_email(
        &self,
        tx: Option<&mut Self::Tx>,
        email: &str,
    ) -> Result<(), DomainError> {
        let query = sqlx::query(
            r#"
            UPDATE users
            SET status = 'active', updated_at = ?
            WHERE email = ? AND status = 'pending'
            "#,
        )
        .bind(Utc::now())
        .bind(email);

        let result = match tx {
            Some(tx) => query.execute(&mut **tx).await,
            None => query.execute(&self.pool).await,
        }
        .map_err(|e| map_sqlx_error("Failed to activate user", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("user"));
        }

        tracing::debug!("User activated");
        Ok(())
    }
}
