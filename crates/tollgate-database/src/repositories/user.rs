//! User repository: the PostgreSQL user store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;

use tollgate_core::error::{AppError, ErrorKind};
use tollgate_core::result::AppResult;
use tollgate_core::traits::UserStore;
use tollgate_core::types::{AccountType, Claims, NewUser, StoredCredentials};

/// SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Joined `users` + `address` row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub account_type: String,
    pub created_at: DateTime<Utc>,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
}

impl UserRecord {
    /// Claims embedded in tokens issued for this user.
    pub fn claims(&self) -> AppResult<Claims> {
        let account_type: AccountType = self.account_type.parse().map_err(|_| {
            AppError::database(format!(
                "User {} has unknown account type '{}'",
                self.id, self.account_type
            ))
        })?;
        Ok(Claims::new(self.id, self.email.clone(), account_type))
    }
}

const SELECT_USER: &str = "SELECT u.id, u.email, u.password AS password_hash, u.first_name, \
     u.last_name, u.phone, u.account_type, u.created_at, \
     a.line1, a.line2, a.city, a.state, a.country, a.postal_code \
     FROM users u INNER JOIN address a ON u.address_id = a.id";

/// Repository for user lookup and registration.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        sqlx::query_as::<_, UserRecord>(&format!("{SELECT_USER} WHERE LOWER(u.email) = LOWER($1)"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    /// Insert the address and the user in one transaction.
    pub async fn create(&self, user: &NewUser) -> AppResult<i64> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let address_id: i64 = sqlx::query_scalar(
            "INSERT INTO address (line1, line2, city, state, country, postal_code) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(&user.address.line1)
        .bind(&user.address.line2)
        .bind(&user.address.city)
        .bind(&user.address.state)
        .bind(&user.address.country)
        .bind(&user.address.postal_code)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert address", e))?;

        let user_id: i64 = sqlx::query_scalar(
            "INSERT INTO users \
             (email, password, first_name, last_name, phone, address_id, account_type) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.phone)
        .bind(address_id)
        .bind(user.account_type.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_insert_error(e, &user.email))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit user", e)
        })?;

        debug!(user_id, address_id, "Inserted user");
        Ok(user_id)
    }
}

fn map_insert_error(e: sqlx::Error, email: &str) -> AppError {
    let unique = e
        .as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == UNIQUE_VIOLATION);

    if unique {
        AppError::with_source(
            ErrorKind::Conflict,
            format!("Email '{email}' is already registered"),
            e,
        )
    } else {
        AppError::with_source(ErrorKind::Database, "Failed to insert user", e)
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn lookup_credentials(&self, identifier: &str) -> AppResult<Option<StoredCredentials>> {
        let Some(record) = self.find_by_email(identifier).await? else {
            return Ok(None);
        };
        Ok(Some(StoredCredentials {
            claims: record.claims()?,
            password_hash: record.password_hash,
        }))
    }

    async fn persist_user(&self, user: &NewUser) -> AppResult<()> {
        self.create(user).await.map(|_| ())
    }
}
