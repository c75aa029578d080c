/// User persistence
///
/// The auth pipeline talks to user records only through [`UserStore`], so it
/// runs unchanged against PostgreSQL ([`PgUserStore`]) or the in-process
/// [`memory::MemoryUserStore`].
///
/// Stores own uniqueness: two concurrent registrations with the same email
/// or username resolve to one success and one [`StoreError::Duplicate`].

pub mod memory;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::{CreateUser, User};

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique field is already taken
    #[error("{0} already exists")]
    Duplicate(String),

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                let field = match db_err.constraint() {
                    Some(c) if c.contains("email") => "email",
                    Some(c) if c.contains("username") => "username",
                    _ => "user",
                };
                return StoreError::Duplicate(field.to_string());
            }
        }
        StoreError::Database(err)
    }
}

/// Persistence collaborator for user records
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Stores a new record
    ///
    /// Fails with [`StoreError::Duplicate`] if email or username is taken.
    async fn create(&self, data: CreateUser) -> Result<User, StoreError>;

    /// Finds the record whose email or username equals `identifier`
    ///
    /// An email match wins over another user's identical username.
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Flips the inactive record holding `code` to active
    ///
    /// Returns `None` if no inactive record holds the code.
    async fn activate(&self, code: &str) -> Result<Option<User>, StoreError>;
}

/// PostgreSQL-backed [`UserStore`]
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, data: CreateUser) -> Result<User, StoreError> {
        Ok(User::create(&self.pool, data).await?)
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, StoreError> {
        Ok(User::find_by_identifier(&self.pool, identifier).await?)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(User::find_by_id(&self.pool, id).await?)
    }

    async fn activate(&self, code: &str) -> Result<Option<User>, StoreError> {
        Ok(User::activate(&self.pool, code).await?)
    }
}
