/// User model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TYPE user_role AS ENUM ('admin', 'user');
///
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     full_name VARCHAR(255) NOT NULL,
///     username VARCHAR(255) NOT NULL UNIQUE,
///     email VARCHAR(255) NOT NULL UNIQUE,
///     password VARCHAR(255) NOT NULL,
///     role user_role NOT NULL DEFAULT 'user',
///     profile_picture VARCHAR(512) NOT NULL DEFAULT 'user.jpg',
///     is_active BOOLEAN NOT NULL DEFAULT FALSE,
///     activation_code VARCHAR(128) NOT NULL UNIQUE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use eventdesk_shared::models::user::{User, CreateUser};
/// use eventdesk_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(&pool, CreateUser {
///     full_name: "Alice Liddell".to_string(),
///     username: "alice".to_string(),
///     email: "alice@example.com".to_string(),
///     password: "$argon2id$...".to_string(),
///     activation_code: "4f1c...".to_string(),
/// }).await?;
///
/// let found = User::find_by_identifier(&pool, "alice").await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Access roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Manages categories and events
    Admin,

    /// Regular account
    #[default]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

/// User account
///
/// `password` holds the Argon2id digest. It and `activation_code` are never
/// serialized, so a `User` can be returned to clients as is.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,

    pub full_name: String,

    /// Unique login name
    pub username: String,

    /// Unique email address
    pub email: String,

    /// Credential digest
    #[serde(skip_serializing)]
    pub password: String,

    pub role: Role,

    pub profile_picture: String,

    /// Set once the activation code has been redeemed
    pub is_active: bool,

    /// One-time code mailed on registration
    #[serde(skip_serializing)]
    pub activation_code: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub full_name: String,
    pub username: String,
    pub email: String,

    /// Credential digest (NOT the plaintext password!)
    pub password: String,

    pub activation_code: String,
}

const COLUMNS: &str = "id, full_name, username, email, password, role, profile_picture, \
                       is_active, activation_code, created_at, updated_at";

impl User {
    /// Inserts a new user
    ///
    /// # Errors
    ///
    /// Fails with a unique violation if the email, username or activation
    /// code is already taken.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO users (full_name, username, email, password, activation_code)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "#
        );

        sqlx::query_as::<_, User>(&query)
            .bind(data.full_name)
            .bind(data.username)
            .bind(data.email)
            .bind(data.password)
            .bind(data.activation_code)
            .fetch_one(pool)
            .await
    }

    /// Finds a user by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");

        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Finds a user whose email or username equals `identifier`
    pub async fn find_by_identifier(
        pool: &PgPool,
        identifier: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users WHERE email = $1 OR username = $1 \
             ORDER BY (email = $1) DESC LIMIT 1"
        );

        sqlx::query_as::<_, User>(&query)
            .bind(identifier)
            .fetch_optional(pool)
            .await
    }

    /// Marks the inactive user holding `code` as active
    ///
    /// Returns `None` when no inactive user holds the code, including when
    /// the code was already redeemed.
    pub async fn activate(pool: &PgPool, code: &str) -> Result<Option<Self>, sqlx::Error> {
        let query = format!(
            r#"
            UPDATE users
            SET is_active = TRUE, updated_at = NOW()
            WHERE activation_code = $1 AND is_active = FALSE
            RETURNING {COLUMNS}
            "#
        );

        sqlx::query_as::<_, User>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }
}
