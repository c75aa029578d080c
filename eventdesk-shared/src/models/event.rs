/// Event model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE events (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     slug VARCHAR(255) NOT NULL UNIQUE,
///     category_id UUID NOT NULL REFERENCES categories(id) ON DELETE RESTRICT,
///     description TEXT NOT NULL,
///     banner VARCHAR(512) NOT NULL,
///     start_date TIMESTAMPTZ NOT NULL,
///     end_date TIMESTAMPTZ NOT NULL,
///     is_online BOOLEAN NOT NULL DEFAULT FALSE,
///     is_featured BOOLEAN NOT NULL DEFAULT FALSE,
///     is_published BOOLEAN NOT NULL DEFAULT FALSE,
///     region VARCHAR(255),
///     address TEXT,
///     created_by UUID NOT NULL REFERENCES users(id),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CHECK (slug <> ''),
///     CHECK (end_date >= start_date)
/// );
/// ```
///
/// Search uses PostgreSQL full-text matching over name and description.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::pagination::PageQuery;

/// A scheduled event
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub name: String,

    /// URL-safe form of the name, unique
    pub slug: String,

    #[serde(rename = "category")]
    pub category_id: Uuid,

    pub description: String,
    pub banner: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_online: bool,
    pub is_featured: bool,
    pub is_published: bool,
    pub region: Option<String>,
    pub address: Option<String>,

    /// User who created the event
    pub created_by: Uuid,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an event
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvent {
    pub name: String,
    pub category: Uuid,
    pub description: String,
    pub banner: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub is_online: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_published: bool,
    pub region: Option<String>,
    pub address: Option<String>,
}

/// Input for updating an event
///
/// Only non-None fields are written. Renaming an event regenerates its slug.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEvent {
    pub name: Option<String>,
    pub category: Option<Uuid>,
    pub description: Option<String>,
    pub banner: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub is_online: Option<bool>,
    pub is_featured: Option<bool>,
    pub is_published: Option<bool>,
    pub region: Option<String>,
    pub address: Option<String>,
}

/// Lowercases `name` and joins its alphanumeric runs with `-`
///
/// ```
/// use eventdesk_shared::models::event::slugify;
///
/// assert_eq!(slugify("RustConf 2025: Montréal!"), "rustconf-2025-montréal");
/// ```
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

const COLUMNS: &str = "id, name, slug, category_id, description, banner, start_date, end_date, \
                       is_online, is_featured, is_published, region, address, created_by, \
                       created_at, updated_at";

const SEARCH_FILTER: &str = "($1::TEXT IS NULL OR \
     to_tsvector('simple', name || ' ' || description) @@ plainto_tsquery('simple', $1))";

impl Event {
    /// Inserts an event owned by `created_by`
    ///
    /// # Errors
    ///
    /// Fails with a unique violation if another event already has the same
    /// slug, or a foreign key violation if the category doesn't exist.
    pub async fn create(
        pool: &PgPool,
        data: CreateEvent,
        created_by: Uuid,
    ) -> Result<Self, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO events (name, slug, category_id, description, banner, start_date,
                                end_date, is_online, is_featured, is_published, region,
                                address, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {COLUMNS}
            "#
        );

        sqlx::query_as::<_, Event>(&query)
            .bind(&data.name)
            .bind(slugify(&data.name))
            .bind(data.category)
            .bind(data.description)
            .bind(data.banner)
            .bind(data.start_date)
            .bind(data.end_date)
            .bind(data.is_online)
            .bind(data.is_featured)
            .bind(data.is_published)
            .bind(data.region)
            .bind(data.address)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");

        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE slug = $1");

        sqlx::query_as::<_, Event>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Lists one page of events, newest first, with the total match count
    pub async fn list(pool: &PgPool, page: &PageQuery) -> Result<(Vec<Self>, i64), sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events WHERE {SEARCH_FILTER} ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, Event>(&query)
            .bind(page.search())
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        let (total,): (i64,) =
            sqlx::query_as(&format!("SELECT COUNT(*) FROM events WHERE {SEARCH_FILTER}"))
                .bind(page.search())
                .fetch_one(pool)
                .await?;

        Ok((rows, total))
    }

    /// Applies `data`, returning the updated row or `None` if it doesn't exist
    ///
    /// Dates are checked after merging with the stored ones; a resulting
    /// range that ends before it starts fails with a check violation.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateEvent,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!(
            r#"
            UPDATE events
            SET name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                category_id = COALESCE($4, category_id),
                description = COALESCE($5, description),
                banner = COALESCE($6, banner),
                start_date = COALESCE($7, start_date),
                end_date = COALESCE($8, end_date),
                is_online = COALESCE($9, is_online),
                is_featured = COALESCE($10, is_featured),
                is_published = COALESCE($11, is_published),
                region = COALESCE($12, region),
                address = COALESCE($13, address),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        );

        let slug = data.name.as_deref().map(slugify);

        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(data.name)
            .bind(slug)
            .bind(data.category)
            .bind(data.description)
            .bind(data.banner)
            .bind(data.start_date)
            .bind(data.end_date)
            .bind(data.is_online)
            .bind(data.is_featured)
            .bind(data.is_published)
            .bind(data.region)
            .bind(data.address)
            .fetch_optional(pool)
            .await
    }

    /// Deletes an event, returning the removed row
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("DELETE FROM events WHERE id = $1 RETURNING {COLUMNS}");

        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
