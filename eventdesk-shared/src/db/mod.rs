/// Database access
///
/// - [`pool`]: PostgreSQL connection pool with a health check
/// - [`migrations`]: embedded schema migrations
///
/// Queries live with the models in [`crate::models`].
///
/// # Example
///
/// ```no_run
/// use eventdesk_shared::db::migrations::run_migrations;
/// use eventdesk_shared::db::pool::{create_pool, DatabaseConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let pool = create_pool(DatabaseConfig {
///         url: std::env::var("DATABASE_URL")?,
///         ..Default::default()
///     })
///     .await?;
///
///     run_migrations(&pool).await?;
///     Ok(())
/// }
/// ```

pub mod migrations;
pub mod pool;
