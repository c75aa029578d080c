/// Embedded schema migrations
///
/// SQL files under `eventdesk-shared/migrations/` are compiled into the
/// binary as reversible `{version}_{name}.up.sql` / `.down.sql` pairs.

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Applies every pending migration
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Running database migrations");

    sqlx::migrate!("./migrations").run(pool).await.map_err(|e| {
        warn!(error = %e, "Migration failed");
        e
    })?;

    info!("Database migrations complete");
    Ok(())
}
