/// Database migration runner
///
/// Migrations are SQL files in the `migrations/` directory at the workspace
/// root, embedded at compile time via `sqlx::migrate!`. Each migration is an
/// up/down pair: `{version}_{name}.sql` and `{version}_{name}.down.sql`.
///
/// The API server runs pending migrations at startup, before accepting
/// requests.

use sqlx::postgres::PgPool;
use tracing::info;

/// Runs all pending database migrations
///
/// # Errors
///
/// Returns an error if a migration fails to execute or the connection is
/// lost. A failed migration is rolled back.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Running database migrations");

    sqlx::migrate!("../migrations").run(pool).await?;

    info!("Database migrations complete");
    Ok(())
}
