/// Database migration runner
///
/// Migrations live in the `migrations/` directory of this crate and are
/// applied at startup with sqlx's embedded migrator. The initial migration
/// creates the `users` and `pending_users` tables with the uniqueness
/// constraints the registration and promotion workflows rely on.
///
/// # Example
///
/// ```no_run
/// use tickdone_shared::db::pool::{create_pool, DatabaseConfig};
/// use tickdone_shared::db::migrations::run_migrations;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Runs all pending database migrations
///
/// # Errors
///
/// Returns an error if a migration file is malformed, a migration fails to
/// execute, or the connection is lost mid-run. Failed migrations roll back.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    let migrations = sqlx::migrate!("./migrations");

    match migrations.run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}
