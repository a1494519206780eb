/// Database migration runner
///
/// Applies the SQL migrations embedded from the `migrations/` directory at
/// the crate root. Intended to run once at startup, before any service is
/// constructed.
///
/// # Example
///
/// ```no_run
/// use taskdesk::config::DatabaseConfig;
/// use taskdesk::db::{migrations::run_migrations, pool::create_pool};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = DatabaseConfig {
///     url: std::env::var("DATABASE_URL")?,
///     max_connections: 10,
/// };
/// let pool = create_pool(&config).await?;
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::postgres::PgPool;
use tracing::{info, warn};

/// Runs all pending database migrations
///
/// Migrations already applied are skipped; a failing migration is rolled
/// back and returned as an error.
///
/// # Errors
///
/// Returns an error if a migration fails to execute or the connection is
/// lost mid-run.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    match sqlx::migrate!("./migrations").run(pool).await {
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
