/**
 * Database Connection
 *
 * Opens the SQLite pool and applies the embedded migrations. The pool is the
 * only shared mutable resource in the server; each request borrows a
 * connection for the duration of its queries.
 *
 * # In-memory Databases
 *
 * Every connection to `sqlite::memory:` opens a separate empty database, so
 * in-memory URLs get a single connection that is never recycled. Tests rely on
 * this to get an isolated database per test.
 */

use std::str::FromStr;

use sqlx::migrate::MigrateError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

/// Open a connection pool for `database_url`
///
/// Foreign keys are enabled on every connection; post deletion relies on
/// them to cascade to likes and comments.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(8)
            .connect_with(options)
            .await?
    };

    tracing::info!("Database connection pool created");
    Ok(pool)
}

/// Apply pending migrations from `migrations/`
pub async fn migrate(pool: &SqlitePool) -> Result<(), MigrateError> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(pool).await?;
    tracing::info!("Database migrations completed successfully");
    Ok(())
}

/// Connect and migrate in one step
pub async fn connect_and_migrate(database_url: &str) -> Result<SqlitePool, MigrateError> {
    let pool = connect(database_url).await?;
    migrate(&pool).await?;
    Ok(pool)
}
