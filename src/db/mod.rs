pub mod games;
pub mod pool;
pub mod records;

use sqlx::SqlitePool;
use std::path::Path;

pub use pool::{create_memory_pool, create_pool};

/// Database handle type (the pool is internally reference counted)
pub type Db = SqlitePool;

/// Open or create the SQLite database at the given path
///
/// Creates the parent directory and applies the schema on first run.
pub async fn open_database(path: impl AsRef<Path>) -> Result<Db, sqlx::Error> {
    tracing::info!("Opening database at: {:?}", path.as_ref());

    // Create parent directory if it doesn't exist
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                tracing::error!("Failed to create database directory: {}", e);
                sqlx::Error::Io(e)
            })?;
        }
    }

    let pool = create_pool(path.as_ref()).await?;
    migrate(&pool).await?;

    tracing::info!("Database initialized successfully");

    Ok(pool)
}

/// Open a private in-memory database with the schema applied
pub async fn open_in_memory() -> Result<Db, sqlx::Error> {
    let pool = create_memory_pool().await?;
    migrate(&pool).await?;
    Ok(pool)
}

/// Apply the embedded migrations in `migrations/`
pub async fn migrate(pool: &Db) -> Result<(), sqlx::Error> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| sqlx::Error::Migrate(Box::new(e)))?;
    tracing::info!("Migrations complete");
    Ok(())
}

/// Whether a store error is a rejected foreign key reference
pub fn is_foreign_key_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(e) => {
            e.is_foreign_key_violation() || e.message().contains("FOREIGN KEY constraint failed")
        }
        _ => false,
    }
}

/// Cheap connectivity probe used by the health endpoint
pub async fn ping(pool: &Db) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await.map(|_| ())
}
