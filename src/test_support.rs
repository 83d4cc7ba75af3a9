//! Shared helpers for unit tests.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// In-memory database with migrations applied
///
/// Capped to one connection: each in-memory SQLite connection is its own
/// database.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("failed to run migrations");

    pool
}
