//! PostgreSQL connection pool setup.
//!
//! The database URL is read from the `DATABASE_URL` environment variable;
//! a missing URL or unreachable database is startup-fatal. Pending
//! migrations from `migrations/` are applied before the pool is handed out.

use sqlx::PgPool;
use std::env;

/// Connects to PostgreSQL and applies pending migrations.
///
/// Called once during startup; the returned pool is cheaply cloneable and
/// shared through the application state.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is not set, the connection fails, or a
/// migration fails to apply.
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    pool
}
