//! PostgreSQL connection pool initialization.
//!
//! Reads `DATABASE_URL` from the environment once at startup. The pool is
//! cheaply cloneable and shared through the application state; each
//! request borrows a connection for its lifetime, so there is no session
//! state shared between requests.

use sqlx::PgPool;
use std::env;

/// Initializes the connection pool.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is unset or the database is unreachable;
/// called once during startup where failing fast is the right behavior.
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}
