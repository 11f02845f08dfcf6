//! Database pool setup and embedded migrations

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::DatabaseConfig;
use crate::error::AppResult;

/// Schema migrations embedded at compile time from ./migrations
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Create the SQLite pool and bring the schema up to date
pub async fn create_pool(config: &DatabaseConfig) -> AppResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect_with(options)
        .await?;

    MIGRATOR.run(&pool).await?;

    Ok(pool)
}

/// True when a sqlx error is a SQLite UNIQUE constraint violation.
///
/// SQLite reports these under extended result codes 1555 (primary key),
/// 2067 (unique index) or the generic constraint code 19.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = err {
        db_err
            .code()
            .map_or(false, |c| c == "1555" || c == "2067" || c == "19")
    } else {
        false
    }
}

/// In-memory pool for tests. A single connection keeps every query on the
/// same private memory database.
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite pool");
    MIGRATOR.run(&pool).await.expect("migrations");
    pool
}
