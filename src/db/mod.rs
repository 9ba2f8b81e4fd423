//! # Database Module
//!
//! Opens the application's single long-lived database connection.
//!
//! The pool is capped at one connection that is never recycled, so an
//! in-memory database (`sqlite::memory:`) keeps its contents for the
//! lifetime of the process. Retries are whatever the driver provides.

use crate::error::AppResult;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

/// Connect to the database at `database_url`
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    options().connect(database_url).await
}

/// Like [`connect`], but the connection is opened on first use
#[cfg(test)]
pub fn connect_lazy(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    options().connect_lazy(database_url)
}

fn options() -> SqlitePoolOptions {
    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
}

/// Round-trip a trivial query to prove the connection is alive
pub async fn ping(pool: &SqlitePool) -> AppResult<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ping_succeeds_on_open_connection() {
        let pool = connect("sqlite::memory:").await.unwrap();
        assert!(ping(&pool).await.is_ok());
    }

    #[tokio::test]
    async fn ping_fails_once_closed() {
        let pool = connect_lazy("sqlite::memory:").unwrap();
        pool.close().await;
        assert!(ping(&pool).await.is_err());
    }

    #[tokio::test]
    async fn in_memory_data_survives_across_queries() {
        let pool = connect("sqlite::memory:").await.unwrap();
        sqlx::query("CREATE TABLE notes (body TEXT)").execute(&pool).await.unwrap();
        sqlx::query("INSERT INTO notes (body) VALUES ('hi')").execute(&pool).await.unwrap();

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM notes")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
