//! Database migrations using sqlx built-in migration system.
//!
//! Migrations are stored in the `migrations/` directory.
//! Each migration file is named `NNNN_description.sql`.

use sqlx::SqlitePool;
use sqlx::migrate::Migrator;

use crate::errors::BotResult;

// Embed migrations at compile time
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run all pending migrations using sqlx migrate
pub async fn run_migrations(pool: &SqlitePool) -> BotResult<()> {
    handle_legacy_database(pool).await?;

    MIGRATOR.run(pool).await?;

    log::info!("Database migrations completed successfully");
    Ok(())
}

/// Databases created before the migration system already have the `students`
/// table. Migration 0001 is `IF NOT EXISTS`, so only 0002 needs to be marked
/// as applied when the column was added by hand.
async fn handle_legacy_database(pool: &SqlitePool) -> BotResult<()> {
    let has_students = table_exists(pool, "students").await;
    let has_sqlx_migrations = table_exists(pool, "_sqlx_migrations").await;

    if !has_students || has_sqlx_migrations {
        return Ok(());
    }

    log::info!("Detected legacy database. Preparing for migration...");

    if !column_exists(pool, "students", "registered_at").await {
        return Ok(());
    }

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS _sqlx_migrations (
            version BIGINT PRIMARY KEY,
            description TEXT NOT NULL,
            installed_on TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            success BOOLEAN NOT NULL,
            checksum BLOB NOT NULL,
            execution_time BIGINT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    for m in MIGRATOR.iter().take(2) {
        sqlx::query(
            "INSERT OR IGNORE INTO _sqlx_migrations (version, description, success, checksum, execution_time) VALUES (?, ?, ?, ?, ?)"
        )
        .bind(m.version)
        .bind(m.description.as_ref())
        .bind(true)
        .bind(m.checksum.as_ref())
        .bind(0i64)
        .execute(pool)
        .await?;

        log::info!("Marked migration {} as applied (legacy database)", m.description);
    }

    Ok(())
}

/// Check if a table exists in the database
async fn table_exists(pool: &SqlitePool, table: &str) -> bool {
    let result = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?",
    )
    .bind(table)
    .fetch_one(pool)
    .await;

    matches!(result, Ok(count) if count > 0)
}

/// Check if a column exists in a table
async fn column_exists(pool: &SqlitePool, table: &str, column: &str) -> bool {
    let sql = format!("SELECT COUNT(*) FROM pragma_table_info('{}') WHERE name = ?", table);
    let result = sqlx::query_scalar::<_, i64>(&sql)
        .bind(column)
        .fetch_one(pool)
        .await;

    matches!(result, Ok(count) if count > 0)
}

#[cfg(test)]
mod tests {
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;

    async fn memory_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite")
    }

    #[tokio::test]
    async fn fresh_database_gets_students_table() {
        let pool = memory_pool().await;
        run_migrations(&pool).await.unwrap();

        assert!(table_exists(&pool, "students").await);
        assert!(column_exists(&pool, "students", "registered_at").await);
    }

    #[tokio::test]
    async fn running_twice_is_a_no_op() {
        let pool = memory_pool().await;
        run_migrations(&pool).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(applied, 2);
    }

    #[tokio::test]
    async fn legacy_table_keeps_its_rows() {
        let pool = memory_pool().await;
        sqlx::query(
            "CREATE TABLE students (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL, age INTEGER, grade TEXT)",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO students (name, age, grade) VALUES ('Ann', 12, '7B')")
            .execute(&pool)
            .await
            .unwrap();

        run_migrations(&pool).await.unwrap();

        let name: String = sqlx::query_scalar("SELECT name FROM students")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(name, "Ann");
        assert!(column_exists(&pool, "students", "registered_at").await);
    }

    #[tokio::test]
    async fn legacy_table_with_column_skips_alter() {
        let pool = memory_pool().await;
        sqlx::query(
            "CREATE TABLE students (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL, age INTEGER, grade TEXT, registered_at INTEGER)",
        )
        .execute(&pool)
        .await
        .unwrap();

        run_migrations(&pool).await.unwrap();

        assert!(column_exists(&pool, "students", "registered_at").await);
    }
}
