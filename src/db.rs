//! Student storage. Insert-only, one table.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::errors::BotResult;
use crate::migrations;

/// Persistence boundary used by the registration form.
///
/// Implementations never fail past their own boundary: any error is logged
/// and reported as `false`.
#[async_trait]
pub trait StudentStore: Send + Sync {
    async fn add_student(&self, name: &str, age: u8, grade: &str) -> bool;
}

/// SQLite-backed student store
#[derive(Clone)]
pub struct StudentDb {
    pool: Arc<SqlitePool>,
}

impl StudentDb {
    /// Open the database (creating the file if needed) and run migrations.
    /// The bot must not start serving if this fails.
    pub async fn connect(database_url: &str) -> BotResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // Every in-memory connection is its own database
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        migrations::run_migrations(&pool).await?;

        log::info!("Database initialized at {}", database_url);

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    #[cfg(test)]
    pub fn pool(&self) -> Arc<SqlitePool> {
        self.pool.clone()
    }

    async fn insert_student(&self, name: &str, age: u8, grade: &str) -> BotResult<i64> {
        let now = Utc::now().timestamp();

        let result = sqlx::query(
            "INSERT INTO students (name, age, grade, registered_at) VALUES (?, ?, ?, ?)",
        )
        .bind(name)
        .bind(i64::from(age))
        .bind(grade)
        .bind(now)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.last_insert_rowid())
    }
}

#[async_trait]
impl StudentStore for StudentDb {
    async fn add_student(&self, name: &str, age: u8, grade: &str) -> bool {
        match self.insert_student(name, age, grade).await {
            Ok(id) => {
                log::info!(
                    "Student {} (age: {}, grade: {}) added to database with id {}",
                    name,
                    age,
                    grade,
                    id
                );
                true
            }
            Err(e) => {
                log::error!(
                    "Failed to add student {} (age: {}, grade: {}): {}",
                    name,
                    age,
                    grade,
                    e
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use sqlx::Row;
    use tempfile::TempDir;

    use super::*;

    async fn make_db() -> (TempDir, StudentDb) {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let url = format!("sqlite://{}", dir.path().join("school.db").display());
        let db = StudentDb::connect(&url).await.expect("db should open");
        (dir, db)
    }

    #[tokio::test]
    async fn connect_creates_missing_file() {
        let (dir, _db) = make_db().await;
        assert!(dir.path().join("school.db").exists());
    }

    #[tokio::test]
    async fn connect_twice_to_same_file() {
        let (dir, db) = make_db().await;
        assert!(db.add_student("Ann", 12, "7B").await);
        drop(db);

        let url = format!("sqlite://{}", dir.path().join("school.db").display());
        let db = StudentDb::connect(&url).await.expect("second open");
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students")
            .fetch_one(db.pool().as_ref())
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn add_student_stores_all_fields() {
        let (_dir, db) = make_db().await;
        let before = Utc::now().timestamp();

        assert!(db.add_student("Ann", 12, "7B").await);

        let row = sqlx::query("SELECT name, age, grade, registered_at FROM students")
            .fetch_one(db.pool().as_ref())
            .await
            .unwrap();
        assert_eq!(row.get::<String, _>("name"), "Ann");
        assert_eq!(row.get::<i64, _>("age"), 12);
        assert_eq!(row.get::<String, _>("grade"), "7B");
        assert!(row.get::<i64, _>("registered_at") >= before);
    }

    #[tokio::test]
    async fn add_student_reports_failure_instead_of_erroring() {
        let (_dir, db) = make_db().await;
        sqlx::query("DROP TABLE students")
            .execute(db.pool().as_ref())
            .await
            .unwrap();

        assert!(!db.add_student("Ann", 12, "7B").await);
    }

    #[tokio::test]
    async fn in_memory_database_keeps_rows_between_queries() {
        let db = StudentDb::connect("sqlite::memory:").await.unwrap();
        assert!(db.add_student("Bob", 15, "9A").await);
        assert!(db.add_student("Eve", 16, "10B").await);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students")
            .fetch_one(db.pool().as_ref())
            .await
            .unwrap();
        assert_eq!(count, 2);
    }
}
