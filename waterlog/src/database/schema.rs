//! Database schema and migrations
//!
//! This module handles database initialization and schema migrations.
//! Migrations are additive: a new version may add tables or indexes but
//! never drops or rewrites existing rows.

use crate::error::Result;
use sqlx::{sqlite::SqlitePool, Row};

/// Ordered list of (version, SQL) pairs
const MIGRATIONS: &[(i32, &str)] = &[
    (1, include_str!("migrations/001_drinks.sql")),
    (2, include_str!("migrations/002_settings.sql")),
];

/// Initialize database with schema
pub async fn initialize_database(pool: &SqlitePool) -> Result<()> {
    migrate_to(pool, MIGRATIONS).await
}

/// Latest schema version known to this build
pub fn latest_version() -> i32 {
    MIGRATIONS.last().map(|(version, _)| *version).unwrap_or(0)
}

/// Highest migration version applied to the database
pub async fn schema_version(pool: &SqlitePool) -> Result<i32> {
    let version: i32 = sqlx::query("SELECT COALESCE(MAX(version), 0) FROM migrations")
        .fetch_one(pool)
        .await?
        .get(0);

    Ok(version)
}

async fn migrate_to(pool: &SqlitePool, migrations: &[(i32, &str)]) -> Result<()> {
    tracing::info!("Initializing database schema");

    // Enable WAL mode for better performance and crash safety
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(pool)
        .await?;

    // Create migrations table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    let current_version = schema_version(pool).await?;

    tracing::info!("Current database version: {}", current_version);

    apply_migrations(pool, current_version, migrations).await?;

    tracing::info!("Database initialization complete");
    Ok(())
}

async fn apply_migrations(
    pool: &SqlitePool,
    current_version: i32,
    migrations: &[(i32, &str)],
) -> Result<()> {
    for &(version, sql) in migrations {
        if version > current_version {
            tracing::info!("Applying migration version {}", version);

            // Execute migration in a transaction
            let mut tx = pool.begin().await?;

            for statement in sql.split(';').filter(|s| !s.trim().is_empty()) {
                sqlx::query(statement).execute(&mut *tx).await?;
            }

            sqlx::query("INSERT INTO migrations (version) VALUES (?)")
                .bind(version)
                .execute(&mut *tx)
                .await?;

            tx.commit().await?;

            tracing::info!("Migration version {} applied successfully", version);
        }
    }

    Ok(())
}
