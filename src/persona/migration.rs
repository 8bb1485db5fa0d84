// src/persona/migration.rs
//! Ensures the personas table exists with the latest schema.
//! Run this at startup; safe to call every time (idempotent).

use anyhow::Result;
use sqlx::{Executor, SqlitePool};

/// Latest schema for personas. The CHECK backs the store-level rule that a
/// persisted name is never empty.
const CREATE_PERSONAS: &str = r#"
CREATE TABLE IF NOT EXISTS personas (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK (length(name) > 0),
    location TEXT,
    annual_income REAL,
    extras TEXT
);
"#;

/// Runs all required migrations for the SQLite backend.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    pool.execute(CREATE_PERSONAS).await?;
    Ok(())
}
