use crate::error::{Error, Result};
use sqlx::SqlitePool;
use tracing::info;

/// Create the meeting tables if they do not exist yet. Safe to run on every
/// startup.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    info!("initializing meeting store schema");

    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS meetings (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            title TEXT NOT NULL,
            summary TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS transcripts (
            id TEXT PRIMARY KEY,
            meeting_id TEXT NOT NULL REFERENCES meetings(id) ON DELETE CASCADE,
            speaker_id TEXT NOT NULL,
            speaker_name TEXT NOT NULL,
            text TEXT NOT NULL,
            order_index INTEGER NOT NULL,
            timestamp_seconds INTEGER NOT NULL
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS tasks (
            id TEXT PRIMARY KEY,
            meeting_id TEXT NOT NULL REFERENCES meetings(id) ON DELETE CASCADE,
            task TEXT NOT NULL,
            owner TEXT,
            deadline TEXT
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS speakers (
            id TEXT PRIMARY KEY,
            meeting_id TEXT NOT NULL REFERENCES meetings(id) ON DELETE CASCADE,
            default_name TEXT NOT NULL,
            custom_name TEXT NOT NULL
        )
        "#,
    ];

    for statement in statements {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| Error::storage("schema", e))?;
    }

    Ok(())
}
