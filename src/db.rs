//! # Note Storage
//!
//! The [`NoteRepository`] contract and its PostgreSQL implementation.
//!
//! "Not found" is reported as `Ok(None)` / `Ok(false)`; an `Err` always means
//! the storage itself failed.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::note::{Note, NoteDraft};

/// Durable CRUD for notes
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Store a new note and return its assigned identifier
    async fn create(&self, draft: NoteDraft) -> Result<String>;

    /// All notes of an owner, newest first
    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Note>>;

    /// Look a note up by identifier
    async fn get_by_id(&self, id: &str) -> Result<Option<Note>>;

    /// Replace the text of a note; `false` when no such note exists
    async fn update_text(&self, id: &str, new_text: &str) -> Result<bool>;

    /// Remove a note; `false` when no such note exists
    async fn delete_by_id(&self, id: &str) -> Result<bool>;
}

/// Generate a fresh note identifier
pub fn new_note_id() -> String {
    Uuid::new_v4().to_string()
}

/// Initialize the database schema
pub async fn init_database_schema(pool: &PgPool) -> Result<()> {
    info!("Initializing database schema...");

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS notes (
            id TEXT PRIMARY KEY,
            owner_id BIGINT NOT NULL,
            text TEXT NOT NULL,
            photo_id TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            seq BIGSERIAL
        )",
    )
    .execute(pool)
    .await
    .context("Failed to create notes table")?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS notes_owner_created_idx
         ON notes (owner_id, created_at DESC)",
    )
    .execute(pool)
    .await
    .context("Failed to create notes owner index")?;

    info!("Database schema initialized successfully");
    Ok(())
}

#[derive(sqlx::FromRow)]
struct NoteRow {
    id: String,
    owner_id: i64,
    text: String,
    photo_id: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<NoteRow> for Note {
    fn from(row: NoteRow) -> Self {
        Note {
            id: row.id,
            text: row.text,
            owner_id: row.owner_id,
            created_at: row.created_at,
            photo_id: row.photo_id,
        }
    }
}

/// PostgreSQL-backed repository
#[derive(Debug, Clone)]
pub struct PgNoteRepository {
    pool: PgPool,
}

impl PgNoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url` and make sure the schema exists
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        init_database_schema(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn create(&self, draft: NoteDraft) -> Result<String> {
        debug!(owner_id = draft.owner_id, "Creating new note");

        let id = new_note_id();
        sqlx::query(
            "INSERT INTO notes (id, owner_id, text, photo_id, created_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&id)
        .bind(draft.owner_id)
        .bind(&draft.text)
        .bind(&draft.photo_id)
        .bind(draft.created_at)
        .execute(&self.pool)
        .await
        .context("Failed to insert new note")?;

        info!(note_id = %id, owner_id = draft.owner_id, "Note created");
        Ok(id)
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Note>> {
        let rows = sqlx::query_as::<_, NoteRow>(
            "SELECT id, owner_id, text, photo_id, created_at
             FROM notes
             WHERE owner_id = $1
             ORDER BY created_at DESC, seq DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list notes")?;

        debug!(owner_id, count = rows.len(), "Listed notes");
        Ok(rows.into_iter().map(Note::from).collect())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Note>> {
        let row = sqlx::query_as::<_, NoteRow>(
            "SELECT id, owner_id, text, photo_id, created_at FROM notes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to read note")?;

        if row.is_none() {
            debug!(note_id = %id, "No note found");
        }
        Ok(row.map(Note::from))
    }

    async fn update_text(&self, id: &str, new_text: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE notes SET text = $1 WHERE id = $2")
            .bind(new_text)
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to update note")?;

        let updated = result.rows_affected() > 0;
        if updated {
            info!(note_id = %id, "Note updated");
        } else {
            debug!(note_id = %id, "No note to update");
        }
        Ok(updated)
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete note")?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(note_id = %id, "Note deleted");
        } else {
            debug!(note_id = %id, "No note to delete");
        }
        Ok(deleted)
    }
}
