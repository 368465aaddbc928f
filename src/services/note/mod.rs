//! Sticky-note persistence: one text blob per (owner, date key).

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::note::NoteBook;

pub struct NoteService<'a> {
    conn: &'a Connection,
    owner: &'a str,
}

impl<'a> NoteService<'a> {
    pub fn new(conn: &'a Connection, owner: &'a str) -> Self {
        Self { conn, owner }
    }

    /// Note text for `key`, empty when none was written.
    pub fn get(&self, key: &str) -> Result<String> {
        let text = self
            .conn
            .query_row(
                "SELECT text FROM notes WHERE owner = ? AND note_key = ?",
                params![self.owner, key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .with_context(|| format!("Failed to load note {}", key))?;

        Ok(text.unwrap_or_default())
    }

    /// Write `text` under `key`; an empty string deletes the note.
    pub fn set(&self, key: &str, text: &str) -> Result<()> {
        if text.is_empty() {
            self.conn
                .execute(
                    "DELETE FROM notes WHERE owner = ? AND note_key = ?",
                    params![self.owner, key],
                )
                .with_context(|| format!("Failed to clear note {}", key))?;
            return Ok(());
        }

        self.conn
            .execute(
                "INSERT INTO notes (owner, note_key, text, updated_at)
                 VALUES (?1, ?2, ?3, CURRENT_TIMESTAMP)
                 ON CONFLICT (owner, note_key)
                 DO UPDATE SET text = excluded.text, updated_at = CURRENT_TIMESTAMP",
                params![self.owner, key, text],
            )
            .with_context(|| format!("Failed to save note {}", key))?;

        Ok(())
    }

    /// Every note of the owner.
    pub fn all(&self) -> Result<NoteBook> {
        let mut stmt = self
            .conn
            .prepare("SELECT note_key, text FROM notes WHERE owner = ? ORDER BY note_key")?;

        let rows = stmt
            .query_map([self.owner], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut book = NoteBook::new();
        for (key, text) in rows {
            book.set(key, text);
        }
        Ok(book)
    }
}
