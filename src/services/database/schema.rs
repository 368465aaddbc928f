use anyhow::{Context, Result};
use rusqlite::Connection;

use super::migrations;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_settings_table(conn)?;
    run_settings_migrations(conn)?;
    insert_default_settings(conn)?;
    create_tasks_table(conn)?;
    run_tasks_migrations(conn)?;
    create_notes_table(conn)?;
    Ok(())
}

fn create_settings_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            theme TEXT NOT NULL DEFAULT 'orange',
            language TEXT NOT NULL DEFAULT 'zh',
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create settings table")?;

    Ok(())
}

fn run_settings_migrations(conn: &Connection) -> Result<()> {
    migrations::ensure_column(
        conn,
        "settings",
        "current_view",
        "ALTER TABLE settings ADD COLUMN current_view TEXT NOT NULL DEFAULT 'Month'",
    )
}

fn insert_default_settings(conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO settings (id, theme, language, current_view)
         VALUES (1, 'orange', 'zh', 'Month')",
        [],
    )
    .context("Failed to insert default settings")?;

    Ok(())
}

fn create_tasks_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner TEXT NOT NULL,
            date TEXT NOT NULL,
            text TEXT NOT NULL,
            details TEXT NOT NULL DEFAULT '',
            completed INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create tasks table")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_tasks_owner ON tasks (owner)",
        [],
    )
    .context("Failed to create tasks owner index")?;

    Ok(())
}

fn run_tasks_migrations(conn: &Connection) -> Result<()> {
    // Multi-day tasks arrived after the first schema
    migrations::ensure_column(
        conn,
        "tasks",
        "end_date",
        "ALTER TABLE tasks ADD COLUMN end_date TEXT",
    )
}

fn create_notes_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS notes (
            owner TEXT NOT NULL,
            note_key TEXT NOT NULL,
            text TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            PRIMARY KEY (owner, note_key)
        )",
        [],
    )
    .context("Failed to create notes table")?;

    Ok(())
}
