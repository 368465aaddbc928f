use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use rusqlite::Connection;

use super::schema;

/// The SQLite file holding settings plus every signed-in user's tasks and
/// notes.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) a SQLite database at the provided path and
    /// enables foreign keys immediately.
    ///
    /// # Examples
    /// ```
    /// use clearmonth::services::database::Database;
    /// let db = Database::new(":memory:").unwrap();
    /// db.initialize_schema().unwrap();
    /// ```
    pub fn new(path: &str) -> Result<Self> {
        let conn =
            Connection::open(path).context(format!("Failed to open database at {}", path))?;

        conn.execute("PRAGMA foreign_keys = ON", [])
            .context("Failed to enable foreign keys")?;

        log::debug!("Opened database at {}", path);
        Ok(Self { conn })
    }

    /// Open the calendar database at `path` ready for use: missing parent
    /// directories are created and the schema is brought up to date.
    pub fn open_initialized(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data dir {}", parent.display()))?;
        }
        let path_str = path
            .to_str()
            .ok_or_else(|| anyhow!("Database path {} is not valid UTF-8", path.display()))?;

        let db = Self::new(path_str)?;
        db.initialize_schema()?;
        Ok(db)
    }

    /// Provides read/write access to the underlying `rusqlite::Connection`.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Creates tables, runs migrations, and seeds default data.
    pub fn initialize_schema(&self) -> Result<()> {
        schema::initialize_schema(self.connection())
    }
}
