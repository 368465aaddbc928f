use std::path::Path;

use anyhow::Result;

use super::{NoteStore, TaskStore};
use crate::models::note::NoteBook;
use crate::models::task::Task;
use crate::services::database::Database;
use crate::services::note::NoteService;
use crate::services::task::TaskService;

/// Synced backend: one SQLite database shared by every user, rows scoped
/// by owner.
pub struct SqliteStore {
    db: Database,
    owner: String,
}

impl SqliteStore {
    pub fn open(path: &Path, owner: &str) -> Result<Self> {
        let db = Database::open_initialized(path)?;
        Ok(Self::with_database(db, owner))
    }

    pub fn with_database(db: Database, owner: &str) -> Self {
        Self {
            db,
            owner: owner.to_string(),
        }
    }

    fn tasks(&self) -> TaskService<'_> {
        TaskService::new(self.db.connection(), &self.owner)
    }

    fn notes_service(&self) -> NoteService<'_> {
        NoteService::new(self.db.connection(), &self.owner)
    }
}

impl TaskStore for SqliteStore {
    fn list(&self) -> Result<Vec<Task>> {
        self.tasks().list_all()
    }

    fn create(&mut self, task: &Task) -> Result<String> {
        Ok(self.tasks().create(task.clone())?.id)
    }

    fn update(&mut self, task: &Task) -> Result<()> {
        self.tasks().update(task)
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        self.tasks().delete(id)
    }
}

impl NoteStore for SqliteStore {
    fn note(&self, key: &str) -> Result<String> {
        self.notes_service().get(key)
    }

    fn notes(&self) -> Result<NoteBook> {
        self.notes_service().all()
    }

    fn set_note(&mut self, key: &str, text: &str) -> Result<()> {
        self.notes_service().set(key, text)
    }
}
