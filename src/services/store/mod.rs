//! Persistence collaborators for the calendar session.
//!
//! The session only talks to the [`TaskStore`] and [`NoteStore`] traits.
//! Signed-in users get the SQLite backend scoped to their id; guests get a
//! local JSON snapshot file. Both behave identically from the session's
//! point of view.

use anyhow::Result;

use crate::config::AppPaths;
use crate::models::note::NoteBook;
use crate::models::task::Task;

mod snapshot;
mod sqlite;

pub use snapshot::{Snapshot, SnapshotStore};
pub use sqlite::SqliteStore;

pub trait TaskStore {
    /// Full collection, in creation order.
    fn list(&self) -> Result<Vec<Task>>;
    /// Persist a new task and return the id the store assigned to it.
    fn create(&mut self, task: &Task) -> Result<String>;
    fn update(&mut self, task: &Task) -> Result<()>;
    fn delete(&mut self, id: &str) -> Result<()>;
}

pub trait NoteStore {
    fn note(&self, key: &str) -> Result<String>;
    fn notes(&self) -> Result<NoteBook>;
    /// An empty `text` deletes the note.
    fn set_note(&mut self, key: &str, text: &str) -> Result<()>;
}

/// Anything that can hold both tasks and notes.
pub trait Backend: TaskStore + NoteStore {}

impl<T: TaskStore + NoteStore> Backend for T {}

/// Who is using the calendar; decides which backend is active.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Identity {
    #[default]
    Guest,
    User(String),
}

impl Identity {
    pub fn from_user(user: Option<&str>) -> Self {
        match user.map(str::trim) {
            Some(uid) if !uid.is_empty() => Identity::User(uid.to_string()),
            _ => Identity::Guest,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, Identity::User(_))
    }
}

/// Open the backend matching `identity`.
pub fn open_store(identity: &Identity, paths: &AppPaths) -> Result<Box<dyn Backend>> {
    match identity {
        Identity::Guest => {
            log::info!("Using local snapshot at {}", paths.snapshot.display());
            Ok(Box::new(SnapshotStore::open(&paths.snapshot)?))
        }
        Identity::User(uid) => {
            log::info!(
                "Using synced store at {} for user {}",
                paths.database.display(),
                uid
            );
            Ok(Box::new(SqliteStore::open(&paths.database, uid)?))
        }
    }
}
