use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{self, Error as SerdeError};

use super::{NoteStore, TaskStore};
use crate::models::note::NoteBook;
use crate::models::task::Task;

/// On-disk shape of the local backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub notes: NoteBook,
}

pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    if !path.exists() {
        return Ok(Snapshot::default());
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read tasks from {}", path.display()))?;
    let snapshot = serde_json::from_str(&data).map_err(|err| map_deser_error(err, path))?;
    Ok(snapshot)
}

pub fn save_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create dir {}", parent.display()))?;
    }

    let data = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, data)
        .with_context(|| format!("failed to write tasks to {}", path.display()))?;
    Ok(())
}

fn map_deser_error(err: SerdeError, path: &Path) -> anyhow::Error {
    anyhow::Error::new(err).context(format!(
        "failed to deserialize tasks from {}",
        path.display()
    ))
}

/// Guest backend: the whole collection lives in one JSON file, rewritten
/// after every change. Locally issued ids are kept as-is.
pub struct SnapshotStore {
    path: PathBuf,
    state: Snapshot,
}

impl SnapshotStore {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            state: load_snapshot(path)?,
        })
    }

    /// Apply `change` to a copy of the state and keep it only if the file
    /// write succeeds.
    fn commit(&mut self, change: impl FnOnce(&mut Snapshot) -> Result<()>) -> Result<()> {
        let mut next = self.state.clone();
        change(&mut next)?;
        save_snapshot(&self.path, &next)?;
        self.state = next;
        Ok(())
    }
}

impl TaskStore for SnapshotStore {
    fn list(&self) -> Result<Vec<Task>> {
        Ok(self.state.tasks.clone())
    }

    fn create(&mut self, task: &Task) -> Result<String> {
        task.validate().map_err(|e| anyhow!(e))?;
        let id = task.id.clone();
        self.commit(|state| {
            if state.tasks.iter().any(|t| t.id == task.id) {
                return Err(anyhow!("Task with id {} already exists", task.id));
            }
            state.tasks.push(task.clone());
            Ok(())
        })?;
        Ok(id)
    }

    fn update(&mut self, task: &Task) -> Result<()> {
        task.validate().map_err(|e| anyhow!(e))?;
        self.commit(|state| {
            let slot = state
                .tasks
                .iter_mut()
                .find(|t| t.id == task.id)
                .ok_or_else(|| anyhow!("Task with id {} not found", task.id))?;
            *slot = task.clone();
            Ok(())
        })
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        self.commit(|state| {
            let before = state.tasks.len();
            state.tasks.retain(|t| t.id != id);
            if state.tasks.len() == before {
                return Err(anyhow!("Task with id {} not found", id));
            }
            Ok(())
        })
    }
}

impl NoteStore for SnapshotStore {
    fn note(&self, key: &str) -> Result<String> {
        Ok(self.state.notes.get(key).to_string())
    }

    fn notes(&self) -> Result<NoteBook> {
        Ok(self.state.notes.clone())
    }

    fn set_note(&mut self, key: &str, text: &str) -> Result<()> {
        self.commit(|state| {
            state.notes.set(key, text);
            Ok(())
        })
    }
}
