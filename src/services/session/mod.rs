//! Calendar session: the single owner of the task collection.
//!
//! Every mutation is applied to the in-memory collection first and then
//! mirrored to the active [`Backend`]. When the backend refuses, the
//! in-memory change is rolled back before the error is returned, so the
//! caller only has to show it.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::note::{NoteBook, NoteKey};
use crate::models::settings::Settings;
use crate::models::task::{temporary_id, Task};
use crate::models::ui::{CalendarCursor, ViewType};
use crate::services::calendar::{
    build_month_grid, build_week, nav_drop_target, reschedule, DragState, MonthGrid,
    NavDirection, Occupancy, OccupancyCache, Occurrence, WeekGrid,
};
use crate::services::store::Backend;

/// A backend write failed; the in-memory change has already been undone.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Failed to save task \"{title}\": {cause:#}")]
    Create { title: String, cause: anyhow::Error },
    #[error("Failed to update task {id}: {cause:#}")]
    Update { id: String, cause: anyhow::Error },
    #[error("Failed to delete task {id}: {cause:#}")]
    Delete { id: String, cause: anyhow::Error },
    #[error("Failed to save note {key}: {cause:#}")]
    Note { key: String, cause: anyhow::Error },
    #[error("Task {0} not found")]
    NotFound(String),
}

/// Fields the add/edit form submits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub text: String,
    pub details: String,
    pub date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

pub struct CalendarSession {
    tasks: Vec<Task>,
    version: u64,
    notes: NoteBook,
    cache: OccupancyCache,
    store: Box<dyn Backend>,
    pub cursor: CalendarCursor,
    pub settings: Settings,
    pub drag: DragState,
}

impl CalendarSession {
    /// Empty session on top of `store`, displaying `today`.
    pub fn new(store: Box<dyn Backend>, today: NaiveDate) -> Self {
        Self {
            tasks: Vec::new(),
            version: 0,
            notes: NoteBook::new(),
            cache: OccupancyCache::new(),
            store,
            cursor: CalendarCursor::new(today),
            settings: Settings::default(),
            drag: DragState::default(),
        }
    }

    /// Session preloaded with everything the store holds.
    pub fn load(store: Box<dyn Backend>, today: NaiveDate) -> anyhow::Result<Self> {
        let mut session = Self::new(store, today);
        let tasks = session.store.list()?;
        session.notes = session.store.notes()?;
        log::info!(
            "Loaded {} tasks and {} notes",
            tasks.len(),
            session.notes.len()
        );
        session.apply_snapshot(tasks);
        Ok(session)
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.cursor.view = settings.view().unwrap_or_default();
        self.settings = settings;
        self
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Bumped on every change to the collection.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn occupancy(&mut self) -> &Occupancy {
        self.cache.get(self.version, &self.tasks)
    }

    pub fn tasks_on(&mut self, date: NaiveDate) -> &[Occurrence] {
        self.occupancy().on(date)
    }

    pub fn month_grid(&self) -> MonthGrid {
        build_month_grid(self.cursor.year(), self.cursor.month0())
    }

    pub fn week(&self) -> WeekGrid {
        build_week(self.cursor.displayed)
    }

    pub fn set_view(&mut self, view: ViewType) {
        self.cursor.view = view;
        self.settings.current_view = view.to_string();
    }

    /// Replace the whole collection with a feed snapshot.
    pub fn apply_snapshot(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.touch();
    }

    /// Swap a temporary id for the permanent one without moving the task.
    pub fn remap_id(&mut self, temporary: &str, permanent: &str) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == temporary) {
            Some(task) => {
                task.id = permanent.to_string();
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Create a task from the form. A blank title is ignored and yields
    /// `Ok(None)`; otherwise the store-issued id is returned.
    pub fn add_task(&mut self, draft: TaskDraft) -> Result<Option<String>, SyncError> {
        if draft.text.trim().is_empty() {
            return Ok(None);
        }

        let temp_id = self.fresh_temp_id();
        let task = Task {
            id: temp_id.clone(),
            date: draft.date.unwrap_or(self.cursor.selected),
            end_date: draft.end_date,
            text: draft.text,
            details: draft.details,
            completed: false,
        };

        self.tasks.push(task);
        self.touch();

        let created = self.store.create(&self.tasks[self.tasks.len() - 1]);
        match created {
            Ok(id) => {
                if id != temp_id {
                    self.remap_id(&temp_id, &id);
                }
                log::info!("Created task {}", id);
                Ok(Some(id))
            }
            Err(cause) => {
                let position = self.position(&temp_id);
                let task = position.map(|index| self.tasks.remove(index));
                self.touch();
                log::error!("Failed to create task, rolled back: {:#}", cause);
                Err(SyncError::Create {
                    title: task.map(|t| t.text).unwrap_or_default(),
                    cause,
                })
            }
        }
    }

    /// Save an edited task. A blank title is ignored and yields `Ok(false)`.
    pub fn update_task(&mut self, task: Task) -> Result<bool, SyncError> {
        if task.validate().is_err() {
            return Ok(false);
        }
        self.commit_update(task)?;
        Ok(true)
    }

    /// Flip the completion checkbox; returns the new state.
    pub fn toggle_completed(&mut self, id: &str) -> Result<bool, SyncError> {
        let mut task = self
            .task(id)
            .cloned()
            .ok_or_else(|| SyncError::NotFound(id.to_string()))?;
        task.completed = !task.completed;
        let completed = task.completed;
        self.commit_update(task)?;
        Ok(completed)
    }

    pub fn delete_task(&mut self, id: &str) -> Result<(), SyncError> {
        let index = self
            .position(id)
            .ok_or_else(|| SyncError::NotFound(id.to_string()))?;
        let removed = self.tasks.remove(index);
        self.touch();

        if let Err(cause) = self.store.delete(id) {
            self.tasks.insert(index, removed);
            self.touch();
            log::error!("Failed to delete task {}, rolled back: {:#}", id, cause);
            return Err(SyncError::Delete {
                id: id.to_string(),
                cause,
            });
        }

        log::info!("Deleted task {}", id);
        Ok(())
    }

    /// Move a task to start on `new_start`, keeping its length. Returns
    /// `false` without touching anything when it already starts there.
    pub fn reschedule_task(&mut self, id: &str, new_start: NaiveDate) -> Result<bool, SyncError> {
        Ok(self.move_task(id, new_start)?.is_some())
    }

    pub fn begin_drag(&mut self, id: &str) -> Result<(), SyncError> {
        let task = self
            .task(id)
            .cloned()
            .ok_or_else(|| SyncError::NotFound(id.to_string()))?;
        self.drag.begin(&task);
        Ok(())
    }

    pub fn hover_drag(&mut self, date: NaiveDate) {
        self.drag.hover(date);
    }

    /// Drop the dragged task on a day cell. Returns the moved task, or
    /// `None` when nothing was dragged or it already starts on `target`.
    pub fn finish_drag(&mut self, target: NaiveDate) -> Result<Option<Task>, SyncError> {
        match self.drag.drop_on(target) {
            Some(request) => self.move_task(&request.task_id, request.target),
            None => Ok(None),
        }
    }

    /// Drop the dragged task on a month arrow. The view moves to that month
    /// whether or not the task needed to move.
    pub fn finish_drag_on_nav(
        &mut self,
        direction: NavDirection,
    ) -> Result<Option<Task>, SyncError> {
        let dropped = self.drag.drop_on_nav(self.cursor.displayed, direction);
        self.cursor.displayed = nav_drop_target(self.cursor.displayed, direction);

        match dropped {
            Some(request) => self.move_task(&request.task_id, request.target),
            None => Ok(None),
        }
    }

    /// Drag `id` and drop it on `target` in one step.
    pub fn drop_task(&mut self, id: &str, target: NaiveDate) -> Result<Option<Task>, SyncError> {
        self.begin_drag(id)?;
        self.finish_drag(target)
    }

    /// Drag `id` and drop it on a month arrow in one step.
    pub fn drop_task_on_nav(
        &mut self,
        id: &str,
        direction: NavDirection,
    ) -> Result<Option<Task>, SyncError> {
        self.begin_drag(id)?;
        self.finish_drag_on_nav(direction)
    }

    pub fn note(&self, key: NoteKey) -> &str {
        self.notes.get(&key.key())
    }

    pub fn notes(&self) -> &NoteBook {
        &self.notes
    }

    pub fn set_note(&mut self, key: NoteKey, text: &str) -> Result<(), SyncError> {
        let key = key.key();
        let previous = self.notes.set(key.clone(), text);

        if let Err(cause) = self.store.set_note(&key, text) {
            self.notes.set(key.clone(), previous.unwrap_or_default());
            log::error!("Failed to save note {}, rolled back: {:#}", key, cause);
            return Err(SyncError::Note { key, cause });
        }

        Ok(())
    }

    fn commit_update(&mut self, task: Task) -> Result<(), SyncError> {
        let index = self
            .position(&task.id)
            .ok_or_else(|| SyncError::NotFound(task.id.clone()))?;
        let previous = std::mem::replace(&mut self.tasks[index], task);
        self.touch();

        if let Err(cause) = self.store.update(&self.tasks[index]) {
            let id = previous.id.clone();
            self.tasks[index] = previous;
            self.touch();
            log::error!("Failed to update task {}, rolled back: {:#}", id, cause);
            return Err(SyncError::Update { id, cause });
        }

        log::debug!("Updated task {}", self.tasks[index].id);
        Ok(())
    }

    /// Reschedule the current copy of `id`; only its dates change.
    fn move_task(&mut self, id: &str, new_start: NaiveDate) -> Result<Option<Task>, SyncError> {
        let task = self
            .task(id)
            .ok_or_else(|| SyncError::NotFound(id.to_string()))?;
        if task.date == new_start {
            return Ok(None);
        }
        let moved = reschedule(task, new_start);
        self.commit_update(moved.clone())?;
        Ok(Some(moved))
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    fn fresh_temp_id(&self) -> String {
        let mut id = temporary_id();
        while self.position(&id).is_some() {
            let next = id.parse::<i64>().map(|n| n + 1).unwrap_or_default();
            id = next.to_string();
        }
        id
    }

    fn touch(&mut self) {
        self.version += 1;
    }
}
