use super::shared::{map_task_row, TASK_COLUMNS};
use super::TaskService;
use crate::models::task::Task;
use anyhow::Result;

impl<'a> TaskService<'a> {
    /// Every task of the owner, in creation order.
    pub fn list_all(&self) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE owner = ? ORDER BY id ASC"
        ))?;

        let tasks = stmt
            .query_map([self.owner], map_task_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(tasks)
    }
}
