use super::shared::{map_task_row, parse_id, TASK_COLUMNS};
use super::TaskService;
use crate::models::task::Task;
use crate::utils::date::date_key;
use anyhow::{anyhow, Context, Result};
use chrono::Local;
use rusqlite::{self, params};

impl<'a> TaskService<'a> {
    /// Insert a task; the returned copy carries the database-issued id.
    pub fn create(&self, mut task: Task) -> Result<Task> {
        task.validate().map_err(|e| anyhow!(e))?;

        let now = Local::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO tasks (
                    owner, date, end_date, text, details, completed, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    self.owner,
                    date_key(task.date),
                    task.end_date.map(date_key),
                    task.text,
                    task.details,
                    task.completed as i32,
                    &now,
                    &now,
                ],
            )
            .context("Failed to insert task")?;

        task.id = self.conn.last_insert_rowid().to_string();
        Ok(task)
    }

    /// Retrieve a task by id.
    pub fn get(&self, id: &str) -> Result<Option<Task>> {
        let Some(row_id) = parse_id(id) else {
            return Ok(None);
        };

        let result = self.conn.query_row(
            &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ? AND owner = ?"),
            params![row_id, self.owner],
            map_task_row,
        );

        match result {
            Ok(task) => Ok(Some(task)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Update every field of an existing task.
    pub fn update(&self, task: &Task) -> Result<()> {
        let row_id =
            parse_id(&task.id).ok_or_else(|| anyhow!("Task with id {} not found", task.id))?;
        task.validate().map_err(|e| anyhow!(e))?;

        let rows_affected = self
            .conn
            .execute(
                "UPDATE tasks SET
                    date = ?, end_date = ?, text = ?, details = ?, completed = ?, updated_at = ?
                 WHERE id = ? AND owner = ?",
                params![
                    date_key(task.date),
                    task.end_date.map(date_key),
                    task.text,
                    task.details,
                    task.completed as i32,
                    Local::now().to_rfc3339(),
                    row_id,
                    self.owner,
                ],
            )
            .context("Failed to update task")?;

        if rows_affected == 0 {
            return Err(anyhow!("Task with id {} not found", task.id));
        }

        Ok(())
    }

    /// Delete a task by id.
    pub fn delete(&self, id: &str) -> Result<()> {
        let row_id = parse_id(id).ok_or_else(|| anyhow!("Task with id {} not found", id))?;
        let rows_affected = self
            .conn
            .execute(
                "DELETE FROM tasks WHERE id = ? AND owner = ?",
                params![row_id, self.owner],
            )
            .context("Failed to delete task")?;

        if rows_affected == 0 {
            return Err(anyhow!("Task with id {} not found", id));
        }

        Ok(())
    }
}
