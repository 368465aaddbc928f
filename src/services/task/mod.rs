//! Task persistence entry point.
//! SQLite-backed CRUD and range queries for one owner's tasks, split across
//! focused submodules.

use rusqlite::Connection;

pub mod crud;
pub mod queries;
mod shared;

/// Service for managing one owner's tasks stored in SQLite.
pub struct TaskService<'a> {
    pub(crate) conn: &'a Connection,
    pub(crate) owner: &'a str,
}

impl<'a> TaskService<'a> {
    /// Create a new TaskService scoped to `owner`.
    pub fn new(conn: &'a Connection, owner: &'a str) -> Self {
        Self { conn, owner }
    }
}
