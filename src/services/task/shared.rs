use chrono::NaiveDate;
use rusqlite::{self, types::Type, Result, Row};

use crate::models::task::Task;
use crate::utils::date::parse_date_key;

pub(crate) const TASK_COLUMNS: &str = "id, date, end_date, text, details, completed";

/// Store ids are SQLite row ids; anything else cannot exist in the table.
pub(crate) fn parse_id(id: &str) -> Option<i64> {
    id.parse().ok()
}

pub(crate) fn map_task_row(row: &Row<'_>) -> Result<Task> {
    let end_date = match row.get::<_, Option<String>>(2)? {
        Some(value) => Some(to_naive_date(2, &value)?),
        None => None,
    };

    Ok(Task {
        id: row.get::<_, i64>(0)?.to_string(),
        date: to_naive_date(1, &row.get::<_, String>(1)?)?,
        end_date,
        text: row.get(3)?,
        details: row.get(4)?,
        completed: row.get::<_, i32>(5)? != 0,
    })
}

fn to_naive_date(column: usize, value: &str) -> Result<NaiveDate> {
    parse_date_key(value)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, e.into()))
}
