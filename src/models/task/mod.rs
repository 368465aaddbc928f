// Task module
// Dated task model shared by the calendar grid, the drag engine and storage

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::date::day_span;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("Task title cannot be empty")]
    EmptyTitle,
    #[error("Task date is required")]
    MissingDate,
}

/// A task placed on one calendar day, or on a run of days when `end_date`
/// is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub text: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Create a single-day task with a temporary, timestamp-derived id.
    ///
    /// # Examples
    /// ```
    /// use clearmonth::models::task::Task;
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    /// let task = Task::new("Trip", date).unwrap();
    /// assert_eq!(task.end(), date);
    /// ```
    pub fn new(text: impl Into<String>, date: NaiveDate) -> Result<Self, TaskError> {
        let task = Self {
            id: temporary_id(),
            date,
            end_date: None,
            text: text.into(),
            details: String::new(),
            completed: false,
        };
        task.validate()?;
        Ok(task)
    }

    pub fn builder() -> TaskBuilder {
        TaskBuilder::new()
    }

    pub fn validate(&self) -> Result<(), TaskError> {
        if self.text.trim().is_empty() {
            return Err(TaskError::EmptyTitle);
        }
        Ok(())
    }

    /// Last day the task occupies; the start date when no end is set.
    pub fn end(&self) -> NaiveDate {
        self.end_date.unwrap_or(self.date)
    }

    /// Inclusive number of days between start and end.
    pub fn span_days(&self) -> i64 {
        day_span(self.date, self.end()) + 1
    }

    pub fn is_multi_day(&self) -> bool {
        self.end() != self.date
    }
}

/// Locally issued id, replaced once the store hands out a permanent one.
pub fn temporary_id() -> String {
    Utc::now().timestamp_millis().to_string()
}

/// Builder for tasks with optional fields
#[derive(Debug, Default)]
pub struct TaskBuilder {
    id: Option<String>,
    text: Option<String>,
    details: Option<String>,
    date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    completed: bool,
}

impl TaskBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    pub fn build(self) -> Result<Task, TaskError> {
        let date = self.date.ok_or(TaskError::MissingDate)?;
        let task = Task {
            id: self.id.unwrap_or_else(temporary_id),
            date,
            end_date: self.end_date,
            text: self.text.unwrap_or_default(),
            details: self.details.unwrap_or_default(),
            completed: self.completed,
        };
        task.validate()?;
        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_task_is_single_day() {
        let task = Task::new("Dentist", ymd(2024, 3, 5)).unwrap();
        assert_eq!(task.end(), ymd(2024, 3, 5));
        assert_eq!(task.span_days(), 1);
        assert!(!task.is_multi_day());
        assert!(!task.completed);
        assert!(!task.id.is_empty());
    }

    #[test]
    fn test_blank_title_is_rejected() {
        assert_eq!(
            Task::new("   ", ymd(2024, 3, 5)).unwrap_err(),
            TaskError::EmptyTitle
        );
    }

    #[test]
    fn test_builder_requires_date() {
        let result = Task::builder().text("No date").build();
        assert_eq!(result.unwrap_err(), TaskError::MissingDate);
    }

    #[test]
    fn test_builder_multi_day() {
        let task = Task::builder()
            .id("trip")
            .text("Trip")
            .details("Pack the tent")
            .date(ymd(2024, 3, 1))
            .end_date(ymd(2024, 3, 3))
            .build()
            .unwrap();

        assert_eq!(task.id, "trip");
        assert_eq!(task.span_days(), 3);
        assert!(task.is_multi_day());
    }

    #[test]
    fn test_json_shape_uses_camel_case_keys() {
        let task = Task::builder()
            .id("t1")
            .text("Trip")
            .date(ymd(2024, 3, 1))
            .end_date(ymd(2024, 3, 3))
            .build()
            .unwrap();

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["date"], "2024-03-01");
        assert_eq!(json["endDate"], "2024-03-03");
    }

    #[test]
    fn test_json_without_optional_fields() {
        let task: Task =
            serde_json::from_str(r#"{"id":"demo-1","date":"2024-03-01","text":"Hello"}"#).unwrap();
        assert_eq!(task.end_date, None);
        assert_eq!(task.details, "");
        assert!(!task.completed);
    }

    #[test]
    fn test_malformed_date_fails_to_parse() {
        let result: Result<Task, _> =
            serde_json::from_str(r#"{"id":"x","date":"2024-02-30","text":"Bad"}"#);
        assert!(result.is_err());
    }
}
