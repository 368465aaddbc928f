use chrono::{Duration, NaiveDate};

use crate::models::task::Task;
use crate::utils::date::{add_months, days_between};

/// Which header arrow a task was dropped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Prev,
    Next,
}

impl NavDirection {
    pub fn months(self) -> i32 {
        match self {
            NavDirection::Prev => -1,
            NavDirection::Next => 1,
        }
    }
}

/// Move `task` so it starts on `new_start`, keeping its length in days.
///
/// The result always carries an explicit `end_date`. Callers skip the call
/// when `new_start` is already the task's start. An end that would fall
/// outside chrono's range is clamped to the last (or first) representable
/// day.
pub fn reschedule(task: &Task, new_start: NaiveDate) -> Task {
    let delta = Duration::days(days_between(task.date, new_start));
    let end = task.end().checked_add_signed(delta).unwrap_or_else(|| {
        log::warn!(
            "Moving task {} to {} pushes its end out of range; clamping",
            task.id,
            new_start
        );
        if delta > Duration::zero() {
            NaiveDate::MAX
        } else {
            NaiveDate::MIN
        }
    });

    Task {
        date: new_start,
        end_date: Some(end),
        ..task.clone()
    }
}

/// Day 1 of the month before or after the displayed one.
pub fn nav_drop_target(displayed: NaiveDate, direction: NavDirection) -> NaiveDate {
    add_months(displayed, direction.months())
}
