use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::models::task::Task;
use crate::utils::date::{day_span, parse_date_key};

/// Longest span, in days, a task may cover before it is treated as bogus.
pub const MAX_SPAN_DAYS: i64 = 365;

/// One day's slice of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub task: Task,
    pub is_multi_day: bool,
    /// `"(i/N)"` for multi-day tasks.
    pub day_label: Option<String>,
}

/// Why a task was left out of, or reshaped in, the mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanIssue {
    pub task_id: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Date to the tasks occupying it, in collection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Occupancy {
    days: BTreeMap<NaiveDate, Vec<Occurrence>>,
    /// Tasks spanning more than [`MAX_SPAN_DAYS`]; not mapped at all.
    pub skipped: Vec<SpanIssue>,
    /// Tasks whose end precedes their start; mapped on their start day only.
    pub normalized: Vec<SpanIssue>,
}

impl Occupancy {
    pub fn on(&self, date: NaiveDate) -> &[Occurrence] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Lookup by `YYYY-MM-DD`; unparsable keys have no tasks.
    pub fn on_key(&self, key: &str) -> &[Occurrence] {
        match parse_date_key(key) {
            Ok(date) => self.on(date),
            Err(_) => &[],
        }
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &[Occurrence])> {
        self.days.iter().map(|(date, list)| (*date, list.as_slice()))
    }

    /// Number of occupied days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Expand every task across each day of its `[date, end]` span.
pub fn build_occupancy(tasks: &[Task]) -> Occupancy {
    let mut occupancy = Occupancy::default();

    for task in tasks {
        let start = task.date;
        let mut end = task.end();

        if end < start {
            log::warn!(
                "Task {} ends ({}) before it starts ({}); showing it on its start day",
                task.id,
                end,
                start
            );
            occupancy.normalized.push(SpanIssue {
                task_id: task.id.clone(),
                start,
                end,
            });
            end = start;
        }

        let total = day_span(start, end) + 1;
        if total > MAX_SPAN_DAYS {
            log::warn!(
                "Skipping task {}: spans {} days ({} to {})",
                task.id,
                total,
                start,
                end
            );
            occupancy.skipped.push(SpanIssue {
                task_id: task.id.clone(),
                start,
                end,
            });
            continue;
        }

        let is_multi_day = total > 1;
        for index in 0..total {
            let day = start + Duration::days(index);
            let day_label = is_multi_day.then(|| format!("({}/{})", index + 1, total));
            occupancy.days.entry(day).or_default().push(Occurrence {
                task: task.clone(),
                is_multi_day,
                day_label,
            });
        }
    }

    occupancy
}

/// Memoized [`build_occupancy`], keyed on the collection's version counter.
#[derive(Debug, Default)]
pub struct OccupancyCache {
    version: Option<u64>,
    occupancy: Occupancy,
}

impl OccupancyCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, version: u64, tasks: &[Task]) -> &Occupancy {
        if self.version != Some(version) {
            self.occupancy = build_occupancy(tasks);
            self.version = Some(version);
        }
        &self.occupancy
    }

    pub fn invalidate(&mut self) {
        self.version = None;
    }
}
