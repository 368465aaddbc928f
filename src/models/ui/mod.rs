// UI models module
// View selection and the displayed/selected date cursor

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};

use crate::utils::date::add_months;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewType {
    #[default]
    Month,
    Week,
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewType::Month => f.write_str("Month"),
            ViewType::Week => f.write_str("Week"),
        }
    }
}

impl FromStr for ViewType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Month" => Ok(ViewType::Month),
            "Week" => Ok(ViewType::Week),
            other => Err(format!("Unknown view '{}'", other)),
        }
    }
}

/// What the calendar is showing and which day drives the detail panel.
///
/// `displayed` is any day inside the displayed month or week; month views
/// only read its year and month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCursor {
    pub view: ViewType,
    pub displayed: NaiveDate,
    pub selected: NaiveDate,
}

impl CalendarCursor {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            view: ViewType::Month,
            displayed: today,
            selected: today,
        }
    }

    pub fn year(&self) -> i32 {
        self.displayed.year()
    }

    /// 0-based month of the displayed date.
    pub fn month0(&self) -> i32 {
        self.displayed.month0() as i32
    }

    pub fn next_month(&mut self) {
        self.displayed = add_months(self.displayed, 1);
    }

    pub fn prev_month(&mut self) {
        self.displayed = add_months(self.displayed, -1);
    }

    pub fn next_week(&mut self) {
        self.displayed += Duration::days(7);
    }

    pub fn prev_week(&mut self) {
        self.displayed -= Duration::days(7);
    }

    /// Step forward by one unit of the active view.
    pub fn next(&mut self) {
        match self.view {
            ViewType::Month => self.next_month(),
            ViewType::Week => self.next_week(),
        }
    }

    pub fn prev(&mut self) {
        match self.view {
            ViewType::Month => self.prev_month(),
            ViewType::Week => self.prev_week(),
        }
    }

    pub fn go_to_today(&mut self, today: NaiveDate) {
        self.displayed = today;
        self.selected = today;
    }

    /// Month picker: jump to the 1st of the given month.
    pub fn jump_to_month(&mut self, year: i32, month0: i32) {
        self.displayed = crate::utils::date::first_of_month(year, month0);
    }

    pub fn select(&mut self, date: NaiveDate) {
        self.selected = date;
    }
}
