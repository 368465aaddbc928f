use chrono::{Datelike, Duration, NaiveDate};

use crate::models::note::NoteKey;
use crate::utils::date::{
    date_key, days_in_month, first_of_month, first_weekday_offset, monday_week_of,
};

/// One cell of a Monday-first month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Blank,
    Day {
        day: u32,
        date: NaiveDate,
        key: String,
    },
    /// Monthly notes block standing in for a whole run of blank cells.
    NotesSlot { span: u32 },
}

impl Cell {
    /// Columns the cell occupies.
    pub fn span(&self) -> u32 {
        match self {
            Cell::NotesSlot { span } => *span,
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotesSide {
    Leading,
    Trailing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month0: i32,
    pub leading_blanks: u32,
    pub trailing_blanks: u32,
    pub cells: Vec<Cell>,
}

impl MonthGrid {
    /// Total columns covered, counting a notes slot by its span.
    pub fn column_count(&self) -> u32 {
        self.cells.iter().map(Cell::span).sum()
    }

    pub fn week_count(&self) -> u32 {
        self.column_count() / 7
    }

    pub fn notes_side(&self) -> Option<NotesSide> {
        match (self.cells.first(), self.cells.last()) {
            (Some(Cell::NotesSlot { .. }), _) => Some(NotesSide::Leading),
            (_, Some(Cell::NotesSlot { .. })) => Some(NotesSide::Trailing),
            _ => None,
        }
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.cells.iter().filter_map(|cell| match cell {
            Cell::Day { date, .. } => Some(*date),
            _ => None,
        })
    }

    /// Key the monthly notes block reads and writes.
    pub fn notes_key(&self) -> NoteKey {
        NoteKey::Month(first_of_month(self.year, self.month0))
    }
}

/// Lay out a month as whole weeks, folding the larger blank run into a
/// single notes slot (leading wins ties).
pub fn build_month_grid(year: i32, month0: i32) -> MonthGrid {
    let first = first_of_month(year, month0);
    // Normalized so a month0 outside 0..12 still describes a real month
    let (year, month0) = (first.year(), first.month0() as i32);

    let leading = first_weekday_offset(year, month0);
    let day_count = days_in_month(year, month0);
    let trailing = (7 - (leading + day_count) % 7) % 7;

    let notes_side = if leading > 0 && leading >= trailing {
        Some(NotesSide::Leading)
    } else if trailing > 0 {
        Some(NotesSide::Trailing)
    } else {
        None
    };

    let mut cells = Vec::with_capacity((leading + day_count + trailing) as usize);

    if notes_side == Some(NotesSide::Leading) {
        cells.push(Cell::NotesSlot { span: leading });
    } else {
        cells.extend((0..leading).map(|_| Cell::Blank));
    }

    cells.extend((1..=day_count).map(|day| {
        let date = first + Duration::days(day as i64 - 1);
        Cell::Day {
            day,
            date,
            key: date_key(date),
        }
    }));

    if notes_side == Some(NotesSide::Trailing) {
        cells.push(Cell::NotesSlot { span: trailing });
    } else {
        cells.extend((0..trailing).map(|_| Cell::Blank));
    }

    MonthGrid {
        year,
        month0,
        leading_blanks: leading,
        trailing_blanks: trailing,
        cells,
    }
}

/// The seven days of a week view plus its notes key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekGrid {
    pub days: [NaiveDate; 7],
}

impl WeekGrid {
    pub fn monday(&self) -> NaiveDate {
        self.days[0]
    }

    pub fn notes_key(&self) -> NoteKey {
        NoteKey::Week(self.monday())
    }

    pub fn keys(&self) -> [String; 7] {
        self.days.map(date_key)
    }
}

pub fn build_week(date: NaiveDate) -> WeekGrid {
    WeekGrid {
        days: monday_week_of(date),
    }
}
