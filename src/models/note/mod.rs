// Note module
// Free-text sticky notes attached to a week or a month

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::utils::date::{date_key, monday_week_of};

/// Which block a note belongs to. Both variants key on a date: the Monday
/// of the week, or the 1st of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteKey {
    Week(NaiveDate),
    Month(NaiveDate),
}

impl NoteKey {
    pub fn week_of(date: NaiveDate) -> Self {
        NoteKey::Week(monday_week_of(date)[0])
    }

    pub fn month_of(date: NaiveDate) -> Self {
        NoteKey::Month(date.with_day(1).unwrap_or(date))
    }

    pub fn date(&self) -> NaiveDate {
        match *self {
            NoteKey::Week(date) | NoteKey::Month(date) => date,
        }
    }

    pub fn key(&self) -> String {
        date_key(self.date())
    }
}

impl fmt::Display for NoteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Date-key to note text. A missing entry reads as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteBook {
    entries: BTreeMap<String, String>,
}

impl NoteBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> &str {
        self.entries.get(key).map(String::as_str).unwrap_or("")
    }

    /// Store `text` under `key`; an empty string removes the entry.
    pub fn set(&mut self, key: impl Into<String>, text: impl Into<String>) -> Option<String> {
        let key = key.into();
        let text = text.into();
        if text.is_empty() {
            self.entries.remove(&key)
        } else {
            self.entries.insert(key, text)
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
