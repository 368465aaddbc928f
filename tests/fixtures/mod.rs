// Test fixtures - reusable test data
// Provides consistent tasks and dates across the integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use clearmonth::models::task::Task;

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Feb 29, 2024 (leap day)
    pub fn leap_day_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    }

    /// Mar 1, 2024, a Friday
    pub fn march_1_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    /// Dec 31, 2025 (New Year's Eve)
    pub fn new_years_eve_2025() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()
    }
}

/// Sample tasks for testing
pub mod tasks {
    use super::*;

    /// Single-day task on Mar 1, 2024
    pub fn dentist() -> Task {
        Task::builder()
            .id("dentist")
            .text("Dentist")
            .details("Bring the insurance card")
            .date(dates::march_1_2024())
            .build()
            .unwrap()
    }

    /// Three-day task from Feb 29 to Mar 2, 2024
    pub fn ski_trip() -> Task {
        Task::builder()
            .id("ski")
            .text("Ski trip")
            .date(dates::leap_day_2024())
            .end_date(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap())
            .build()
            .unwrap()
    }

    /// Task that crosses into the next year
    pub fn year_end_break() -> Task {
        Task::builder()
            .id("break")
            .text("Year-end break")
            .date(dates::new_years_eve_2025())
            .end_date(NaiveDate::from_ymd_opt(2026, 1, 2).unwrap())
            .build()
            .unwrap()
    }
}
