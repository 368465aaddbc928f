// ClearMonth
// Headless entry point: open the configured backend and print the current month or week

use anyhow::{Context, Result};
use chrono::{Datelike, Local};

use clearmonth::config::AppConfig;
use clearmonth::models::ui::ViewType;
use clearmonth::services::calendar::Cell;
use clearmonth::services::database::Database;
use clearmonth::services::session::CalendarSession;
use clearmonth::services::settings::SettingsService;
use clearmonth::services::store::open_store;

const CELL_WIDTH: usize = 8;
const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

fn main() -> Result<()> {
    let config = AppConfig::load_default().context("Failed to load configuration")?;

    let filter = config.log_filter.as_deref().unwrap_or("info");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    log::info!("Starting ClearMonth");

    let paths = config.paths();
    let identity = config.identity();

    let settings = {
        let db = Database::open_initialized(&paths.database)?;
        SettingsService::new(&db).load_or_default()
    };

    let store = open_store(&identity, &paths)?;
    let today = Local::now().date_naive();
    let mut session = CalendarSession::load(store, today)?.with_settings(settings);

    match session.cursor.view {
        ViewType::Month => print_month(&mut session),
        ViewType::Week => print_week(&mut session),
    }
    Ok(())
}

fn print_month(session: &mut CalendarSession) {
    let grid = session.month_grid();
    let month_note = session.note(grid.notes_key()).to_string();

    println!("{:04}-{:02}", grid.year, grid.month0 + 1);
    let header: Vec<String> = WEEKDAYS
        .iter()
        .map(|d| format!("{:<width$}", d, width = CELL_WIDTH))
        .collect();
    println!("{}", header.concat());

    let mut line = String::new();
    let mut column = 0;
    for cell in &grid.cells {
        let text = match cell {
            Cell::Blank => String::new(),
            Cell::Day { day, date, .. } => {
                let count = session.tasks_on(*date).len();
                let marker = if *date == session.cursor.selected { "*" } else { "" };
                if count > 0 {
                    format!("{}{}({})", day, marker, count)
                } else {
                    format!("{}{}", day, marker)
                }
            }
            Cell::NotesSlot { .. } => "[notes]".to_string(),
        };
        let width = CELL_WIDTH * cell.span() as usize;
        line.push_str(&format!("{:<width$}", text, width = width));

        column += cell.span();
        if column % 7 == 0 {
            println!("{}", line.trim_end());
            line.clear();
        }
    }

    if !month_note.is_empty() {
        println!();
        println!("Notes: {}", month_note);
    }

    let count = session
        .tasks()
        .iter()
        .filter(|t| t.date.year() == grid.year && t.date.month0() as i32 == grid.month0)
        .count();
    log::info!("{} tasks start this month", count);
}

fn print_week(session: &mut CalendarSession) {
    let week = session.week();
    let week_note = session.note(week.notes_key()).to_string();

    for ((name, key), date) in WEEKDAYS.iter().zip(week.keys()).zip(week.days) {
        let marker = if date == session.cursor.selected { "*" } else { " " };
        let titles: Vec<String> = session
            .tasks_on(date)
            .iter()
            .map(|o| match &o.day_label {
                Some(label) => format!("{} {}", o.task.text, label),
                None => o.task.text.clone(),
            })
            .collect();
        println!("{}{} {}  {}", marker, name, key, titles.join(", "));
    }

    if !week_note.is_empty() {
        println!();
        println!("Notes: {}", week_note);
    }
}
