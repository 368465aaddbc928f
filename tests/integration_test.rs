// Integration tests for storage backends, settings persistence and the session

mod fixtures;

use chrono::NaiveDate;
use clearmonth::config::{AppConfig, AppPaths};
use clearmonth::models::note::NoteKey;
use clearmonth::models::settings::Settings;
use clearmonth::services::calendar::NavDirection;
use clearmonth::services::database::Database;
use clearmonth::services::session::{CalendarSession, TaskDraft};
use clearmonth::services::settings::SettingsService;
use clearmonth::services::store::{open_store, Identity, TaskStore};

use fixtures::{dates, tasks};

fn paths_in(dir: &std::path::Path) -> AppPaths {
    AppConfig::default().paths_in(dir)
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_settings_persistence() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("settings.db");

    {
        let db = Database::new(db_path.to_str().unwrap()).expect("Failed to create database");
        db.initialize_schema().expect("Failed to initialize schema");

        let service = SettingsService::new(&db);
        let mut settings = service.get().expect("Failed to get settings");
        assert_eq!(settings, Settings::default());

        settings.theme = "green".to_string();
        settings.toggle_language();
        settings.current_view = "Week".to_string();
        service.update(&settings).expect("Failed to update settings");
    }

    // Second launch
    let db = Database::new(db_path.to_str().unwrap()).expect("Failed to open database");
    db.initialize_schema().expect("Schema init should be idempotent");
    let settings = SettingsService::new(&db).get().expect("Failed to load settings");
    assert_eq!(settings.theme, "green", "Theme should persist across restarts");
    assert_eq!(settings.language, "en");
    assert_eq!(settings.current_view, "Week");
}

#[test]
fn test_guest_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let paths = paths_in(dir.path());
    let today = dates::march_1_2024();

    let ski_id;
    {
        let store = open_store(&Identity::Guest, &paths).unwrap();
        let mut session = CalendarSession::load(store, today).unwrap();

        let draft = TaskDraft {
            text: "Ski trip".to_string(),
            date: Some(dates::leap_day_2024()),
            end_date: Some(ymd(2024, 3, 2)),
            ..TaskDraft::default()
        };
        ski_id = session.add_task(draft).unwrap().unwrap();
        session
            .set_note(NoteKey::month_of(today), "Pay rent")
            .unwrap();
    }

    let store = open_store(&Identity::Guest, &paths).unwrap();
    let mut session = CalendarSession::load(store, today).unwrap();

    assert_eq!(session.tasks().len(), 1);
    assert_eq!(session.tasks()[0].id, ski_id);
    assert_eq!(session.tasks_on(ymd(2024, 3, 2)).len(), 1);
    assert_eq!(session.note(session.month_grid().notes_key()), "Pay rent");
}

#[test]
fn test_signed_in_users_are_isolated() {
    let dir = tempfile::tempdir().unwrap();
    let paths = paths_in(dir.path());
    let today = dates::march_1_2024();

    let alice = Identity::User("alice".to_string());
    let bob = Identity::User("bob".to_string());

    let id = {
        let mut session = CalendarSession::load(open_store(&alice, &paths).unwrap(), today).unwrap();
        let draft = TaskDraft {
            text: tasks::dentist().text,
            date: Some(tasks::dentist().date),
            ..TaskDraft::default()
        };
        session.add_task(draft).unwrap().unwrap()
    };

    let session = CalendarSession::load(open_store(&bob, &paths).unwrap(), today).unwrap();
    assert!(session.tasks().is_empty());

    let session = CalendarSession::load(open_store(&alice, &paths).unwrap(), today).unwrap();
    assert_eq!(session.task(&id).unwrap().text, "Dentist");

    // Guests never see synced data
    let session =
        CalendarSession::load(open_store(&Identity::Guest, &paths).unwrap(), today).unwrap();
    assert!(session.tasks().is_empty());
}

#[test]
fn test_drag_to_next_month_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let paths = paths_in(dir.path());
    let user = Identity::User("uid-7".to_string());
    let today = dates::march_1_2024();

    let id = {
        let mut session = CalendarSession::load(open_store(&user, &paths).unwrap(), today).unwrap();
        let ski = tasks::ski_trip();
        let id = session
            .add_task(TaskDraft {
                text: ski.text,
                date: Some(ski.date),
                end_date: ski.end_date,
                ..TaskDraft::default()
            })
            .unwrap()
            .unwrap();

        session.begin_drag(&id).unwrap();
        let moved = session
            .finish_drag_on_nav(NavDirection::Next)
            .unwrap()
            .unwrap();
        assert_eq!(moved.date, ymd(2024, 4, 1));
        assert_eq!(session.cursor.displayed, ymd(2024, 4, 1));
        id
    };

    let session = CalendarSession::load(open_store(&user, &paths).unwrap(), today).unwrap();
    let task = session.task(&id).unwrap();
    assert_eq!(task.date, ymd(2024, 4, 1));
    assert_eq!(task.end_date, Some(ymd(2024, 4, 3)));
    assert_eq!(task.span_days(), 3);
}

#[test]
fn test_edit_toggle_delete_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let paths = paths_in(dir.path());
    let today = dates::new_years_eve_2025();

    let mut session =
        CalendarSession::load(open_store(&Identity::Guest, &paths).unwrap(), today).unwrap();
    session.apply_snapshot(vec![]);

    let id = session
        .add_task(TaskDraft {
            text: "Year-end break".to_string(),
            end_date: tasks::year_end_break().end_date,
            ..TaskDraft::default()
        })
        .unwrap()
        .unwrap();
    assert_eq!(session.task(&id).unwrap().date, today);
    assert_eq!(
        session.tasks_on(ymd(2026, 1, 2))[0].day_label.as_deref(),
        Some("(3/3)")
    );

    let mut edited = session.task(&id).unwrap().clone();
    edited.details = "Visit family".to_string();
    assert!(session.update_task(edited).unwrap());
    assert!(session.toggle_completed(&id).unwrap());
    session.delete_task(&id).unwrap();

    let session =
        CalendarSession::load(open_store(&Identity::Guest, &paths).unwrap(), today).unwrap();
    assert!(session.tasks().is_empty());
}

#[test]
fn test_config_selects_backend() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!(
            "user = \"uid-3\"\ndatabase_path = {:?}\n",
            dir.path().join("synced.db").to_str().unwrap()
        ),
    )
    .unwrap();

    let config = AppConfig::load(&config_path).unwrap();
    assert!(config.identity().is_signed_in());

    let paths = config.paths_in(dir.path());
    let mut store = open_store(&config.identity(), &paths).unwrap();
    let id = store.create(&tasks::dentist()).unwrap();
    assert_ne!(id, "dentist", "Synced store should issue its own id");
    assert!(dir.path().join("synced.db").exists());
}
