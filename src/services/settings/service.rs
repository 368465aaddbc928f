use crate::models::settings::Settings;
use crate::services::database::Database;
use anyhow::{anyhow, Context, Result};

use super::mapper::row_to_settings;

pub struct SettingsService<'a> {
    db: &'a Database,
}

impl<'a> SettingsService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Get the current settings
    pub fn get(&self) -> Result<Settings> {
        let conn = self.db.connection();

        let settings = conn
            .query_row(
                "SELECT id, theme, language, current_view FROM settings WHERE id = 1",
                [],
                row_to_settings,
            )
            .context("Failed to load settings")?;

        Ok(settings)
    }

    /// Update settings
    pub fn update(&self, settings: &Settings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        let conn = self.db.connection();

        conn.execute(
            "UPDATE settings \
             SET theme = ?1, \
                 language = ?2, \
                 current_view = ?3, \
                 updated_at = CURRENT_TIMESTAMP \
             WHERE id = 1",
            (&settings.theme, &settings.language, &settings.current_view),
        )
        .context("Failed to update settings")?;

        Ok(())
    }

    /// Reset settings to defaults
    pub fn reset(&self) -> Result<()> {
        let default_settings = Settings::default();
        self.update(&default_settings)
    }

    /// Load settings, falling back to defaults when the row is unreadable.
    pub fn load_or_default(&self) -> Settings {
        match self.get() {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to load settings: {}, using defaults", e);
                Settings::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::database::Database;

    fn setup_test_db() -> Database {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        db
    }

    #[test]
    fn test_get_default_settings() {
        let db = setup_test_db();
        let service = SettingsService::new(&db);

        let settings = service.get().unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_update_settings() {
        let db = setup_test_db();
        let service = SettingsService::new(&db);

        let mut settings = service.get().unwrap();
        settings.theme = "blue".to_string();
        settings.language = "en".to_string();

        let result = service.update(&settings);
        assert!(result.is_ok());

        let updated = service.get().unwrap();
        assert_eq!(updated.theme, "blue");
        assert_eq!(updated.language, "en");
    }

    #[test]
    fn test_update_invalid_settings() {
        let db = setup_test_db();
        let service = SettingsService::new(&db);

        let mut settings = service.get().unwrap();
        settings.language = "fr".to_string();

        let result = service.update(&settings);
        assert!(result.is_err());
        assert_eq!(service.get().unwrap().language, "zh");
    }

    #[test]
    fn test_reset_settings() {
        let db = setup_test_db();
        let service = SettingsService::new(&db);

        let mut settings = service.get().unwrap();
        settings.theme = "red".to_string();
        settings.current_view = "Week".to_string();
        service.update(&settings).unwrap();

        let result = service.reset();
        assert!(result.is_ok());

        assert_eq!(service.get().unwrap(), Settings::default());
    }

    #[test]
    fn test_update_current_view() {
        let db = setup_test_db();
        let service = SettingsService::new(&db);

        let mut settings = service.get().unwrap();
        settings.current_view = "Week".to_string();

        service.update(&settings).unwrap();

        let updated = service.get().unwrap();
        assert_eq!(updated.current_view, "Week");
    }

    #[test]
    fn test_load_or_default_without_schema() {
        let db = Database::new(":memory:").unwrap();
        let service = SettingsService::new(&db);
        assert_eq!(service.load_or_default(), Settings::default());
    }
}
