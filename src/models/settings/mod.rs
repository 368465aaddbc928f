// Settings module
// User preferences persisted alongside tasks

use crate::models::ui::ViewType;

/// Theme identifiers offered by the colour picker.
pub const THEMES: [&str; 6] = ["orange", "slate", "green", "blue", "red", "yellow"];

/// Interface languages.
pub const LANGUAGES: [&str; 2] = ["en", "zh"];

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub id: Option<i64>,
    pub theme: String,
    pub language: String,
    pub current_view: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            id: Some(1),
            theme: "orange".to_string(),
            language: "zh".to_string(),
            current_view: "Month".to_string(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), String> {
        if !THEMES.contains(&self.theme.as_str()) {
            return Err(format!("Unknown theme '{}'", self.theme));
        }
        if !LANGUAGES.contains(&self.language.as_str()) {
            return Err(format!("Unknown language '{}'", self.language));
        }
        self.view()?;
        Ok(())
    }

    pub fn view(&self) -> Result<ViewType, String> {
        self.current_view.parse()
    }

    /// Flip between the two interface languages.
    pub fn toggle_language(&mut self) {
        self.language = if self.language == "en" { "zh" } else { "en" }.to_string();
    }
}
