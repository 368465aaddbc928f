// Module exports for models

pub mod note;
pub mod settings;
pub mod task;
pub mod ui;
