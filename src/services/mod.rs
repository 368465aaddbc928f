// Service module exports
// Calendar derivations, persistence backends and the session controller

pub mod calendar;
pub mod database;
pub mod note;
pub mod session;
pub mod settings;
pub mod store;
pub mod task;
