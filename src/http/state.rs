//! Shared state for HTTP handlers.

use crate::{config::settings::Settings, core::day::DayWindow, core::guard::SubmitGuard};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// State available to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Day boundaries used for numbering and reports
    pub window: DayWindow,
    /// Lifetime of a new session
    pub session_ttl: chrono::Duration,
    /// Double-submit guard, shared with the Discord bot
    pub guard: Arc<SubmitGuard>,
}

impl AppState {
    /// Builds the state from loaded settings.
    #[must_use]
    pub fn new(database: DatabaseConnection, settings: &Settings, guard: Arc<SubmitGuard>) -> Self {
        Self {
            database,
            window: settings.day_window(),
            session_ttl: settings.session_ttl,
            guard,
        }
    }
}
