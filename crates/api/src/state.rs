use std::sync::Arc;

use escapade_core::clock::{Clock, RewardCalendar};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: escapade_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// Time source for check-in days. Tests inject a fixed clock.
    pub clock: Arc<dyn Clock>,
    /// Maps instants to reward days in the configured timezone.
    pub calendar: RewardCalendar,
}

impl AppState {
    /// Today's reward day according to the injected clock.
    pub fn today(&self) -> chrono::NaiveDate {
        self.calendar.day_of(self.clock.now())
    }
}
