use std::sync::Arc;

use crate::api::{DashboardApi, HttpDashboardApi};
use crate::clock::{Clock, LocalClock};
use crate::config::Settings;
use crate::dashboard::Dashboard;
use crate::page::Page;

/// Process-wide handles built once from settings.
pub struct AppState {
    pub settings: Settings,
    pub api: Arc<dyn DashboardApi>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = Settings::new()?;
        Ok(Self::from_settings(settings))
    }

    pub fn from_settings(settings: Settings) -> Self {
        let api: Arc<dyn DashboardApi> = Arc::new(HttpDashboardApi::from_settings(&settings));
        Self {
            settings,
            api,
            clock: Arc::new(LocalClock),
        }
    }

    pub fn dashboard(&self, page: Arc<dyn Page>) -> Dashboard {
        Dashboard::new(
            Arc::clone(&self.api),
            page,
            Arc::clone(&self.clock),
            &self.settings,
        )
    }
}
